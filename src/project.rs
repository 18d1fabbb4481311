//! プロジェクトコンテキスト
//!
//! プロジェクトルートの探索と、ルートから導出されるディレクトリ構成を扱う。
//!
//! ```text
//! <root>/
//!   .pfm/hooks/<event>/     フックスクリプト
//!   platforms/<target>/     プラットフォームのサブプロジェクト
//!   plugins/<plugin>/       インストール済みプラグイン
//!   www/config.toml         共有マニフェスト
//!   www/merges/<target>/    プラットフォーム別の上書きアセット
//! ```

use crate::error::{PlatformError, Result};
use std::path::{Component, Path, PathBuf};

/// プロジェクトルートを示すマーカーディレクトリ
pub const PROJECT_MARKER: &str = ".pfm";

const PLATFORMS_DIR: &str = "platforms";
const PLUGINS_DIR: &str = "plugins";
const APP_DIR: &str = "www";
const MERGES_DIR: &str = "merges";
const MANIFEST_FILE: &str = "config.toml";
const HOOKS_DIR: &str = "hooks";

/// プロジェクトコンテキスト（1回の実行につき1つ、解決後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    /// 既知のルートからコンテキストを作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `start` から親方向へマーカーディレクトリを探す
    pub fn discover(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(PROJECT_MARKER).is_dir())
            .map(Self::new)
            .ok_or_else(|| PlatformError::NotAProject(start.to_path_buf()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn platforms_dir(&self) -> PathBuf {
        self.root.join(PLATFORMS_DIR)
    }

    pub fn platform_dir(&self, target: &str) -> PathBuf {
        self.platforms_dir().join(target)
    }

    pub fn app_dir(&self) -> PathBuf {
        self.root.join(APP_DIR)
    }

    pub fn merges_dir(&self) -> PathBuf {
        self.app_dir().join(MERGES_DIR)
    }

    pub fn override_dir(&self, target: &str) -> PathBuf {
        self.merges_dir().join(target)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.app_dir().join(MANIFEST_FILE)
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.root.join(PROJECT_MARKER).join(HOOKS_DIR)
    }

    /// インストール済みプラットフォーム名（名前順）
    ///
    /// `platforms/` が存在しない場合は空。
    pub fn installed_platforms(&self) -> Result<Vec<String>> {
        list_entry_names(&self.platforms_dir())
    }

    /// インストール済みプラグイン名（名前順）
    ///
    /// `plugins/` が存在しない場合は空。
    pub fn installed_plugins(&self) -> Result<Vec<String>> {
        list_entry_names(&self.plugins_dir())
    }
}

/// プラットフォーム名の検証
///
/// `platforms/` や `merges/` の外を指す名前（`..`、区切り文字入り、空文字）を拒否する。
pub fn validate_target_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(PlatformError::InvalidTargetName(name.to_string())),
    }
}

/// ディレクトリ直下のエントリ名を名前順で返す（隠しエントリは除外）
fn list_entry_names(dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
