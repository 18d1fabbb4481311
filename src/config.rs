//! 外部ツールの配置設定
//!
//! プラットフォームの create スクリプトとプラグインインストーラの場所を保持する。
//! 固定の相対パスから導出せず、オーケストレータ構築時に明示的に渡す。
//!
//! 優先順位: CLIオプション > 環境変数 > `$HOME/.pfm/lib` 配下のデフォルト

use crate::error::{PlatformError, Result};
use std::path::{Path, PathBuf};

/// プラットフォームライブラリのディレクトリを指定する環境変数
pub const LIB_DIR_ENV: &str = "PFM_LIB_DIR";

/// プラグインインストーラのパスを指定する環境変数
pub const PLUGIN_INSTALLER_ENV: &str = "PFM_PLUGIN_INSTALLER";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }
}

/// 外部ツールのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// 各プラットフォームのライブラリ（`<lib_dir>/<repo>/bin/create`）を含むディレクトリ
    pub lib_dir: PathBuf,
    /// プラグインインストーラの実行ファイル
    pub plugin_installer: PathBuf,
}

impl ToolPaths {
    pub fn new(lib_dir: impl Into<PathBuf>, plugin_installer: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
            plugin_installer: plugin_installer.into(),
        }
    }

    /// CLIオプション・環境変数・デフォルトの順に解決
    pub fn resolve(lib_dir: Option<PathBuf>, plugin_installer: Option<PathBuf>) -> Result<Self> {
        let lib_dir = match lib_dir.or_else(|| EnvVar::get(LIB_DIR_ENV).map(PathBuf::from)) {
            Some(dir) => dir,
            None => Self::default_lib_dir()?,
        };

        let plugin_installer = plugin_installer
            .or_else(|| EnvVar::get(PLUGIN_INSTALLER_ENV).map(PathBuf::from))
            .unwrap_or_else(|| lib_dir.join("plugman").join("plugman"));

        Ok(Self::new(lib_dir, plugin_installer))
    }

    fn default_lib_dir() -> Result<PathBuf> {
        let home = EnvVar::get("HOME").ok_or_else(|| {
            PlatformError::Config(format!(
                "HOME environment variable not set; pass --lib-dir or set {}",
                LIB_DIR_ENV
            ))
        })?;
        Ok(Path::new(&home).join(".pfm").join("lib"))
    }

    /// プラットフォームの create スクリプトのパス
    pub fn generator(&self, repo: &str) -> PathBuf {
        self.lib_dir.join(repo).join("bin").join("create")
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
