//! ライフサイクルフック
//!
//! 各操作の前後に名前付きイベントを通知する。通知は投げっぱなしで、
//! 失敗しても制御フローには影響しない。

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// フックイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    BeforePlatformLs,
    AfterPlatformLs,
    BeforePlatformAdd,
    AfterPlatformAdd,
    BeforePlatformRm,
    AfterPlatformRm,
}

impl HookEvent {
    /// イベント名（フックディレクトリ名）
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::BeforePlatformLs => "before_platform_ls",
            HookEvent::AfterPlatformLs => "after_platform_ls",
            HookEvent::BeforePlatformAdd => "before_platform_add",
            HookEvent::AfterPlatformAdd => "after_platform_add",
            HookEvent::BeforePlatformRm => "before_platform_rm",
            HookEvent::AfterPlatformRm => "after_platform_rm",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// フック通知 trait
pub trait HookNotifier: Send + Sync {
    fn fire(&self, event: HookEvent);
}

/// `.pfm/hooks/<event>/` 配下のスクリプトを実行する通知先
///
/// スクリプトはファイル名順に1つずつ実行され、引数と作業ディレクトリには
/// プロジェクトルートが渡される。
#[derive(Debug)]
pub struct ScriptHooks {
    hooks_dir: PathBuf,
    project_root: PathBuf,
}

impl ScriptHooks {
    pub fn new(hooks_dir: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            project_root: project_root.into(),
        }
    }

    /// イベントに対応するスクリプト一覧（名前順）
    pub fn scripts(&self, event: HookEvent) -> Vec<PathBuf> {
        let dir = self.hooks_dir.join(event.as_str());
        let mut scripts: Vec<PathBuf> = std::fs::read_dir(&dir)
            .into_iter()
            .flatten()
            .flatten()
            .map(|e| e.path())
            .filter(|p| is_executable(p))
            .collect();
        scripts.sort();
        scripts
    }
}

impl HookNotifier for ScriptHooks {
    fn fire(&self, event: HookEvent) {
        for script in self.scripts(event) {
            debug!(hook = %event, script = %script.display(), "running hook script");
            let status = Command::new(&script)
                .arg(&self.project_root)
                .current_dir(&self.project_root)
                .status();
            match status {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    warn!(hook = %event, script = %script.display(), %status, "hook script failed")
                }
                Err(e) => {
                    warn!(hook = %event, script = %script.display(), error = %e, "hook script could not be started")
                }
            }
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
