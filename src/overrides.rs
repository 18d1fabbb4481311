//! プラットフォーム別の上書きディレクトリ（`www/merges/<target>`）

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 上書きディレクトリの管理
#[derive(Debug, Clone)]
pub struct OverrideDirs {
    merges_dir: PathBuf,
}

impl OverrideDirs {
    pub fn new(merges_dir: impl Into<PathBuf>) -> Self {
        Self {
            merges_dir: merges_dir.into(),
        }
    }

    pub fn path(&self, target: &str) -> PathBuf {
        self.merges_dir.join(target)
    }

    /// ディレクトリを作成（既存なら何もしない、親も作成）
    pub fn ensure(&self, target: &str) -> Result<PathBuf> {
        let dir = self.path(target);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// ディレクトリを再帰削除（存在しなければ何もしない）
    pub fn remove(&self, target: &str) -> Result<()> {
        remove_dir_if_exists(&self.path(target))
    }
}

/// ディレクトリを再帰削除
///
/// - 存在しない場合は Ok(())
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_missing_parents() {
        let temp_dir = TempDir::new().unwrap();
        let merges = temp_dir.path().join("www").join("merges");
        let dirs = OverrideDirs::new(&merges);

        let created = dirs.ensure("android").unwrap();

        assert_eq!(created, merges.join("android"));
        assert!(created.is_dir());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dirs = OverrideDirs::new(temp_dir.path().join("merges"));
        let dir = dirs.ensure("ios").unwrap();
        fs::write(dir.join("override.css"), "body{}").unwrap();

        dirs.ensure("ios").unwrap();

        assert_eq!(fs::read_to_string(dir.join("override.css")).unwrap(), "body{}");
    }

    #[test]
    fn test_ensure_fails_when_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let merges = temp_dir.path().join("merges");
        fs::write(&merges, "not a directory").unwrap();

        let result = OverrideDirs::new(&merges).ensure("android");

        assert!(matches!(result, Err(crate::error::PlatformError::Io(_))));
    }

    #[test]
    fn test_remove_existing_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let dirs = OverrideDirs::new(temp_dir.path().join("merges"));
        let dir = dirs.ensure("android").unwrap();
        fs::write(dir.join("a.js"), "").unwrap();

        dirs.remove("android").unwrap();
        assert!(!dir.exists());

        dirs.remove("android").unwrap();
    }
}
