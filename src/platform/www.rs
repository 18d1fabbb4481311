//! サブプロジェクト更新の共通処理

use crate::error::{PlatformError, Result};
use regex::{Captures, Regex};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// www 以下でコピー対象外にするエントリ
const EXCLUDED: [&str; 2] = ["merges", "config.toml"];

/// 共有アセットをプラットフォームの www へコピー
///
/// コピー先は毎回作り直す。`merges/` とマニフェストはコピーしない。
pub fn copy_app_dir(app_dir: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest)?;
    }
    fs::create_dir_all(dest)?;

    if !app_dir.is_dir() {
        return Ok(());
    }

    let walker = WalkDir::new(app_dir).min_depth(1).into_iter().filter_entry(|e| {
        !(e.depth() == 1 && EXCLUDED.iter().any(|name| e.file_name() == *name))
    });

    for entry in walker {
        let entry = entry.map_err(|e| PlatformError::Io(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(app_dir)
            .map_err(|e| PlatformError::Io(std::io::Error::other(e)))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// `copy_app_dir` をブロッキングスレッドで実行
pub async fn copy_app_dir_blocking(app_dir: &Path, dest: &Path) -> Result<()> {
    let app_dir = app_dir.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || copy_app_dir(&app_dir, &dest))
        .await
        .map_err(|e| PlatformError::Io(std::io::Error::other(e)))?
}

/// `pattern` の2つのキャプチャグループに挟まれた値を置き換える
///
/// ファイルが無ければ何もせず `false`。書き込みは一時ファイル経由で置換し、
/// 元ファイルのパーミッションを引き継ぐ。
pub fn rewrite_between(path: &Path, pattern: &str, value: &str) -> Result<bool> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let re = Regex::new(pattern).map_err(|e| PlatformError::Io(std::io::Error::other(e)))?;
    let updated = re.replace_all(&content, |caps: &Captures| {
        format!("{}{}{}", &caps[1], value, &caps[2])
    });

    let parent = path.parent().unwrap_or(Path::new("."));
    let permissions = fs::metadata(path)?.permissions();
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(updated.as_bytes())?;
    temp_file.as_file().set_permissions(permissions)?;
    temp_file
        .persist(path)
        .map_err(|e| PlatformError::Io(e.error))?;

    Ok(true)
}

/// XMLテキストとして埋め込むためのエスケープ
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_app_dir_excludes_merges_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("www");
        fs::create_dir_all(app.join("js")).unwrap();
        fs::create_dir_all(app.join("merges").join("android")).unwrap();
        fs::write(app.join("index.html"), "<html/>").unwrap();
        fs::write(app.join("js").join("app.js"), "run()").unwrap();
        fs::write(app.join("config.toml"), "id = \"x\"").unwrap();
        fs::write(app.join("merges").join("android").join("a.js"), "").unwrap();

        let dest = temp_dir.path().join("out").join("www");
        copy_app_dir(&app, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "<html/>");
        assert_eq!(fs::read_to_string(dest.join("js").join("app.js")).unwrap(), "run()");
        assert!(!dest.join("merges").exists());
        assert!(!dest.join("config.toml").exists());
    }

    #[test]
    fn test_copy_app_dir_replaces_previous_copy() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("www");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("index.html"), "new").unwrap();

        let dest = temp_dir.path().join("dest");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.html"), "old").unwrap();

        copy_app_dir(&app, &dest).unwrap();

        assert!(!dest.join("stale.html").exists());
        assert!(dest.join("index.html").exists());
    }

    #[test]
    fn test_rewrite_between_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let changed = rewrite_between(&temp_dir.path().join("none.xml"), r"(a)b(c)", "x").unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_rewrite_between_keeps_surroundings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("strings.xml");
        fs::write(&path, "<string name=\"app_name\">Old</string>\n").unwrap();

        let changed = rewrite_between(
            &path,
            r#"(<string name="app_name">)[^<]*(</string>)"#,
            "New $1 App",
        )
        .unwrap();

        assert!(changed);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<string name=\"app_name\">New $1 App</string>\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_between_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("AndroidManifest.xml");
        fs::write(&path, "<manifest package=\"org.apache\">").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        rewrite_between(&path, r#"(package=")[^"]*(")"#, "com.example").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<manifest package=\"com.example\">"
        );
    }

    #[tokio::test]
    async fn test_copy_app_dir_blocking() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("www");
        fs::create_dir_all(app.join("css")).unwrap();
        fs::write(app.join("css").join("app.css"), "body{}").unwrap();
        let dest = temp_dir.path().join("out");

        copy_app_dir_blocking(&app, &dest).await.unwrap();

        assert_eq!(fs::read_to_string(dest.join("css").join("app.css")).unwrap(), "body{}");
    }

    #[tokio::test]
    async fn test_copy_app_dir_blocking_reports_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("www");
        fs::create_dir_all(&app).unwrap();
        let dest = temp_dir.path().join("www-file");
        fs::write(&dest, "not a directory").unwrap();

        let result = copy_app_dir_blocking(&app, &dest).await;

        assert!(matches!(result, Err(PlatformError::Io(_))));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Tom & \"Jerry\" <3"), "Tom &amp; &quot;Jerry&quot; &lt;3");
    }
}
