//! 共有マニフェスト
//!
//! `www/config.toml` から読み込むアプリケーション設定。
//! 1回の実行で1度だけ読み込み、以降は変更しない。
//!
//! ```toml
//! id = "com.example.hello"
//! name = "Hello World"
//! version = "1.0.0"
//! ```

use crate::error::{PlatformError, Result};
use serde::Deserialize;
use std::path::Path;

/// アプリケーションマニフェスト
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// パッケージ識別子（例: "com.example.hello"）
    pub id: String,
    /// 表示名
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Manifest {
    /// マニフェストを読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PlatformError::InvalidManifest {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::parse(&content).map_err(|detail| PlatformError::InvalidManifest {
            path: path.to_path_buf(),
            detail,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.message().to_string())
    }

    /// ジェネレータに渡すパッケージ識別子（`[A-Za-z0-9_.]` 以外は `_`）
    pub fn package_id(&self) -> String {
        sanitize_package_id(&self.id)
    }

    /// ジェネレータに渡すプロジェクト名（単語構成文字以外は `_`）
    pub fn display_name(&self) -> String {
        sanitize_name(&self.name)
    }
}

/// パッケージ識別子のサニタイズ
pub fn sanitize_package_id(id: &str) -> String {
    id.chars()
        .map(|c| if is_word_char(c) || c == '.' { c } else { '_' })
        .collect()
}

/// 表示名のサニタイズ
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_word_char(c) { c } else { '_' })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
