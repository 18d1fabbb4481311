//! プラットフォームレジストリ
//!
//! プラットフォーム名から `Platform` 実装を引く。起動時に1度だけ構築し、
//! 新しいプラットフォームは `register` で追加する。

use super::{AndroidPlatform, BlackBerryPlatform, IosPlatform, Platform};
use crate::error::{PlatformError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 名前 → アダプタの対応表
#[derive(Clone, Default)]
pub struct PlatformRegistry {
    platforms: BTreeMap<String, Arc<dyn Platform>>,
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRegistry")
            .field("platforms", &self.names())
            .finish()
    }
}

impl PlatformRegistry {
    /// 空のレジストリ
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みプラットフォームを登録したレジストリ
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AndroidPlatform::new()));
        registry.register(Arc::new(IosPlatform::new()));
        registry.register(Arc::new(BlackBerryPlatform::new()));
        registry
    }

    /// アダプタを登録（同名は置き換え）
    pub fn register(&mut self, platform: Arc<dyn Platform>) -> &mut Self {
        self.platforms.insert(platform.name().to_string(), platform);
        self
    }

    /// 名前からアダプタを取得
    pub fn get(&self, name: &str) -> Result<Arc<dyn Platform>> {
        self.platforms
            .get(name)
            .cloned()
            .ok_or_else(|| PlatformError::UnknownPlatform(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }

    /// 登録済みの名前（名前順）
    pub fn names(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    /// 登録済みアダプタ（名前順）
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Platform>> {
        self.platforms.values()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
