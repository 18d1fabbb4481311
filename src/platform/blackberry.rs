//! BlackBerry プラットフォーム実装

use super::www::copy_app_dir_blocking;
use super::{GeneratorInput, Platform, PlatformProject, RequirementResult};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::process::ProcessRunner;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// BlackBerry プラットフォーム
#[derive(Debug, Default)]
pub struct BlackBerryPlatform;

impl BlackBerryPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for BlackBerryPlatform {
    fn name(&self) -> &'static str {
        "blackberry"
    }

    fn display_name(&self) -> &'static str {
        "BlackBerry"
    }

    /// SDK の検出は create スクリプト側に任せる
    fn check_requirements<'a>(
        &'a self,
        _runner: &'a dyn ProcessRunner,
    ) -> Pin<Box<dyn Future<Output = RequirementResult> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }

    /// プロジェクト識別子の位置に表示名を渡す
    fn generator_args(&self, input: &GeneratorInput) -> Vec<OsString> {
        vec![
            input.output_dir.clone().into_os_string(),
            input.name.clone().into(),
            input.name.clone().into(),
        ]
    }

    fn open_project(&self, platform_dir: &Path) -> Box<dyn PlatformProject> {
        Box::new(BlackBerryProject {
            root: platform_dir.to_path_buf(),
        })
    }
}

/// 生成済み BlackBerry サブプロジェクト
#[derive(Debug)]
pub struct BlackBerryProject {
    root: PathBuf,
}

impl PlatformProject for BlackBerryProject {
    fn update_project<'a>(
        &'a self,
        _manifest: &'a Manifest,
        app_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move { copy_app_dir_blocking(app_dir, &self.root.join("www")).await })
    }
}
