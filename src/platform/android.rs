//! Android プラットフォーム実装

use super::www::{copy_app_dir_blocking, escape_xml, rewrite_between};
use super::{GeneratorInput, Platform, PlatformProject, RequirementResult};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::process::{Invocation, ProcessRunner};
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::debug;

/// 必要な Android SDK ターゲット
const REQUIRED_TARGET: &str = "android-17";

/// Android プラットフォーム
#[derive(Debug, Default)]
pub struct AndroidPlatform;

impl AndroidPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for AndroidPlatform {
    fn name(&self) -> &'static str {
        "android"
    }

    fn display_name(&self) -> &'static str {
        "Android"
    }

    fn check_requirements<'a>(
        &'a self,
        runner: &'a dyn ProcessRunner,
    ) -> Pin<Box<dyn Future<Output = RequirementResult> + Send + 'a>> {
        Box::pin(async move {
            let invocation = Invocation::new("android").args(["list", "target"]);
            let result = runner.run(&invocation, Path::new(".")).await;

            if !result.success {
                return Err(format!(
                    "The command `android` failed. Make sure you have the latest Android SDK installed, \
                     and the `android` command (inside the tools/ folder) is added to your path. Output: {}",
                    result.output.trim()
                ));
            }
            if !result.output.contains(REQUIRED_TARGET) {
                return Err(format!(
                    "Please install Android target 17 (the Android 4.2 SDK). Make sure you have the latest \
                     Android tools installed as well. Run `android` and install the {} target.",
                    REQUIRED_TARGET
                ));
            }
            Ok(())
        })
    }

    fn generator_args(&self, input: &GeneratorInput) -> Vec<OsString> {
        vec![
            input.output_dir.clone().into_os_string(),
            input.package_id.clone().into(),
            input.name.clone().into(),
        ]
    }

    fn open_project(&self, platform_dir: &Path) -> Box<dyn PlatformProject> {
        Box::new(AndroidProject {
            root: platform_dir.to_path_buf(),
        })
    }
}

/// 生成済み Android サブプロジェクト
#[derive(Debug)]
pub struct AndroidProject {
    root: PathBuf,
}

impl AndroidProject {
    pub fn www_dir(&self) -> PathBuf {
        self.root.join("assets").join("www")
    }

    pub fn strings_path(&self) -> PathBuf {
        self.root.join("res").join("values").join("strings.xml")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("AndroidManifest.xml")
    }

    fn update_from_config(&self, manifest: &Manifest) -> Result<()> {
        let renamed = rewrite_between(
            &self.strings_path(),
            r#"(<string name="app_name">)[^<]*(</string>)"#,
            &escape_xml(&manifest.name),
        )?;
        let repackaged = rewrite_between(
            &self.manifest_path(),
            r#"(<manifest\b[^>]*?\bpackage=")[^"]*(")"#,
            &manifest.package_id(),
        )?;
        debug!(renamed, repackaged, root = %self.root.display(), "updated android config");
        Ok(())
    }
}

impl PlatformProject for AndroidProject {
    fn update_project<'a>(
        &'a self,
        manifest: &'a Manifest,
        app_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.update_from_config(manifest)?;
            copy_app_dir_blocking(app_dir, &self.www_dir()).await
        })
    }
}

#[cfg(test)]
#[path = "android_test.rs"]
mod tests;
