//! iOS プラットフォーム実装

use super::www::{copy_app_dir_blocking, escape_xml, rewrite_between};
use super::{GeneratorInput, Platform, PlatformProject, RequirementResult};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::process::{Invocation, ProcessRunner};
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// 必要な Xcode の最小バージョン
const MIN_XCODE: (u32, u32) = (4, 5);

/// iOS プラットフォーム
#[derive(Debug, Default)]
pub struct IosPlatform;

impl IosPlatform {
    pub fn new() -> Self {
        Self
    }
}

/// `xcodebuild -version` の出力から (major, minor) を取り出す
pub fn parse_xcode_version(output: &str) -> Option<(u32, u32)> {
    let line = output.lines().find(|l| l.trim_start().starts_with("Xcode"))?;
    let version = line.split_whitespace().nth(1)?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map(|m| m.parse().ok()).unwrap_or(Some(0))?;
    Some((major, minor))
}

impl Platform for IosPlatform {
    fn name(&self) -> &'static str {
        "ios"
    }

    fn display_name(&self) -> &'static str {
        "iOS"
    }

    fn check_requirements<'a>(
        &'a self,
        runner: &'a dyn ProcessRunner,
    ) -> Pin<Box<dyn Future<Output = RequirementResult> + Send + 'a>> {
        Box::pin(async move {
            let invocation = Invocation::new("xcodebuild").arg("-version");
            let result = runner.run(&invocation, Path::new(".")).await;

            if !result.success {
                return Err(format!(
                    "Xcode is (probably) not installed, specifically the command `xcodebuild` is unavailable or erroring out. Output: {}",
                    result.output.trim()
                ));
            }
            match parse_xcode_version(&result.output) {
                Some(version) if version >= MIN_XCODE => Ok(()),
                Some((major, minor)) => Err(format!(
                    "Xcode version installed is too old. Minimum: >={}.{}, yours: {}.{}",
                    MIN_XCODE.0, MIN_XCODE.1, major, minor
                )),
                None => Err(format!(
                    "Could not determine the Xcode version from: {}",
                    result.output.trim()
                )),
            }
        })
    }

    fn generator_args(&self, input: &GeneratorInput) -> Vec<OsString> {
        vec![
            "--arc".into(),
            input.output_dir.clone().into_os_string(),
            input.package_id.clone().into(),
            input.name.clone().into(),
        ]
    }

    fn open_project(&self, platform_dir: &Path) -> Box<dyn PlatformProject> {
        Box::new(IosProject {
            root: platform_dir.to_path_buf(),
        })
    }
}

/// 生成済み iOS サブプロジェクト
#[derive(Debug)]
pub struct IosProject {
    root: PathBuf,
}

impl IosProject {
    pub fn www_dir(&self) -> PathBuf {
        self.root.join("www")
    }

    /// create スクリプトはサニタイズ済みの名前でディレクトリを作る
    pub fn info_plist_path(&self, manifest: &Manifest) -> PathBuf {
        let name = manifest.display_name();
        self.root.join(&name).join(format!("{}-Info.plist", name))
    }
}

impl PlatformProject for IosProject {
    fn update_project<'a>(
        &'a self,
        manifest: &'a Manifest,
        app_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let plist = self.info_plist_path(manifest);
            rewrite_between(
                &plist,
                r"(<key>CFBundleIdentifier</key>\s*<string>)[^<]*(</string>)",
                &manifest.package_id(),
            )?;
            rewrite_between(
                &plist,
                r"(<key>CFBundleDisplayName</key>\s*<string>)[^<]*(</string>)",
                &escape_xml(&manifest.name),
            )?;
            copy_app_dir_blocking(app_dir, &self.www_dir()).await
        })
    }
}
