//! テスト用の偽プラットフォーム

use super::*;
use crate::error::PlatformError;

/// 更新完了時にサブプロジェクトへ書き込むマーカー
pub const UPDATED_MARKER: &str = ".updated";

/// 要件チェックと更新結果を差し替えられるプラットフォーム
#[derive(Debug, Clone)]
pub struct FakePlatform {
    name: &'static str,
    unmet: Option<String>,
    update_failure: Option<String>,
}

impl FakePlatform {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            unmet: None,
            update_failure: None,
        }
    }

    /// 要件チェックを失敗させる
    pub fn with_unmet(mut self, detail: &str) -> Self {
        self.unmet = Some(detail.to_string());
        self
    }

    /// プロジェクト更新を失敗させる
    pub fn with_failing_update(mut self, detail: &str) -> Self {
        self.update_failure = Some(detail.to_string());
        self
    }
}

impl Platform for FakePlatform {
    fn name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.name
    }

    fn check_requirements<'a>(
        &'a self,
        _runner: &'a dyn ProcessRunner,
    ) -> Pin<Box<dyn Future<Output = RequirementResult> + Send + 'a>> {
        let result = match &self.unmet {
            Some(detail) => Err(detail.clone()),
            None => Ok(()),
        };
        Box::pin(async move { result })
    }

    fn generator_args(&self, input: &GeneratorInput) -> Vec<OsString> {
        vec![
            input.output_dir.clone().into_os_string(),
            input.package_id.clone().into(),
            input.name.clone().into(),
        ]
    }

    fn open_project(&self, platform_dir: &Path) -> Box<dyn PlatformProject> {
        Box::new(FakeProject {
            target: self.name,
            root: platform_dir.to_path_buf(),
            failure: self.update_failure.clone(),
        })
    }
}

struct FakeProject {
    target: &'static str,
    root: PathBuf,
    failure: Option<String>,
}

impl PlatformProject for FakeProject {
    fn update_project<'a>(
        &'a self,
        manifest: &'a Manifest,
        _app_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            if let Some(detail) = &self.failure {
                return Err(PlatformError::ProjectUpdate {
                    target: self.target.to_string(),
                    detail: detail.clone(),
                });
            }
            std::fs::create_dir_all(&self.root)?;
            std::fs::write(self.root.join(UPDATED_MARKER), &manifest.id)?;
            Ok(())
        })
    }
}
