//! プラットフォームアダプタの抽象化
//!
//! 各プラットフォーム（Android, iOS, BlackBerry）の要件チェック・
//! create スクリプトの引数構成・生成後のプロジェクト更新を抽象化する。
//! オーケストレータは名前で分岐せず、`PlatformRegistry` から引いた
//! `Platform` trait を通じて操作する。
//!
//! ## 使い方
//!
//! ```ignore
//! let registry = PlatformRegistry::builtin();
//! let platform = registry.get("android")?;
//! platform.check_requirements(&SystemRunner).await?;
//! let args = platform.generator_args(&GeneratorInput { .. });
//! let project = platform.open_project(&output_dir);
//! project.update_project(&manifest, &app_dir).await?;
//! ```

mod android;
mod blackberry;
mod ios;
mod registry;
mod www;

pub use android::AndroidPlatform;
pub use blackberry::BlackBerryPlatform;
pub use ios::IosPlatform;
pub use registry::PlatformRegistry;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::process::ProcessRunner;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// 要件チェックの結果（Err は利用者向けの詳細メッセージ）
pub type RequirementResult = std::result::Result<(), String>;

/// create スクリプトへの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInput {
    /// 生成先（`platforms/<target>`）
    pub output_dir: PathBuf,
    /// サニタイズ済みパッケージ識別子
    pub package_id: String,
    /// サニタイズ済み表示名
    pub name: String,
}

/// プラットフォームアダプタ trait
///
/// レジストリに1プラットフォームにつき1つ登録される。
pub trait Platform: Send + Sync {
    /// プラットフォーム識別子（"android", "ios", ...）
    fn name(&self) -> &'static str;

    /// 表示名
    fn display_name(&self) -> &'static str;

    /// ライブラリディレクトリ内のリポジトリ名（`<lib_dir>/<repo>/bin/create`）
    fn repo(&self) -> String {
        format!("cordova-{}", self.name())
    }

    /// 開発環境がこのプラットフォームのプロジェクトを作成できるか
    fn check_requirements<'a>(
        &'a self,
        runner: &'a dyn ProcessRunner,
    ) -> Pin<Box<dyn Future<Output = RequirementResult> + Send + 'a>>;

    /// create スクリプトの位置引数
    ///
    /// 引数の順序・個数はプラットフォームごとに異なる。
    fn generator_args(&self, input: &GeneratorInput) -> Vec<OsString>;

    /// 生成済みのサブプロジェクトを開く
    fn open_project(&self, platform_dir: &Path) -> Box<dyn PlatformProject>;
}

/// 生成済みサブプロジェクト
pub trait PlatformProject: Send + Sync {
    /// マニフェストからサブプロジェクトを構成する
    ///
    /// `app_dir` の共有アセットをプラットフォーム側の www にコピーし、
    /// ネイティブ設定ファイルへ識別子・表示名を反映する。
    fn update_project<'a>(
        &'a self,
        manifest: &'a Manifest,
        app_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

#[cfg(test)]
pub mod mock;
