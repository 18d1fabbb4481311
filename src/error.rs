pub mod code;
pub mod formatter;

pub use code::ErrorCode;
pub use formatter::ErrorFormatter;

use std::path::PathBuf;
use thiserror::Error;

/// PFM統一エラー型
///
/// 呼び出し側がメッセージ文字列ではなくエラー種別で分岐できるよう、
/// 失敗の種類ごとにバリアントを分けている。
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Current working directory is not a platform project: {}", .0.display())]
    NotAProject(PathBuf),

    #[error("Platform \"{0}\" already exists")]
    PlatformAlreadyExists(String),

    #[error("Your system does not meet the requirements to create {target} projects: {detail}")]
    UnmetRequirements { target: String, detail: String },

    #[error("An error occurred during creation of {target} sub-project. {output}")]
    GeneratorFailed { target: String, output: String },

    #[error("An error occurred while installing the {plugin} plugin into {target}: {output}")]
    PluginReinstallFailed {
        plugin: String,
        target: String,
        output: String,
    },

    #[error("Unrecognized command \"{0}\". Use either `add`, `remove`, or `list`.")]
    UnknownCommand(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Invalid platform name: \"{0}\"")]
    InvalidTargetName(String),

    #[error("No platforms specified for `{0}`")]
    NoTargets(String),

    #[error("Invalid manifest {}: {detail}", .path.display())]
    InvalidManifest { path: PathBuf, detail: String },

    #[error("Failed to update {target} project: {detail}")]
    ProjectUpdate { target: String, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error while adding {target}: {source}")]
    TargetIo {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Platform task for {target} did not finish: {detail}")]
    Task { target: String, detail: String },
}

pub type Result<T> = std::result::Result<T, PlatformError>;

impl PlatformError {
    /// エラーコードを取得
    pub fn code(&self) -> ErrorCode {
        match self {
            PlatformError::NotAProject(_) => ErrorCode::Prj001,
            PlatformError::InvalidManifest { .. } => ErrorCode::Prj002,
            PlatformError::PlatformAlreadyExists(_) => ErrorCode::Plt001,
            PlatformError::UnmetRequirements { .. } => ErrorCode::Plt002,
            PlatformError::UnknownPlatform(_) => ErrorCode::Plt003,
            PlatformError::ProjectUpdate { .. } => ErrorCode::Plt004,
            PlatformError::GeneratorFailed { .. } => ErrorCode::Prc001,
            PlatformError::PluginReinstallFailed { .. } => ErrorCode::Prc002,
            PlatformError::UnknownCommand(_) => ErrorCode::Val001,
            PlatformError::InvalidTargetName(_) => ErrorCode::Val002,
            PlatformError::NoTargets(_) => ErrorCode::Val003,
            PlatformError::Config(_) => ErrorCode::Cfg001,
            PlatformError::Io(e) | PlatformError::TargetIo { source: e, .. } => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::Io001,
                std::io::ErrorKind::PermissionDenied => ErrorCode::Io002,
                _ => ErrorCode::Io003,
            },
            PlatformError::Task { .. } => ErrorCode::Int001,
        }
    }

    /// 失敗に関係するプラットフォーム名（あれば）
    pub fn target(&self) -> Option<&str> {
        match self {
            PlatformError::PlatformAlreadyExists(target)
            | PlatformError::UnknownPlatform(target)
            | PlatformError::InvalidTargetName(target) => Some(target),
            PlatformError::UnmetRequirements { target, .. }
            | PlatformError::GeneratorFailed { target, .. }
            | PlatformError::PluginReinstallFailed { target, .. }
            | PlatformError::ProjectUpdate { target, .. }
            | PlatformError::TargetIo { target, .. }
            | PlatformError::Task { target, .. } => Some(target),
            _ => None,
        }
    }

    /// ターゲット名を持たない I/O エラーにターゲットを付与
    pub fn with_target(self, target: &str) -> Self {
        match self {
            PlatformError::Io(source) => PlatformError::TargetIo {
                target: target.to_string(),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
