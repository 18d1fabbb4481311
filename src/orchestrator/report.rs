//! add 操作の結果
//!
//! ターゲットごとのタスクは完了順に報告されるが、結果は要求された順序
//! （Target List の順）で保持する。

use crate::error::PlatformError;

/// 追加に成功したプラットフォーム（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedPlatform {
    index: usize,
    target: String,
    plugins: Vec<String>,
}

impl AddedPlatform {
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 再インストールしたプラグイン
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }
}

/// 失敗したプラットフォーム
#[derive(Debug)]
pub struct TargetFailure {
    index: usize,
    target: String,
    error: PlatformError,
}

impl TargetFailure {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn error(&self) -> &PlatformError {
        &self.error
    }
}

/// add の集計結果
#[derive(Debug, Default)]
pub struct AddReport {
    added: Vec<AddedPlatform>,
    failures: Vec<TargetFailure>,
    aborted: Option<PlatformError>,
}

impl AddReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功を記録
    pub fn record_success(&mut self, index: usize, target: &str, plugins: Vec<String>) {
        self.added.push(AddedPlatform {
            index,
            target: target.to_string(),
            plugins,
        });
    }

    /// ターゲット単位の失敗を記録
    pub fn record_failure(&mut self, index: usize, target: &str, error: PlatformError) {
        self.failures.push(TargetFailure {
            index,
            target: target.to_string(),
            error,
        });
    }

    /// 以降のディスパッチを打ち切った失敗を記録
    pub fn abort(&mut self, error: PlatformError) {
        self.aborted = Some(error);
    }

    /// 要求順に並べ直す
    pub fn finish(mut self) -> Self {
        self.added.sort_by_key(|a| a.index);
        self.failures.sort_by_key(|f| f.index);
        self
    }

    pub fn added(&self) -> &[AddedPlatform] {
        &self.added
    }

    /// 追加に成功したプラットフォーム名
    pub fn added_targets(&self) -> Vec<&str> {
        self.added.iter().map(|a| a.target()).collect()
    }

    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }

    pub fn aborted(&self) -> Option<&PlatformError> {
        self.aborted.as_ref()
    }

    /// エラーがあるか
    pub fn has_errors(&self) -> bool {
        self.aborted.is_some() || !self.failures.is_empty()
    }

    /// 代表エラーを取り出す
    ///
    /// 打ち切りエラーを優先し、次に要求順で最初の失敗を返す。
    pub fn take_error(&mut self) -> Option<PlatformError> {
        if let Some(error) = self.aborted.take() {
            return Some(error);
        }
        let first = self
            .failures
            .iter()
            .enumerate()
            .min_by_key(|(_, f)| f.index)
            .map(|(pos, _)| pos)?;
        Some(self.failures.remove(first).error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator_failed(target: &str) -> PlatformError {
        PlatformError::GeneratorFailed {
            target: target.to_string(),
            output: "exit 1".to_string(),
        }
    }

    #[test]
    fn test_empty_report_is_success() {
        let mut report = AddReport::new().finish();
        assert!(!report.has_errors());
        assert!(report.take_error().is_none());
    }

    #[test]
    fn test_finish_orders_by_request() {
        let mut report = AddReport::new();
        report.record_success(2, "ios", vec![]);
        report.record_success(0, "android", vec!["camera".to_string()]);
        let report = report.finish();

        assert_eq!(report.added_targets(), vec!["android", "ios"]);
        assert_eq!(report.added()[0].plugins().to_vec(), vec!["camera".to_string()]);
    }

    #[test]
    fn test_first_failure_in_request_order_wins() {
        let mut report = AddReport::new();
        report.record_success(0, "android", vec![]);
        report.record_failure(2, "blackberry", generator_failed("blackberry"));
        report.record_failure(1, "ios", generator_failed("ios"));

        assert!(report.has_errors());
        let err = report.take_error().unwrap();
        assert_eq!(err.target(), Some("ios"));
        let next = report.take_error().unwrap();
        assert_eq!(next.target(), Some("blackberry"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_abort_takes_precedence() {
        let mut report = AddReport::new();
        report.record_failure(0, "android", generator_failed("android"));
        report.abort(PlatformError::PlatformAlreadyExists("ios".to_string()));

        let err = report.take_error().unwrap();
        assert!(matches!(err, PlatformError::PlatformAlreadyExists(t) if t == "ios"));
        assert_eq!(report.failures().len(), 1);
    }

    #[test]
    fn test_duplicate_targets_are_kept() {
        let mut report = AddReport::new();
        report.record_success(1, "android", vec![]);
        report.record_success(0, "android", vec![]);

        assert_eq!(report.finish().added_targets(), vec!["android", "android"]);
    }
}
