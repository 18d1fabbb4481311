//! 外部プロセスの実行
//!
//! create スクリプトやプラグインインストーラの呼び出しを抽象化する。
//! 終了コード 0 を成功とし、それ以外は標準出力・標準エラーを診断用テキストとして返す。

use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// 外部プロセスの実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// 終了コード（シグナル終了・起動失敗時は None）
    pub code: Option<i32>,
    /// 標準出力 + 標準エラー
    pub output: String,
}

impl ProcessOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failure(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            output: output.into(),
        }
    }
}

/// 1回分の起動内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 引数を文字列として取得（ログ・テスト用）
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// 外部プロセス実行 trait
pub trait ProcessRunner: Send + Sync {
    /// プロセスを起動し、終了まで待つ
    ///
    /// 起動自体に失敗した場合も `ProcessOutput::failure` を返し、
    /// 呼び出し側が自分のエラー種別に変換する。
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        cwd: &'a Path,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>>;
}

/// tokio::process による実装
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        cwd: &'a Path,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                program = %invocation.program.display(),
                args = ?invocation.args_lossy(),
                "spawning process"
            );
            let result = Command::new(&invocation.program)
                .args(&invocation.args)
                .current_dir(cwd)
                .stdin(Stdio::null())
                .output()
                .await;

            match result {
                Ok(output) => {
                    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                    text.push_str(&String::from_utf8_lossy(&output.stderr));
                    if output.status.success() {
                        ProcessOutput::success(text)
                    } else {
                        ProcessOutput::failure(output.status.code(), text)
                    }
                }
                Err(e) => ProcessOutput::failure(
                    None,
                    format!("failed to run {}: {}", invocation.program.display(), e),
                ),
            }
        })
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "process_test.rs"]
mod tests;
