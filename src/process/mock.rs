//! テスト用のスクリプト化ランナー

use super::*;
use std::sync::Mutex;

type Responder = dyn Fn(&Invocation) -> ProcessOutput + Send + Sync;

/// 起動内容を記録し、クロージャで結果を返すランナー
pub struct ScriptedRunner {
    responder: Box<Responder>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Invocation) -> ProcessOutput + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 常に成功するランナー
    pub fn succeeding() -> Self {
        Self::new(|_| ProcessOutput::success(""))
    }

    /// 記録済みの起動内容
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        _cwd: &'a Path,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>> {
        self.calls.lock().unwrap().push(invocation.clone());
        let output = (self.responder)(invocation);
        Box::pin(async move {
            // 兄弟タスクとの交互実行を起こす
            tokio::task::yield_now().await;
            output
        })
    }
}
