//! テスト用の記録フック

use super::*;
use std::sync::Mutex;

/// 発火したイベントを順に記録する
#[derive(Debug, Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<HookEvent>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みイベント
    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 指定イベントの発火回数
    pub fn count(&self, event: HookEvent) -> usize {
        self.events.lock().unwrap().iter().filter(|e| **e == event).count()
    }
}

impl HookNotifier for RecordingHooks {
    fn fire(&self, event: HookEvent) {
        self.events.lock().unwrap().push(event);
    }
}
