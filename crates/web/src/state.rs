use std::sync::Arc;

use roster::{RosterSource, WeeklyRefresh};
use storage::services::LockEngine;

/// Shared handler state: the roster source and the lock engine, wired into
/// the weekly refresh pipeline.
#[derive(Clone)]
pub struct AppState {
    pub refresh: WeeklyRefresh,
}

impl AppState {
    pub fn new(source: Arc<dyn RosterSource>, engine: LockEngine) -> Self {
        Self {
            refresh: WeeklyRefresh::new(source, engine),
        }
    }

    pub fn source(&self) -> &Arc<dyn RosterSource> {
        self.refresh.source()
    }

    pub fn engine(&self) -> &LockEngine {
        self.refresh.engine()
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
