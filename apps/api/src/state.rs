use std::sync::Arc;

use crate::assessment::judge::{CodeJudge, HeuristicCodeJudge};
use crate::store::TestStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store for tests and reports. Selected via STORE_BACKEND.
    pub store: Arc<dyn TestStore>,
    /// Pluggable coding-answer judge. Default: HeuristicCodeJudge.
    pub code_judge: Arc<dyn CodeJudge>,
}

impl AppState {
    pub fn new(store: Arc<dyn TestStore>) -> Self {
        Self {
            store,
            code_judge: Arc::new(HeuristicCodeJudge),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::store::InMemoryTestStore::new()))
    }
}
