//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::services::JudgeService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Judging facade
    judge: JudgeService,
}

impl AppState {
    /// Create a new application state
    pub fn new(judge: JudgeService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { judge }),
        }
    }

    /// Get a reference to the judging service
    pub fn judge(&self) -> &JudgeService {
        &self.inner.judge
    }
}
