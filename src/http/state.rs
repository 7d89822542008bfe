//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::duty::DutyCalculator;
use crate::services::suggestion::{HistorySuggester, SuggestionProvider};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Configured duty rotation calculator
    pub calculator: Arc<DutyCalculator>,
    /// Item detail suggestion provider
    pub suggester: Arc<dyn SuggestionProvider>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        calculator: Arc<DutyCalculator>,
        suggester: Arc<dyn SuggestionProvider>,
    ) -> Self {
        Self {
            repository,
            calculator,
            suggester,
        }
    }

    /// State with the default calculator and the history-backed suggester.
    pub fn with_defaults(repository: Arc<dyn FullRepository>) -> Self {
        Self::new(
            repository,
            Arc::new(DutyCalculator::default()),
            Arc::new(HistorySuggester::new()),
        )
    }
}
