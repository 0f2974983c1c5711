//! Application state shared across handlers

use std::sync::Arc;

use application::AdvisoryService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Advisory use cases
    pub advisory_service: Arc<AdvisoryService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(advisory_service: Arc<AdvisoryService>, config: Arc<AppConfig>) -> Self {
        Self {
            advisory_service,
            config,
        }
    }
}
