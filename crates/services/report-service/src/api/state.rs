//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::ReportService;

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Report service
    pub report_service: Arc<dyn ReportService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Create new application state with injected services.
    pub fn new(report_service: Arc<dyn ReportService>, database: Arc<Database>) -> Self {
        Self {
            report_service,
            database,
        }
    }
}
