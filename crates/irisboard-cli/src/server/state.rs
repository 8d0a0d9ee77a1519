//! Application state for the web server.

use std::sync::Arc;

use irisboard::{DataTable, ReportRenderer};

/// Shared application state.
///
/// The dataset is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// The cleaned dataset.
    pub table: Arc<DataTable>,
    /// Page renderer.
    pub renderer: Arc<ReportRenderer>,
}

impl AppState {
    /// Create new application state.
    pub fn new(table: DataTable) -> Self {
        Self {
            table: Arc::new(table),
            renderer: Arc::new(ReportRenderer::new()),
        }
    }
}
