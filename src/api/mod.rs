pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use crate::repositories::{InMemoryPanelStore, InMemoryReadingStore, PanelStore, ReadingStore};
use crate::services::{AnalyticsService, PanelService};

pub use routes::create_router;

#[derive(Clone)]
pub struct AppState {
    pub panels: PanelService,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(panels: Arc<dyn PanelStore>, readings: Arc<dyn ReadingStore>) -> Self {
        Self {
            panels: PanelService::new(panels.clone()),
            analytics: AnalyticsService::new(panels, readings),
        }
    }

    /// State over empty process-local stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryPanelStore::new()),
            Arc::new(InMemoryReadingStore::new()),
        )
    }
}
