pub mod aggregation;
pub mod analytics;
pub mod panel;

pub use analytics::AnalyticsService;
pub use panel::PanelService;
