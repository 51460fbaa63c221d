pub mod memory;
pub mod panel;
pub mod reading;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewPanel, NewReading, Panel, Reading};

pub use memory::{InMemoryPanelStore, InMemoryReadingStore};
pub use panel::PanelRepository;
pub use reading::ReadingRepository;

/// Owns panel identity.
#[async_trait]
pub trait PanelStore: Send + Sync {
    /// Case-insensitive exact match on the serial.
    async fn find_by_serial(&self, serial: &str) -> Result<Option<Panel>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Panel>>;

    /// Assigns a fresh identifier. A serial that is already registered
    /// (ignoring case) is rejected with `AppError::Validation`.
    async fn insert(&self, panel: NewPanel) -> Result<Panel>;

    async fn all(&self) -> Result<Vec<Panel>>;
}

/// Append-only collection of readings keyed by panel id. It does not check
/// that the panel exists; callers do that before inserting.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn insert(&self, reading: NewReading) -> Result<Reading>;

    /// Readings of one panel in insertion order.
    async fn by_panel(&self, panel_id: i64) -> Result<Vec<Reading>>;

    async fn all(&self) -> Result<Vec<Reading>>;
}
