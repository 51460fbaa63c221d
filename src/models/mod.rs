pub mod aggregate;
pub mod panel;
pub mod reading;

pub use aggregate::AggregateBucket;
pub use panel::{NewPanel, Panel};
pub use reading::{NewReading, Reading};
