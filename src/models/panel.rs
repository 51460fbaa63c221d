use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered solar panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Panel {
    pub id: i64,
    pub serial: String,
    pub brand: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated panel waiting for an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPanel {
    pub serial: String,
    pub brand: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewPanel {
    pub fn with_id(self, id: i64) -> Panel {
        Panel {
            id,
            serial: self.serial,
            brand: self.brand,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl Panel {
    /// Serial lookups ignore case.
    pub fn matches_serial(&self, serial: &str) -> bool {
        self.serial.to_lowercase() == serial.to_lowercase()
    }
}
