use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One hour of electricity produced by a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reading {
    pub id: i64,
    pub panel_id: i64,
    pub kilo_watt: f64,
    #[sqlx(rename = "ts")]
    pub timestamp: DateTime<Utc>,
}

/// A reading accepted by the façade but not yet stored. A missing
/// timestamp is stamped by the store at insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub panel_id: i64,
    pub kilo_watt: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewReading {
    pub fn with_id(self, id: i64) -> Reading {
        Reading {
            id,
            panel_id: self.panel_id,
            kilo_watt: self.kilo_watt,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }
}
