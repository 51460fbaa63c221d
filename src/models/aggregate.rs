use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of every reading of one panel on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub panel_id: i64,
    pub date: NaiveDate,
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}
