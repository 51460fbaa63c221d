use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AggregateBucket, Reading};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReadingRequest {
    pub kilo_watt: Option<f64>,
    #[serde(default, alias = "dateTime")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingItem {
    pub id: i64,
    pub kilo_watt: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<Reading> for ReadingItem {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            kilo_watt: reading.kilo_watt,
            timestamp: reading.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingListResponse {
    pub items: Vec<ReadingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingCreatedResponse {
    pub id: i64,
    pub panel_id: i64,
    pub kilo_watt: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<Reading> for ReadingCreatedResponse {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            panel_id: reading.panel_id,
            kilo_watt: reading.kilo_watt,
            timestamp: reading.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateItem {
    pub panel_id: i64,
    pub date: NaiveDate,
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl From<AggregateBucket> for AggregateItem {
    fn from(bucket: AggregateBucket) -> Self {
        Self {
            panel_id: bucket.panel_id,
            date: bucket.date,
            sum: bucket.sum,
            average: bucket.average,
            min: bucket.min,
            max: bucket.max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateListResponse {
    pub items: Vec<AggregateItem>,
}
