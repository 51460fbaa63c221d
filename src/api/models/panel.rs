use serde::{Deserialize, Serialize};

use crate::models::Panel;

/// Body of `POST /api/v1/panels`. Only `serial` is required; it is checked
/// by the panel service so a missing serial is reported like any other
/// validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPanelRequest {
    pub serial: Option<String>,
    pub brand: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelResponse {
    pub id: i64,
    pub serial: String,
    pub brand: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Panel> for PanelResponse {
    fn from(panel: Panel) -> Self {
        Self {
            id: panel.id,
            serial: panel.serial,
            brand: panel.brand,
            latitude: panel.latitude,
            longitude: panel.longitude,
        }
    }
}
