use std::sync::Arc;

use crate::api::models::RegisterPanelRequest;
use crate::error::{AppError, Result};
use crate::models::{NewPanel, Panel};
use crate::repositories::PanelStore;

#[derive(Clone)]
pub struct PanelService {
    panels: Arc<dyn PanelStore>,
}

impl PanelService {
    pub fn new(panels: Arc<dyn PanelStore>) -> Self {
        Self { panels }
    }

    pub async fn register(&self, request: RegisterPanelRequest) -> Result<Panel> {
        let new_panel = self.validate_registration(request)?;
        let panel = self.panels.insert(new_panel).await?;

        tracing::info!(panel_id = panel.id, serial = %panel.serial, "panel registered");
        Ok(panel)
    }

    /// Looks a panel up by serial, ignoring case.
    pub async fn resolve(&self, serial: &str) -> Result<Panel> {
        self.panels
            .find_by_serial(serial)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Panel {} not found", serial)))
    }

    fn validate_registration(&self, request: RegisterPanelRequest) -> Result<NewPanel> {
        let serial = request
            .serial
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("serial is required".to_string()))?;

        Ok(NewPanel {
            serial,
            brand: request.brand.unwrap_or_default(),
            latitude: request.latitude.unwrap_or_default(),
            longitude: request.longitude.unwrap_or_default(),
        })
    }
}
