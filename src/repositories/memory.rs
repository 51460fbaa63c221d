use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{NewPanel, NewReading, Panel, Reading};
use crate::repositories::{PanelStore, ReadingStore};

/// Process-local panel registry backing the `memory` storage backend and tests.
#[derive(Default)]
pub struct InMemoryPanelStore {
    panels: RwLock<Vec<Panel>>,
    next_id: AtomicI64,
}

impl InMemoryPanelStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Panel>>> {
        self.panels
            .read()
            .map_err(|_| AppError::Internal("panel store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Panel>>> {
        self.panels
            .write()
            .map_err(|_| AppError::Internal("panel store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PanelStore for InMemoryPanelStore {
    async fn find_by_serial(&self, serial: &str) -> Result<Option<Panel>> {
        Ok(self
            .read()?
            .iter()
            .find(|p| p.matches_serial(serial))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Panel>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, panel: NewPanel) -> Result<Panel> {
        let mut panels = self.write()?;

        if panels.iter().any(|p| p.matches_serial(&panel.serial)) {
            return Err(AppError::Validation(format!(
                "panel with serial {} already registered",
                panel.serial
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let panel = panel.with_id(id);
        panels.push(panel.clone());

        Ok(panel)
    }

    async fn all(&self) -> Result<Vec<Panel>> {
        Ok(self.read()?.clone())
    }
}

/// Process-local append-only reading list.
#[derive(Default)]
pub struct InMemoryReadingStore {
    readings: RwLock<Vec<Reading>>,
    next_id: AtomicI64,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Reading>>> {
        self.readings
            .read()
            .map_err(|_| AppError::Internal("reading store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReadingStore for InMemoryReadingStore {
    async fn insert(&self, reading: NewReading) -> Result<Reading> {
        let mut readings = self
            .readings
            .write()
            .map_err(|_| AppError::Internal("reading store lock poisoned".to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let reading = reading.with_id(id);
        readings.push(reading.clone());

        Ok(reading)
    }

    async fn by_panel(&self, panel_id: i64) -> Result<Vec<Reading>> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.panel_id == panel_id)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Reading>> {
        Ok(self.read()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn new_panel(serial: &str) -> NewPanel {
        NewPanel {
            serial: serial.to_string(),
            brand: "Areva".to_string(),
            latitude: 12.345678,
            longitude: 98.7655432,
        }
    }

    #[tokio::test]
    async fn test_panel_ids_are_fresh() {
        let store = InMemoryPanelStore::new();
        let a = store.insert(new_panel("A")).await.unwrap();
        let b = store.insert(new_panel("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_find_by_serial_is_case_insensitive() {
        let store = InMemoryPanelStore::new();
        let panel = store.insert(new_panel("AAAA1111BBBB2222")).await.unwrap();

        let found = store.find_by_serial("aaaa1111BBBB2222").await.unwrap();
        assert_eq!(found, Some(panel.clone()));
        assert_eq!(store.find_by_id(panel.id).await.unwrap(), Some(panel));
        assert_eq!(store.find_by_serial("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_serial_rejected() {
        let store = InMemoryPanelStore::new();
        store.insert(new_panel("Serial1")).await.unwrap();

        let err = store.insert(new_panel("SERIAL1")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_readings_by_panel_keep_insertion_order() {
        let store = InMemoryReadingStore::new();
        let ts = Utc.with_ymd_and_hms(2018, 6, 10, 0, 51, 14).unwrap();

        for (panel_id, kw) in [(1, 3.0), (2, 7.0), (1, 5.0)] {
            store
                .insert(NewReading {
                    panel_id,
                    kilo_watt: kw,
                    timestamp: Some(ts),
                })
                .await
                .unwrap();
        }

        let mine: Vec<f64> = store
            .by_panel(1)
            .await
            .unwrap()
            .iter()
            .map(|r| r.kilo_watt)
            .collect();
        assert_eq!(mine, vec![3.0, 5.0]);
        assert_eq!(store.all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_stamped_now() {
        let store = InMemoryReadingStore::new();
        let before = Utc::now();

        let reading = store
            .insert(NewReading {
                panel_id: 1,
                kilo_watt: 1.5,
                timestamp: None,
            })
            .await
            .unwrap();

        assert!(reading.timestamp >= before);
        assert!(reading.timestamp <= Utc::now());
    }
}
