use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::models::{AggregateListResponse, PostReadingRequest, ReadingListResponse};
use crate::error::{AppError, Result};
use crate::models::{NewReading, Reading};
use crate::repositories::{PanelStore, ReadingStore};
use crate::services::{aggregation, PanelService};

/// Reading ingestion and the analytics queries built on top of it.
#[derive(Clone)]
pub struct AnalyticsService {
    registry: PanelService,
    panels: Arc<dyn PanelStore>,
    readings: Arc<dyn ReadingStore>,
}

impl AnalyticsService {
    pub fn new(panels: Arc<dyn PanelStore>, readings: Arc<dyn ReadingStore>) -> Self {
        Self {
            registry: PanelService::new(panels.clone()),
            panels,
            readings,
        }
    }

    /// Every reading recorded for the panel with the given serial.
    pub async fn readings_for_panel(&self, serial: &str) -> Result<ReadingListResponse> {
        let panel = self.registry.resolve(serial).await?;
        let readings = self.readings.by_panel(panel.id).await?;

        Ok(ReadingListResponse {
            items: readings.into_iter().map(Into::into).collect(),
        })
    }

    /// Stores a reading for the panel with the given numeric id.
    ///
    /// The id and body are validated before any store is touched, so a
    /// malformed request is a validation error even when the panel is unknown.
    pub async fn record_reading(
        &self,
        panel_id: &str,
        request: PostReadingRequest,
    ) -> Result<Reading> {
        let panel_id = parse_panel_id(panel_id)?;
        let kilo_watt = validate_kilo_watt(request.kilo_watt)?;

        if self.panels.find_by_id(panel_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Panel {} not found", panel_id)));
        }

        let reading = self
            .readings
            .insert(NewReading {
                panel_id,
                kilo_watt,
                timestamp: request.timestamp,
            })
            .await?;

        tracing::info!(
            panel_id,
            reading_id = reading.id,
            kilo_watt = reading.kilo_watt,
            "reading recorded"
        );
        Ok(reading)
    }

    pub async fn historical_aggregates(&self) -> Result<AggregateListResponse> {
        self.historical_aggregates_at(Utc::now()).await
    }

    /// Aggregates of every day before the one containing `now`.
    pub async fn historical_aggregates_at(&self, now: DateTime<Utc>) -> Result<AggregateListResponse> {
        let panels = self.panels.all().await?;
        let readings = self.readings.all().await?;

        let cutoff = aggregation::start_of_day(now);
        let buckets = aggregation::historical_buckets(&panels, &readings, cutoff);

        tracing::debug!(
            panels = panels.len(),
            readings = readings.len(),
            buckets = buckets.len(),
            %cutoff,
            "historical aggregates computed"
        );

        Ok(AggregateListResponse {
            items: buckets.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn daily_breakdown(&self, serial: &str) -> Result<AggregateListResponse> {
        let panel = self.registry.resolve(serial).await?;
        let readings = self.readings.by_panel(panel.id).await?;

        Ok(AggregateListResponse {
            items: aggregation::daily_breakdown(&panel, &readings)
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}

fn parse_panel_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("panel id must be an integer, got {:?}", raw)))
}

fn validate_kilo_watt(kilo_watt: Option<f64>) -> Result<f64> {
    match kilo_watt {
        None => Err(AppError::Validation("kiloWatt is required".to_string())),
        Some(kw) if !kw.is_finite() || kw < 0.0 => Err(AppError::Validation(
            "kiloWatt must be a non-negative number".to_string(),
        )),
        Some(kw) => Ok(kw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPanel, Panel};
    use crate::repositories::{InMemoryPanelStore, InMemoryReadingStore};
    use chrono::{Duration, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    struct Fixture {
        service: AnalyticsService,
        panel: Panel,
        readings: Arc<InMemoryReadingStore>,
    }

    async fn fixture() -> Fixture {
        let panels = Arc::new(InMemoryPanelStore::new());
        let readings = Arc::new(InMemoryReadingStore::new());
        let panel = panels
            .insert(NewPanel {
                serial: "AAAA1111BBBB2222".into(),
                brand: "Areva".into(),
                latitude: 12.345678,
                longitude: 98.7655432,
            })
            .await
            .unwrap();

        Fixture {
            service: AnalyticsService::new(panels, readings.clone()),
            panel,
            readings,
        }
    }

    fn post(kilo_watt: Option<f64>, timestamp: Option<DateTime<Utc>>) -> PostReadingRequest {
        PostReadingRequest {
            kilo_watt,
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_record_then_list() {
        let f = fixture().await;
        let ts = Utc.with_ymd_and_hms(2018, 6, 10, 0, 51, 14).unwrap();
        let id = f.panel.id.to_string();

        let a = f.service.record_reading(&id, post(Some(124.0), Some(ts))).await.unwrap();
        let b = f.service.record_reading(&id, post(Some(5464.0), None)).await.unwrap();

        let list = f.service.readings_for_panel("aaaa1111bbbb2222").await.unwrap();
        let ids: Vec<i64> = list.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(list.items[0].kilo_watt, 124.0);
        assert_eq!(list.items[0].timestamp, ts);
    }

    #[tokio::test]
    async fn test_record_for_unknown_panel_is_not_found() {
        let f = fixture().await;

        let err = f.service.record_reading("9999", post(Some(1.0), None)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(f.readings.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_with_non_numeric_id_is_validation() {
        let f = fixture().await;

        let err = f.service.record_reading("abc", post(Some(1.0), None)).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_rejects_missing_or_negative_kilo_watt() {
        let f = fixture().await;
        let id = f.panel.id.to_string();

        for kw in [None, Some(-1.0), Some(f64::NAN)] {
            let err = f.service.record_reading(&id, post(kw, None)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{:?}", kw);
        }
        assert!(f.readings.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_serial_matches_registry_error() {
        let f = fixture().await;

        let err = f.service.readings_for_panel("missing").await.unwrap_err();
        let registry_err = f.service.registry.resolve("missing").await.unwrap_err();

        match (err, registry_err) {
            (AppError::NotFound(a), AppError::NotFound(b)) => assert_eq!(a, b),
            other => panic!("expected two NotFound errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_historical_excludes_today() {
        let f = fixture().await;
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 13, 30, 0).unwrap();
        let id = f.panel.id.to_string();

        f.service
            .record_reading(&id, post(Some(10.0), Some(now - Duration::days(1))))
            .await
            .unwrap();
        f.service.record_reading(&id, post(Some(3.0), Some(now))).await.unwrap();

        let result = f.service.historical_aggregates_at(now).await.unwrap();

        assert_eq!(result.items.len(), 1);
        let bucket = &result.items[0];
        assert_eq!(bucket.panel_id, f.panel.id);
        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(
            (bucket.sum, bucket.average, bucket.min, bucket.max),
            (10.0, 10.0, 10.0, 10.0)
        );
    }

    #[tokio::test]
    async fn test_historical_with_no_readings_is_empty() {
        let f = fixture().await;
        let result = f.service.historical_aggregates().await.unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_daily_breakdown_resolves_panel_first() {
        let f = fixture().await;

        let ok = f.service.daily_breakdown("AAAA1111BBBB2222").await.unwrap();
        assert!(ok.items.is_empty());

        let err = f.service.daily_breakdown("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
