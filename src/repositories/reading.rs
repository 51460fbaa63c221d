use async_trait::async_trait;
use chrono::Utc;

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{NewReading, Reading};
use crate::repositories::ReadingStore;

#[derive(Clone)]
pub struct ReadingRepository {
    pool: DbPool,
}

impl ReadingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for ReadingRepository {
    async fn insert(&self, reading: NewReading) -> Result<Reading> {
        let timestamp = reading.timestamp.unwrap_or_else(Utc::now);

        let reading = sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO readings (panel_id, kilo_watt, ts)
            VALUES ($1, $2, $3)
            RETURNING id, panel_id, kilo_watt, ts
            "#,
        )
        .bind(reading.panel_id)
        .bind(reading.kilo_watt)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn by_panel(&self, panel_id: i64) -> Result<Vec<Reading>> {
        let readings = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, panel_id, kilo_watt, ts
            FROM readings
            WHERE panel_id = $1
            ORDER BY id
            "#,
        )
        .bind(panel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }

    async fn all(&self) -> Result<Vec<Reading>> {
        let readings = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, panel_id, kilo_watt, ts
            FROM readings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }
}
