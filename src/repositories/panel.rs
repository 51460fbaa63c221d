use async_trait::async_trait;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{NewPanel, Panel};
use crate::repositories::PanelStore;

#[derive(Clone)]
pub struct PanelRepository {
    pool: DbPool,
}

impl PanelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PanelStore for PanelRepository {
    async fn find_by_serial(&self, serial: &str) -> Result<Option<Panel>> {
        let panel = sqlx::query_as::<_, Panel>(
            r#"
            SELECT id, serial, brand, latitude, longitude
            FROM panels
            WHERE LOWER(serial) = LOWER($1)
            "#,
        )
        .bind(serial)
        .fetch_optional(&self.pool)
        .await?;

        Ok(panel)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Panel>> {
        let panel = sqlx::query_as::<_, Panel>(
            r#"
            SELECT id, serial, brand, latitude, longitude
            FROM panels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(panel)
    }

    async fn insert(&self, panel: NewPanel) -> Result<Panel> {
        let result = sqlx::query_as::<_, Panel>(
            r#"
            INSERT INTO panels (serial, brand, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            RETURNING id, serial, brand, latitude, longitude
            "#,
        )
        .bind(&panel.serial)
        .bind(&panel.brand)
        .bind(panel.latitude)
        .bind(panel.longitude)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(panel) => Ok(panel),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Validation(format!("panel with serial {} already registered", panel.serial)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn all(&self) -> Result<Vec<Panel>> {
        let panels = sqlx::query_as::<_, Panel>(
            r#"
            SELECT id, serial, brand, latitude, longitude
            FROM panels
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(panels)
    }
}
