// src/repositories/sqlite/settings.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use crate::Error;
use crate::repositories::SettingsRepository;
use wroxbot_common::models::{SettingField, Settings};

#[derive(Clone)]
pub struct SqliteSettingsRepository {
    pool: Pool<Sqlite>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn get_settings(&self) -> Result<Settings, Error> {
        let row = sqlx::query(
            r#"
            SELECT banner_url, icon_url
            FROM settings
            WHERE id = ?
            "#,
        )
            .bind(Settings::ROW_ID)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Settings {
                banner_url: r.try_get("banner_url")?,
                icon_url: r.try_get("icon_url")?,
            })
        } else {
            Ok(Settings::default())
        }
    }

    async fn upsert_setting(&self, field: SettingField, value: &str) -> Result<(), Error> {
        // Only the named column is touched on conflict; the other one survives.
        let column = field.column();
        let sql = format!(
            r#"
            INSERT INTO settings (id, {column})
            VALUES (?, ?)
            ON CONFLICT (id)
            DO UPDATE SET {column} = excluded.{column}
            "#
        );

        sqlx::query(&sql)
            .bind(Settings::ROW_ID)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
