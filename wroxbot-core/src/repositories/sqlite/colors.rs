// src/repositories/sqlite/colors.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use crate::Error;
use crate::repositories::ColorRepository;
use wroxbot_common::models::ColorEntry;

#[derive(Clone)]
pub struct SqliteColorRepository {
    pool: Pool<Sqlite>,
}

impl SqliteColorRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColorRepository for SqliteColorRepository {
    async fn list_colors(&self) -> Result<Vec<ColorEntry>, Error> {
        let rows = sqlx::query(r#"SELECT name, hex_color FROM colors ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(ColorEntry {
                name: row.try_get("name")?,
                hex_color: row.try_get("hex_color")?,
            });
        }
        Ok(out)
    }

    async fn insert_color(&self, entry: &ColorEntry) -> Result<(), Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO colors (name, hex_color)
            VALUES (?, ?)
            "#,
        )
            .bind(&entry.name)
            .bind(&entry.hex_color)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let is_unique = e
                    .as_database_error()
                    .map(|db_err| db_err.is_unique_violation())
                    .unwrap_or(false);
                if is_unique {
                    Err(Error::AlreadyExists(entry.name.clone()))
                } else {
                    Err(Error::Database(e))
                }
            }
        }
    }

    async fn insert_color_if_absent(&self, entry: &ColorEntry) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO colors (name, hex_color)
            VALUES (?, ?)
            "#,
        )
            .bind(&entry.name)
            .bind(&entry.hex_color)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
