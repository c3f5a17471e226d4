// wroxbot-core/src/db/mod.rs

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

use crate::Error;

/// Handle to the SQLite database backing the config store.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Opens (creating if missing) the database file at `path`.
    /// `":memory:"` gives a private in-memory database on a single connection.
    pub async fn new(path: &str) -> Result<Self, Error> {
        if path == ":memory:" {
            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await?;
            return Ok(Self { pool });
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                warn!("Folder {} not found. Creating it...", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }
        if !Path::new(path).exists() {
            info!("Database file {} not found. Creating a new database...", path);
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite at {}", path);
        Ok(Self { pool })
    }

    /// Applies the embedded migrations. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), Error> {
        info!("Applying migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations applied successfully.");
        Ok(())
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}
