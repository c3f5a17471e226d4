//! Durable bot configuration (banner, icon, color palette) with an in-memory
//! snapshot that command handlers read from.
//!
//! Every mutation holds the snapshot's write lock across the durable write and
//! the cache update, so a concurrent reader sees either the state before the
//! write or the state after it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::Error;
use crate::db::Database;
use crate::repositories::{
    ColorRepository, SettingsRepository, SqliteColorRepository, SqliteSettingsRepository,
};
use wroxbot_common::models::{ColorEntry, ColorMap, DEFAULT_COLORS, HexColor, SettingField, Settings};

#[derive(Debug, Clone, Default)]
struct ConfigSnapshot {
    settings: Settings,
    colors: ColorMap,
}

pub struct ConfigStore {
    settings_repo: Arc<dyn SettingsRepository + Send + Sync>,
    color_repo: Arc<dyn ColorRepository + Send + Sync>,
    snapshot: RwLock<ConfigSnapshot>,
}

impl ConfigStore {
    /// Builds a store with an empty snapshot. Call `load_all` before serving commands.
    pub fn new(
        settings_repo: Arc<dyn SettingsRepository + Send + Sync>,
        color_repo: Arc<dyn ColorRepository + Send + Sync>,
    ) -> Self {
        Self {
            settings_repo,
            color_repo,
            snapshot: RwLock::new(ConfigSnapshot::default()),
        }
    }

    /// Ensures the schema exists. Idempotent.
    pub async fn init(db: &Database) -> Result<(), Error> {
        db.migrate().await
    }

    /// init + seed + load against the SQLite repositories. Used at startup.
    pub async fn open(db: &Database) -> Result<Self, Error> {
        Self::init(db).await?;

        let store = Self::new(
            Arc::new(SqliteSettingsRepository::new(db.pool().clone())),
            Arc::new(SqliteColorRepository::new(db.pool().clone())),
        );
        store.seed_defaults().await?;
        let (_, colors) = store.load_all().await?;
        info!("Configuration loaded: {} colors in palette.", colors.len());
        Ok(store)
    }

    /// Inserts the default palette with ignore-on-conflict semantics.
    /// Returns how many rows were actually written.
    pub async fn seed_defaults(&self) -> Result<usize, Error> {
        let mut inserted = 0;
        for (name, hex) in DEFAULT_COLORS {
            let entry = ColorEntry {
                name: name.to_string(),
                hex_color: hex.to_string(),
            };
            if self.color_repo.insert_color_if_absent(&entry).await? {
                inserted += 1;
            }
        }
        debug!("seed_defaults: inserted {} of {} default colors", inserted, DEFAULT_COLORS.len());
        Ok(inserted)
    }

    /// Reads everything from storage and replaces the in-memory snapshot.
    pub async fn load_all(&self) -> Result<(Settings, ColorMap), Error> {
        let mut guard = self.snapshot.write().await;
        let settings = self.settings_repo.get_settings().await?;
        let colors = ColorMap::from_entries(self.color_repo.list_colors().await?);

        guard.settings = settings.clone();
        guard.colors = colors.clone();
        Ok((settings, colors))
    }

    pub async fn settings(&self) -> Settings {
        self.snapshot.read().await.settings.clone()
    }

    pub async fn color_map(&self) -> ColorMap {
        self.snapshot.read().await.colors.clone()
    }

    pub async fn lookup_color(&self, name: &str) -> Option<String> {
        self.snapshot.read().await.colors.get(name).map(str::to_string)
    }

    /// Persists one settings field, then mirrors it into the snapshot.
    pub async fn upsert_setting(&self, field: SettingField, value: &str) -> Result<Settings, Error> {
        let mut guard = self.snapshot.write().await;
        self.settings_repo.upsert_setting(field, value).await?;
        guard.settings.set(field, value.to_string());
        info!("Setting '{}' updated.", field);
        Ok(guard.settings.clone())
    }

    /// Adds a palette color. The in-memory map is the uniqueness authority:
    /// a name already present (case-insensitively) is rejected before storage is touched.
    pub async fn add_color(&self, name: &str, hex: &HexColor) -> Result<(), Error> {
        let mut guard = self.snapshot.write().await;
        if guard.colors.contains(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let entry = ColorEntry {
            name: name.to_string(),
            hex_color: hex.as_str().to_string(),
        };
        self.color_repo.insert_color(&entry).await?;
        guard.colors.insert(name, hex.as_str());
        info!("Color '{}' ({}) added to palette.", name, hex);
        Ok(())
    }
}
