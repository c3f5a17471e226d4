use async_trait::async_trait;

use crate::error::Error;
use crate::models::{ColorEntry, SettingField, Settings};

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns an empty `Settings` if the row was never written.
    async fn get_settings(&self) -> Result<Settings, Error>;

    /// Writes one column of the singleton row, creating the row if needed.
    async fn upsert_setting(&self, field: SettingField, value: &str) -> Result<(), Error>;
}

#[async_trait]
pub trait ColorRepository: Send + Sync {
    async fn list_colors(&self) -> Result<Vec<ColorEntry>, Error>;

    /// Plain insert; a duplicate name surfaces as `Error::AlreadyExists`.
    async fn insert_color(&self, entry: &ColorEntry) -> Result<(), Error>;

    /// Ignore-on-conflict insert. Returns true if a row was written.
    async fn insert_color_if_absent(&self, entry: &ColorEntry) -> Result<bool, Error>;
}
