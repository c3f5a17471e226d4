// src/repositories/mod.rs

pub use wroxbot_common::traits::repository_traits::{ColorRepository, SettingsRepository};

pub use sqlite::colors::SqliteColorRepository;
pub use sqlite::settings::SqliteSettingsRepository;

pub mod sqlite;
