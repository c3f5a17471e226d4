//! wroxbot-server/src/context.rs
//!
//! Everything the running bot shares: the database, the config store and the
//! command registry.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use wroxbot_core::Error;
use wroxbot_core::db::Database;
use wroxbot_core::platforms::discord::runtime::BotMetadata;
use wroxbot_core::services::command_dispatcher::CommandDispatcher;
use wroxbot_core::services::config_store::ConfigStore;
use wroxbot_core::services::discord::slashcommands::builtin_dispatcher;

use crate::{Args, BOT_DEVELOPER, BOT_VERSION};

pub struct ServerContext {
    pub db: Database,
    pub store: Arc<ConfigStore>,
    pub dispatcher: Arc<CommandDispatcher>,
    pub metadata: BotMetadata,
}

impl ServerContext {
    /// Opens the database, seeds and loads the configuration, and registers
    /// the built-in commands.
    pub async fn new(args: &Args) -> Result<Self, Error> {
        info!("Using SQLite database at {}", args.db_path);
        let db = Database::new(&args.db_path).await?;
        let store = Arc::new(ConfigStore::open(&db).await?);
        let dispatcher = Arc::new(builtin_dispatcher());
        info!("{} slash commands ready.", dispatcher.specs().len());

        Ok(Self {
            db,
            store,
            dispatcher,
            metadata: BotMetadata {
                version: BOT_VERSION.to_string(),
                developer: BOT_DEVELOPER.to_string(),
                started_at: Utc::now(),
            },
        })
    }
}
