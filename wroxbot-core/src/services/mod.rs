pub mod command_dispatcher;
pub mod config_store;
pub mod discord;

pub use command_dispatcher::{CommandDispatcher, DispatchOutcome, RawArgs};
pub use config_store::ConfigStore;
