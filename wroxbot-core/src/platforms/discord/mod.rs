pub mod embed;
pub mod runtime;
pub mod transport;

pub use runtime::DiscordRuntime;
pub use transport::DiscordInteractionTransport;
