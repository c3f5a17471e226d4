pub mod color;
pub mod discord;
pub mod reply;
pub mod settings;

pub use color::{ColorEntry, ColorMap, HexColor, DEFAULT_COLORS};
pub use discord::{
    DiscordColor, DiscordEmbed, DiscordEmbedField, DiscordEmbedFooter, DiscordEmbedImage,
    DiscordEmbedThumbnail,
};
pub use reply::{MessageHandle, Reply, Visibility};
pub use settings::{SettingField, Settings};
