use chrono::{DateTime, Utc};

/// RGB color of an embed's side bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscordColor(pub u32);

impl DiscordColor {
    pub const RED: DiscordColor = DiscordColor(0xE74C3C);
    pub const GREEN: DiscordColor = DiscordColor(0x2ECC71);
    pub const BLUE: DiscordColor = DiscordColor(0x3498DB);
    pub const GOLD: DiscordColor = DiscordColor(0xF1C40F);
    pub const ORANGE: DiscordColor = DiscordColor(0xE67E22);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEmbedImage {
    pub url: String,
}

/// Platform-neutral embed; converted to a twilight `Embed` right before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<DiscordColor>,
    pub timestamp: Option<DateTime<Utc>>,
    pub footer: Option<DiscordEmbedFooter>,
    pub thumbnail: Option<DiscordEmbedThumbnail>,
    pub image: Option<DiscordEmbedImage>,
    pub fields: Vec<DiscordEmbedField>,
}

impl DiscordEmbed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>, description: impl Into<String>, color: DiscordColor) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(DiscordEmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }
}
