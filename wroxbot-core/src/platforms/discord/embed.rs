// File: wroxbot-core/src/platforms/discord/embed.rs

use tracing::warn;
use twilight_model::channel::message::Embed;
use twilight_model::id::marker::UserMarker;
use twilight_model::id::Id;
use twilight_model::util::{ImageHash, Timestamp};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource};

use crate::Error;
use wroxbot_common::models::DiscordEmbed;

/// Converts our embed model into twilight's. Image URLs Discord would reject
/// are dropped with a warning instead of failing the whole message.
pub fn to_twilight_embed(embed: &DiscordEmbed) -> Result<Embed, Error> {
    let mut builder = EmbedBuilder::new();

    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.color(color.0);
    }
    for field in &embed.fields {
        let mut fb = EmbedFieldBuilder::new(&field.name, &field.value);
        if field.inline {
            fb = fb.inline();
        }
        builder = builder.field(fb);
    }
    if let Some(footer) = &embed.footer {
        let mut fb = EmbedFooterBuilder::new(&footer.text);
        if let Some(icon) = footer.icon_url.as_deref().and_then(image_source) {
            fb = fb.icon_url(icon);
        }
        builder = builder.footer(fb);
    }
    if let Some(image) = embed.image.as_ref().and_then(|i| image_source(&i.url)) {
        builder = builder.image(image);
    }
    if let Some(thumbnail) = embed.thumbnail.as_ref().and_then(|t| image_source(&t.url)) {
        builder = builder.thumbnail(thumbnail);
    }
    if let Some(at) = embed.timestamp {
        let ts = Timestamp::from_secs(at.timestamp())
            .map_err(|e| Error::Platform(format!("Invalid embed timestamp: {e}")))?;
        builder = builder.timestamp(ts);
    }

    builder
        .validate()
        .map(|b| b.build())
        .map_err(|e| Error::Platform(format!("Invalid embed: {e}")))
}

pub fn to_twilight_embeds(embeds: &[DiscordEmbed]) -> Result<Vec<Embed>, Error> {
    embeds.iter().map(to_twilight_embed).collect()
}

fn image_source(url: &str) -> Option<ImageSource> {
    match ImageSource::url(url) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("Skipping embed image '{url}': {e}");
            None
        }
    }
}

/// CDN URL of a user's avatar, or of the default avatar when none is set.
pub fn avatar_url(user_id: Id<UserMarker>, avatar: Option<ImageHash>) -> String {
    match avatar {
        Some(hash) => {
            let ext = if hash.is_animated() { "gif" } else { "png" };
            format!("https://cdn.discordapp.com/avatars/{user_id}/{hash}.{ext}")
        }
        None => {
            let index = (user_id.get() >> 22) % 6;
            format!("https://cdn.discordapp.com/embed/avatars/{index}.png")
        }
    }
}
