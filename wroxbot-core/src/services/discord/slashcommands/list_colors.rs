// File: wroxbot-core/src/services/discord/slashcommands/list_colors.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    CommandContext, CommandOutcome, CommandSpec, SlashCommand, ValidatedArgs,
};
use wroxbot_common::models::{ColorMap, DiscordColor, DiscordEmbed, Reply, Visibility};

pub static LIST_COLORS_SPEC: CommandSpec = CommandSpec {
    name: "list-colors",
    description: "🛠️ View all available colors.",
    usage: "/list-colors",
    params: &[],
};

/// Discord caps an embed at 25 fields and a message at 10 embeds.
const FIELDS_PER_EMBED: usize = 25;
const MAX_EMBEDS: usize = 10;

pub struct ListColorsCommand;

#[async_trait]
impl SlashCommand for ListColorsCommand {
    fn spec(&self) -> &'static CommandSpec {
        &LIST_COLORS_SPEC
    }

    async fn execute(
        &self,
        _args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let palette = ctx.store.color_map().await;
        Ok(CommandOutcome::Reply(render_palette(&palette)))
    }
}

pub fn render_palette(palette: &ColorMap) -> Reply {
    let entries: Vec<(&str, &str)> = palette.iter().collect();
    let mut embeds = Vec::new();

    for (page, chunk) in entries.chunks(FIELDS_PER_EMBED).take(MAX_EMBEDS).enumerate() {
        let mut embed = DiscordEmbed::new();
        embed.color = Some(DiscordColor::BLUE);
        if page == 0 {
            embed.title = Some("🎨 Available Colors".to_string());
        }
        for (name, hex) in chunk {
            embed.field(format!("🖌️ {}", capitalize(name)), *hex, true);
        }
        embeds.push(embed);
    }

    if embeds.is_empty() {
        embeds.push(DiscordEmbed::titled(
            "🎨 Available Colors",
            "The palette is empty.",
            DiscordColor::BLUE,
        ));
    }

    let shown = FIELDS_PER_EMBED * MAX_EMBEDS;
    let content = (entries.len() > shown)
        .then(|| format!("Showing the first {shown} of {} colors.", entries.len()));

    Reply {
        content,
        embeds,
        visibility: Visibility::Private,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
