// File: wroxbot-core/src/services/discord/slashcommands/announce.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    resolve_color, CommandContext, CommandOutcome, CommandSpec, ParamSpec, SlashCommand,
    ValidatedArgs,
};
use wroxbot_common::models::{
    DiscordColor, DiscordEmbed, DiscordEmbedFooter, DiscordEmbedImage, DiscordEmbedThumbnail, Reply,
};

pub static ANNOUNCE_SPEC: CommandSpec = CommandSpec {
    name: "announce",
    description: "📢 Create an announcement.",
    usage: "/announce <title> <description> [color]",
    params: &[
        ParamSpec { name: "title", description: "📋 Title of the announcement.", required: true },
        ParamSpec { name: "description", description: "📝 Description of the announcement.", required: true },
        ParamSpec { name: "color", description: "🎨 Optional color name or hex code.", required: false },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceParams {
    pub title: String,
    pub description: String,
    pub color: Option<String>,
}

impl AnnounceParams {
    pub fn from_args(args: &ValidatedArgs) -> Result<Self, Error> {
        Ok(Self {
            title: args.require("title")?.to_string(),
            description: args.require("description")?.to_string(),
            color: args.get("color").map(str::to_string),
        })
    }
}

pub struct AnnounceCommand;

#[async_trait]
impl SlashCommand for AnnounceCommand {
    fn spec(&self) -> &'static CommandSpec {
        &ANNOUNCE_SPEC
    }

    async fn execute(
        &self,
        args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let params = AnnounceParams::from_args(&args)?;

        let palette = ctx.store.color_map().await;
        let color = params
            .color
            .as_deref()
            .map(|raw| resolve_color(raw, &palette))
            .transpose()?;

        let settings = ctx.store.settings().await;
        let requester = &ctx.invocation.requester;

        let mut embed = DiscordEmbed::new();
        embed.title = Some(params.title);
        embed.description = Some(params.description);
        embed.color = color.map(|c| DiscordColor(c.rgb()));
        embed.image = settings.banner_url.map(|url| DiscordEmbedImage { url });
        embed.thumbnail = settings.icon_url.map(|url| DiscordEmbedThumbnail { url });
        embed.footer = Some(DiscordEmbedFooter {
            text: format!("Announced by {}", requester.name),
            icon_url: requester.avatar_url.clone(),
        });

        Ok(CommandOutcome::Reply(Reply::public(embed)))
    }
}
