// File: wroxbot-core/src/services/discord/slashcommands/set_banner.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    CommandContext, CommandOutcome, CommandSpec, ParamSpec, SlashCommand, ValidatedArgs,
};
use wroxbot_common::models::{DiscordColor, DiscordEmbed, Reply, SettingField};

pub static SET_BANNER_SPEC: CommandSpec = CommandSpec {
    name: "set-banner",
    description: "🖼️ Set a banner for announcements.",
    usage: "/set-banner <url>",
    params: &[ParamSpec { name: "url", description: "📷 URL of the banner image.", required: true }],
};

pub struct SetBannerCommand;

#[async_trait]
impl SlashCommand for SetBannerCommand {
    fn spec(&self) -> &'static CommandSpec {
        &SET_BANNER_SPEC
    }

    async fn execute(
        &self,
        args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let url = args.require("url")?;
        ctx.store.upsert_setting(SettingField::Banner, url).await?;

        Ok(CommandOutcome::Reply(Reply::private(DiscordEmbed::titled(
            "✅ Banner Set",
            format!("The banner for announcements is set to:\n{url}"),
            DiscordColor::GREEN,
        ))))
    }
}
