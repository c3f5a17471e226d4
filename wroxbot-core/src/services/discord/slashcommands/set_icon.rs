// File: wroxbot-core/src/services/discord/slashcommands/set_icon.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    CommandContext, CommandOutcome, CommandSpec, ParamSpec, SlashCommand, ValidatedArgs,
};
use wroxbot_common::models::{DiscordColor, DiscordEmbed, Reply, SettingField};

pub static SET_ICON_SPEC: CommandSpec = CommandSpec {
    name: "set-icon",
    description: "🔗 Set an icon for announcements.",
    usage: "/set-icon <type> [value]",
    params: &[
        ParamSpec { name: "type", description: "🛠️ Use 'bot' for bot's avatar or 'custom' for a URL.", required: true },
        ParamSpec { name: "value", description: "Custom icon URL for 'custom' type.", required: false },
    ],
};

/// Where the announcement icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// The bot's avatar, resolved when the command runs.
    Bot,
    Custom(String),
}

impl IconSource {
    pub fn from_args(args: &ValidatedArgs) -> Result<Self, Error> {
        let kind = args.require("type")?.to_lowercase();
        match (kind.as_str(), args.get("value")) {
            ("bot", _) => Ok(IconSource::Bot),
            ("custom", Some(value)) => Ok(IconSource::Custom(value.to_string())),
            _ => Err(Error::usage(
                "Use `type` as 'bot' or 'custom' with a valid value.",
                args.usage(),
            )),
        }
    }
}

pub struct SetIconCommand;

#[async_trait]
impl SlashCommand for SetIconCommand {
    fn spec(&self) -> &'static CommandSpec {
        &SET_ICON_SPEC
    }

    async fn execute(
        &self,
        args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let embed = match IconSource::from_args(&args)? {
            IconSource::Bot => {
                let avatar = ctx.transport.current_identity_avatar_url().await?;
                ctx.store.upsert_setting(SettingField::Icon, &avatar).await?;
                DiscordEmbed::titled(
                    "✅ Icon Set",
                    "Icon set to the bot's current avatar.",
                    DiscordColor::GREEN,
                )
            }
            IconSource::Custom(url) => {
                ctx.store.upsert_setting(SettingField::Icon, &url).await?;
                DiscordEmbed::titled(
                    "✅ Custom Icon Set",
                    format!("Custom icon URL set to:\n{url}"),
                    DiscordColor::GREEN,
                )
            }
        };

        Ok(CommandOutcome::Reply(Reply::private(embed)))
    }
}
