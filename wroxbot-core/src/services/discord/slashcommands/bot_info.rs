// File: wroxbot-core/src/services/discord/slashcommands/bot_info.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::Error;
use crate::services::command_dispatcher::{
    BotProfile, CommandContext, CommandOutcome, CommandSpec, Requester, SlashCommand,
    ValidatedArgs,
};
use crate::tasks::live_status::{default_terminal_notice, LiveSession, TickContext};
use crate::utils::time::{format_date, format_elapsed};
use wroxbot_common::models::{DiscordColor, DiscordEmbed, DiscordEmbedFooter, DiscordEmbedThumbnail};

pub static BOT_INFO_SPEC: CommandSpec = CommandSpec {
    name: "bot-info",
    description: "🤖 Display detailed information about the bot with live updates.",
    usage: "/bot-info",
    params: &[],
};

/// Everything the live embed shows besides the current time. Fixed for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfoSnapshot {
    pub bot: BotProfile,
    pub bot_avatar_url: Option<String>,
    pub requester: Requester,
    pub joined_at: Option<DateTime<Utc>>,
}

pub fn render_bot_info(info: &BotInfoSnapshot, tick: &TickContext) -> DiscordEmbed {
    let mut embed = DiscordEmbed::titled(
        "🤖 Bot Information (Live Updates)",
        "This embed dynamically updates every second with the latest bot statistics.",
        DiscordColor::BLUE,
    );
    embed.thumbnail = info
        .bot_avatar_url
        .clone()
        .map(|url| DiscordEmbedThumbnail { url });

    embed.field("**Bot Name**", format!("`{}`", info.bot.name), true);
    embed.field("**Bot Version**", format!("`{}`", info.bot.version), true);
    embed.field("**Developer**", format!("`{}`", info.bot.developer), true);

    let ping = match info.bot.latency_ms {
        Some(ms) => format!("`{ms} ms`"),
        None => "`n/a`".to_string(),
    };
    embed.field("**Ping**", ping, true);

    let joined = match info.joined_at {
        Some(at) => format!(
            "Elapsed: `{}`\nDate: `{}`",
            format_elapsed(at, tick.now),
            format_date(at)
        ),
        None => "Elapsed: `unknown`\nDate: `unknown`".to_string(),
    };
    embed.field("**Joined Server**", joined, false);

    embed.field(
        "**Bot Uptime**",
        format!(
            "Uptime: `{}`\nDate Started: `{}`",
            format_elapsed(info.bot.started_at, tick.now),
            format_date(info.bot.started_at)
        ),
        false,
    );

    embed.footer = Some(DiscordEmbedFooter {
        text: format!("Requested by {}", info.requester.name),
        icon_url: info.requester.avatar_url.clone(),
    });
    embed.timestamp = Some(tick.now);
    embed
}

pub struct BotInfoCommand;

#[async_trait]
impl SlashCommand for BotInfoCommand {
    fn spec(&self) -> &'static CommandSpec {
        &BOT_INFO_SPEC
    }

    async fn execute(
        &self,
        _args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let bot_avatar_url = match ctx.transport.current_identity_avatar_url().await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("bot-info: could not resolve bot avatar => {e}");
                None
            }
        };

        let info = BotInfoSnapshot {
            bot: ctx.bot.clone(),
            bot_avatar_url: bot_avatar_url.clone(),
            requester: ctx.invocation.requester.clone(),
            joined_at: ctx.invocation.guild_joined_at,
        };

        let session = LiveSession::new(Box::new(move |tick: &TickContext| render_bot_info(&info, tick)))
            .with_terminal_notice(default_terminal_notice(bot_avatar_url))
            .with_failure_notice("❌ An error occurred while running the `/bot-info` command.");

        Ok(CommandOutcome::Live(session))
    }
}
