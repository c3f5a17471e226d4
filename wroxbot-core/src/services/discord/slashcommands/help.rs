// File: wroxbot-core/src/services/discord/slashcommands/help.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    CommandContext, CommandOutcome, CommandSpec, SlashCommand, ValidatedArgs,
};
use wroxbot_common::models::{DiscordColor, DiscordEmbed, Reply};

pub static HELP_SPEC: CommandSpec = CommandSpec {
    name: "help",
    description: "ℹ️ Show the list of commands.",
    usage: "/help",
    params: &[],
};

/// Lists the commands it was built with. The listing never changes at runtime.
pub struct HelpCommand {
    listing: Vec<&'static CommandSpec>,
}

impl HelpCommand {
    pub fn new(listing: Vec<&'static CommandSpec>) -> Self {
        Self { listing }
    }

    pub fn render(&self) -> DiscordEmbed {
        let mut embed = DiscordEmbed::titled(
            "ℹ️ Help",
            "List of commands with descriptions:",
            DiscordColor::GOLD,
        );
        for spec in &self.listing {
            embed.field(
                format!("/{}", spec.name),
                format!("{}\n**Usage:** `{}`", spec.description, spec.usage),
                false,
            );
        }
        embed
    }
}

#[async_trait]
impl SlashCommand for HelpCommand {
    fn spec(&self) -> &'static CommandSpec {
        &HELP_SPEC
    }

    async fn execute(
        &self,
        _args: ValidatedArgs,
        _ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        Ok(CommandOutcome::Reply(Reply::private(self.render())))
    }
}
