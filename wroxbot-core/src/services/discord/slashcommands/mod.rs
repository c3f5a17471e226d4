// File: wroxbot-core/src/services/discord/slashcommands/mod.rs

pub mod add_color;
pub mod announce;
pub mod bot_info;
pub mod help;
pub mod list_colors;
pub mod set_banner;
pub mod set_icon;

use std::sync::Arc;

use tracing::info;
use twilight_http::Client as HttpClient;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use crate::services::command_dispatcher::{CommandDispatcher, CommandSpec};
use add_color::{AddColorCommand, ADD_COLOR_SPEC};
use announce::{AnnounceCommand, ANNOUNCE_SPEC};
use bot_info::{BotInfoCommand, BOT_INFO_SPEC};
use help::{HelpCommand, HELP_SPEC};
use list_colors::{ListColorsCommand, LIST_COLORS_SPEC};
use set_banner::{SetBannerCommand, SET_BANNER_SPEC};
use set_icon::{SetIconCommand, SET_ICON_SPEC};

/// Order in which `/help` lists the commands.
pub static BUILTIN_SPECS: [&CommandSpec; 7] = [
    &HELP_SPEC,
    &ANNOUNCE_SPEC,
    &ADD_COLOR_SPEC,
    &LIST_COLORS_SPEC,
    &SET_BANNER_SPEC,
    &SET_ICON_SPEC,
    &BOT_INFO_SPEC,
];

/// A dispatcher with every built-in command registered.
pub fn builtin_dispatcher() -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(Box::new(HelpCommand::new(BUILTIN_SPECS.to_vec())));
    dispatcher.register(Box::new(AnnounceCommand));
    dispatcher.register(Box::new(AddColorCommand));
    dispatcher.register(Box::new(ListColorsCommand));
    dispatcher.register(Box::new(SetBannerCommand));
    dispatcher.register(Box::new(SetIconCommand));
    dispatcher.register(Box::new(BotInfoCommand));
    dispatcher
}

/// Builds the platform-side declaration of one command.
pub fn build_command(spec: &CommandSpec) -> Command {
    let mut builder = CommandBuilder::new(spec.name, spec.description, CommandType::ChatInput);
    for param in spec.params {
        builder = builder.option(StringBuilder::new(param.name, param.description).required(param.required));
    }
    builder.build()
}

pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    dispatcher: &CommandDispatcher,
) -> Result<(), Error> {
    let commands: Vec<Command> = dispatcher.specs().into_iter().map(build_command).collect();

    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    info!("Registered {} global slash commands.", commands.len());
    Ok(())
}
