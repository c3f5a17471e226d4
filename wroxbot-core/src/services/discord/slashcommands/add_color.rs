// File: wroxbot-core/src/services/discord/slashcommands/add_color.rs

use async_trait::async_trait;

use crate::Error;
use crate::services::command_dispatcher::{
    CommandContext, CommandOutcome, CommandSpec, ParamSpec, SlashCommand, ValidatedArgs,
};
use wroxbot_common::models::{ColorMap, DiscordColor, DiscordEmbed, HexColor, Reply};

pub static ADD_COLOR_SPEC: CommandSpec = CommandSpec {
    name: "add-color",
    description: "🎨 Add a new custom color.",
    usage: "/add-color <name> <hexcolor>",
    params: &[
        ParamSpec { name: "name", description: "📋 Name of the color.", required: true },
        ParamSpec { name: "hexcolor", description: "🛠️ Hexadecimal color code.", required: true },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColorParams {
    pub name: String,
    pub hex: HexColor,
}

impl AddColorParams {
    /// The name must be free in `palette` before the hex code is looked at.
    pub fn from_args(args: &ValidatedArgs, palette: &ColorMap) -> Result<Self, Error> {
        let name = args.require("name")?;
        if palette.contains(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let raw_hex = args.require("hexcolor")?;
        let hex = HexColor::parse(raw_hex).map_err(|_| Error::InvalidHex(raw_hex.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            hex,
        })
    }
}

pub struct AddColorCommand;

#[async_trait]
impl SlashCommand for AddColorCommand {
    fn spec(&self) -> &'static CommandSpec {
        &ADD_COLOR_SPEC
    }

    async fn execute(
        &self,
        args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error> {
        let params = AddColorParams::from_args(&args, &ctx.store.color_map().await)?;
        ctx.store.add_color(&params.name, &params.hex).await?;

        Ok(CommandOutcome::Reply(Reply::private(DiscordEmbed::titled(
            "✅ Color Added",
            format!(
                "Color `{}` with code `{}` added successfully.",
                params.name, params.hex
            ),
            DiscordColor::GREEN,
        ))))
    }
}
