use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::Error;
use crate::platforms::InteractionTransport;
use crate::services::config_store::ConfigStore;
use crate::tasks::live_status::{LiveOutcome, LiveSession};
use crate::utils::time::Clock;
use wroxbot_common::models::{ColorMap, DiscordColor, DiscordEmbed, HexColor, Reply};

/// One string parameter of a slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Static declaration of a slash command: what it is called and what it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub params: &'static [ParamSpec],
}

impl CommandSpec {
    /// Keeps only declared parameters, drops blank ones, and rejects the call
    /// if a required one is missing. Values are kept exactly as given.
    pub fn validate(&self, raw: &RawArgs) -> Result<ValidatedArgs, Error> {
        let mut values = HashMap::new();
        let mut missing = Vec::new();

        for param in self.params {
            match raw.get(param.name).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    values.insert(param.name, value.to_string());
                }
                None if param.required => missing.push(format!("`{}`", param.name)),
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(Error::usage(
                format!("Missing required parameter(s): {}.", missing.join(", ")),
                self.usage,
            ));
        }

        Ok(ValidatedArgs {
            usage: self.usage,
            values,
        })
    }
}

/// Untyped arguments as they arrived from the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    values: HashMap<String, String>,
}

impl RawArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Arguments that passed schema validation. No value is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    usage: &'static str,
    values: HashMap<&'static str, String>,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, Error> {
        self.get(name)
            .ok_or_else(|| Error::usage(format!("Missing required parameter: `{name}`."), self.usage))
    }

    pub fn usage(&self) -> &'static str {
        self.usage
    }
}

/// Accepts either a literal `#RRGGBB` code or a palette name.
/// A value starting with `#` never consults the palette.
pub fn resolve_color(raw: &str, palette: &ColorMap) -> Result<HexColor, Error> {
    if raw.starts_with('#') {
        return HexColor::parse(raw);
    }
    match palette.get(raw) {
        Some(stored) => HexColor::parse(stored),
        None => Err(Error::InvalidColor(format!("`{raw}` is not a known color name."))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Facts about the running bot shown by `/bot-info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotProfile {
    pub name: String,
    pub version: String,
    pub developer: String,
    pub started_at: DateTime<Utc>,
    pub latency_ms: Option<u64>,
}

/// Per-invocation metadata supplied by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationMeta {
    pub requester: Requester,
    /// When the bot joined the guild the command came from (None in DMs or if unknown).
    pub guild_joined_at: Option<DateTime<Utc>>,
}

/// Everything a handler may touch.
pub struct CommandContext<'a> {
    pub store: &'a ConfigStore,
    pub transport: &'a dyn InteractionTransport,
    pub clock: &'a dyn Clock,
    pub bot: &'a BotProfile,
    pub invocation: &'a InvocationMeta,
}

pub enum CommandOutcome {
    Reply(Reply),
    /// Hand the response over to a live-updating session.
    Live(LiveSession),
}

#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn spec(&self) -> &'static CommandSpec;

    async fn execute(
        &self,
        args: ValidatedArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<CommandOutcome, Error>;
}

/// What happened to one dispatched invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Replied,
    /// The handler (or validation) failed and a failure reply was sent.
    Failed,
    Live(LiveOutcome),
    Unknown,
}

/// Registry of slash commands keyed by name.
#[derive(Default)]
pub struct CommandDispatcher {
    commands: Vec<Box<dyn SlashCommand>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations with the same name replace earlier ones.
    pub fn register(&mut self, command: Box<dyn SlashCommand>) {
        let name = command.spec().name;
        self.commands.retain(|c| c.spec().name != name);
        self.commands.push(command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn SlashCommand> {
        self.commands
            .iter()
            .find(|c| c.spec().name == name)
            .map(|c| c.as_ref())
    }

    pub fn specs(&self) -> Vec<&'static CommandSpec> {
        self.commands.iter().map(|c| c.spec()).collect()
    }

    /// Validates, runs, and answers one invocation. Exactly one response is
    /// produced per call. The returned error is only ever a transport failure
    /// while sending that response.
    pub async fn dispatch(
        &self,
        name: &str,
        raw: &RawArgs,
        ctx: &CommandContext<'_>,
    ) -> Result<DispatchOutcome, Error> {
        let Some(command) = self.get(name) else {
            warn!("Unrecognized command: {name}");
            let reply = Reply::private_text(format!("Unrecognized command: {name}"));
            ctx.transport.send_message(&reply).await?;
            return Ok(DispatchOutcome::Unknown);
        };
        let spec = command.spec();
        info!(
            "Dispatching /{} for {} ({})",
            spec.name, ctx.invocation.requester.name, ctx.invocation.requester.id
        );

        let result = match spec.validate(raw) {
            Ok(args) => command.execute(args, ctx).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(CommandOutcome::Reply(reply)) => {
                ctx.transport.send_message(&reply).await?;
                Ok(DispatchOutcome::Replied)
            }
            Ok(CommandOutcome::Live(mut session)) => {
                let outcome = session.run(ctx.transport, ctx.clock).await;
                Ok(DispatchOutcome::Live(outcome))
            }
            Err(e) => {
                if e.is_user_facing() {
                    debug!("/{} rejected: {}", spec.name, e);
                } else {
                    error!("/{} failed: {:?}", spec.name, e);
                }
                ctx.transport.send_message(&failure_reply(spec, &e)).await?;
                Ok(DispatchOutcome::Failed)
            }
        }
    }
}

/// Maps an error to the private reply the requester sees.
pub fn failure_reply(spec: &CommandSpec, err: &Error) -> Reply {
    let embed = match err {
        Error::Usage { message, usage } => DiscordEmbed::titled(
            "❌ Usage Error",
            format!("{message}\n\n**Usage:** `{usage}`"),
            DiscordColor::RED,
        ),
        Error::InvalidColor(message) => DiscordEmbed::titled(
            "❌ Invalid Color",
            format!("{message} Use `/list-colors` to see available colors."),
            DiscordColor::RED,
        ),
        Error::InvalidHex(_) => DiscordEmbed::titled(
            "❌ Invalid Hex Code",
            "Provide a valid hex code (e.g., `#FF5733`).",
            DiscordColor::RED,
        ),
        Error::AlreadyExists(name) => DiscordEmbed::titled(
            "❌ Color Exists",
            format!("The color name `{name}` is already in use."),
            DiscordColor::RED,
        ),
        _ => DiscordEmbed::titled(
            "❌ Something Went Wrong",
            format!(
                "Sorry, an error occurred while running `/{}`. Please try again later.",
                spec.name
            ),
            DiscordColor::RED,
        ),
    };
    Reply::private(embed)
}
