use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, trace, warn};

use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::Client as HttpClient;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_model::application::interaction::{Interaction, InteractionData};
use twilight_model::id::marker::UserMarker;
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::discord::embed::avatar_url;
use crate::platforms::discord::transport::DiscordInteractionTransport;
use crate::services::command_dispatcher::{
    BotProfile, CommandContext, CommandDispatcher, InvocationMeta, RawArgs, Requester,
};
use crate::services::config_store::ConfigStore;
use crate::services::discord::slashcommands::register_global_slash_commands;
use crate::utils::time::SystemClock;

/// Static facts about the bot that do not come from the gateway.
#[derive(Debug, Clone)]
pub struct BotMetadata {
    pub version: String,
    pub developer: String,
    pub started_at: DateTime<Utc>,
}

/// State shared by every interaction task.
struct RuntimeShared {
    http: Arc<HttpClient>,
    cache: Arc<InMemoryCache>,
    dispatcher: Arc<CommandDispatcher>,
    store: Arc<ConfigStore>,
    metadata: BotMetadata,
    /// Last gateway heartbeat latency in ms; 0 until the first ACK.
    latency_ms: AtomicU64,
}

/// Who the bot is, learned from READY.
#[derive(Debug, Clone)]
struct BotIdentity {
    user_id: Id<UserMarker>,
    name: String,
}

/// Connects one shard, registers slash commands on READY, and hands every
/// command interaction to the dispatcher on its own task.
pub struct DiscordRuntime {
    token: String,
    shared: Arc<RuntimeShared>,
}

impl DiscordRuntime {
    pub fn new(
        token: String,
        store: Arc<ConfigStore>,
        dispatcher: Arc<CommandDispatcher>,
        metadata: BotMetadata,
    ) -> Self {
        let http = Arc::new(HttpClient::new(token.clone()));
        let cache = Arc::new(
            InMemoryCache::builder()
                .resource_types(ResourceType::GUILD | ResourceType::MEMBER | ResourceType::USER_CURRENT)
                .build(),
        );
        Self {
            token,
            shared: Arc::new(RuntimeShared {
                http,
                cache,
                dispatcher,
                store,
                metadata,
                latency_ms: AtomicU64::new(0),
            }),
        }
    }

    /// Runs the gateway loop until the shard stops yielding events.
    pub async fn run(self) -> Result<(), Error> {
        if self.token.is_empty() {
            return Err(Error::Platform("Discord token is empty".into()));
        }

        let mut shard = Shard::new(ShardId::ONE, self.token.clone(), Intents::GUILDS);
        let mut identity: Option<BotIdentity> = None;
        info!("(Discord) Shard started. Listening for events.");

        while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
            let event = match item {
                Ok(event) => event,
                Err(err) => {
                    error!("(Discord) error receiving event: {err:?}");
                    continue;
                }
            };

            self.shared.cache.update(&event);
            if let Some(avg) = shard.latency().average() {
                self.shared.latency_ms.store(avg.as_millis() as u64, Ordering::Relaxed);
            }

            match event {
                Event::Ready(ready) => {
                    info!(
                        "(Discord) READY as {} (ID={})",
                        ready.user.name, ready.user.id
                    );
                    identity = Some(BotIdentity {
                        user_id: ready.user.id,
                        name: ready.user.name.clone(),
                    });
                    if let Err(e) = register_global_slash_commands(
                        &self.shared.http,
                        ready.application.id,
                        &self.shared.dispatcher,
                    )
                    .await
                    {
                        error!("{e}");
                    }
                }
                Event::InteractionCreate(create) => {
                    let Some(bot) = identity.clone() else {
                        warn!("(Discord) interaction received before READY; ignoring");
                        continue;
                    };
                    let shared = Arc::clone(&self.shared);
                    let interaction = (*create).0;
                    tokio::spawn(async move {
                        if let Err(e) = handle_interaction(shared, bot, interaction).await {
                            error!("(Discord) failed to answer interaction => {e}");
                        }
                    });
                }
                other => {
                    trace!("(Discord) unhandled event: {:?}", other.kind());
                }
            }
        }

        warn!("(Discord) event loop ended.");
        Ok(())
    }
}

async fn handle_interaction(
    shared: Arc<RuntimeShared>,
    bot: BotIdentity,
    interaction: Interaction,
) -> Result<(), Error> {
    let requester = match interaction.author() {
        Some(user) => Requester {
            id: user.id.to_string(),
            name: user.name.clone(),
            avatar_url: Some(avatar_url(user.id, user.avatar)),
        },
        None => Requester {
            id: "0".into(),
            name: "unknown".into(),
            avatar_url: None,
        },
    };

    let guild_joined_at = interaction
        .guild_id
        .and_then(|guild_id| shared.cache.member(guild_id, bot.user_id))
        .and_then(|member| member.joined_at())
        .and_then(|ts| DateTime::from_timestamp(ts.as_secs(), 0));

    let Some(InteractionData::ApplicationCommand(data)) = interaction.data else {
        debug!("(Discord) ignoring non-command interaction");
        return Ok(());
    };

    let mut raw = RawArgs::new();
    for option in &data.options {
        let value = match &option.value {
            CommandOptionValue::String(s) => s.clone(),
            CommandOptionValue::Integer(i) => i.to_string(),
            CommandOptionValue::Number(n) => n.to_string(),
            CommandOptionValue::Boolean(b) => b.to_string(),
            other => {
                debug!("(Discord) ignoring option '{}' of kind {:?}", option.name, other.kind());
                continue;
            }
        };
        raw.insert(option.name.clone(), value);
    }

    let transport = DiscordInteractionTransport::new(
        Arc::clone(&shared.http),
        interaction.application_id,
        interaction.id,
        interaction.token.clone(),
    );

    let latency = shared.latency_ms.load(Ordering::Relaxed);
    let profile = BotProfile {
        name: bot.name,
        version: shared.metadata.version.clone(),
        developer: shared.metadata.developer.clone(),
        started_at: shared.metadata.started_at,
        latency_ms: (latency > 0).then_some(latency),
    };
    let invocation = InvocationMeta {
        requester,
        guild_joined_at,
    };
    let clock = SystemClock;

    let ctx = CommandContext {
        store: shared.store.as_ref(),
        transport: &transport,
        clock: &clock,
        bot: &profile,
        invocation: &invocation,
    };

    let outcome = shared.dispatcher.dispatch(&data.name, &raw, &ctx).await?;
    debug!("(Discord) /{} => {:?}", data.name, outcome);
    Ok(())
}
