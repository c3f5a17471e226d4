use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use wroxbot_core::platforms::discord::DiscordRuntime;

mod context;
use context::ServerContext;

pub const BOT_VERSION: &str = "1.2";
pub const BOT_DEVELOPER: &str = "Wrox/Zpyrx";

#[derive(Parser, Debug, Clone)]
#[command(name = "wroxbot")]
#[command(author, version, about = "WroxBot - Discord announcement and palette bot")]
pub struct Args {
    /// Path to the SQLite configuration database.
    #[arg(long, default_value = "Wrox DB/bot_config.db")]
    pub db_path: String,

    /// Discord bot token. Falls back to DISCORD_TOKEN (a .env file is honored).
    #[arg(long)]
    pub token: Option<String>,
}

fn init_tracing() {
    let _ = tracing_log::LogTracer::init();
    let filter = EnvFilter::from_default_env()
        .add_directive("wroxbot=info".parse().unwrap_or_default())
        .add_directive("wroxbot_core=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if tracing::subscriber::set_global_default(sub).is_err() {
        eprintln!("A global tracing subscriber was already installed.");
    }
}

fn resolve_token(args: &Args) -> anyhow::Result<String> {
    if let Some(token) = args.token.as_ref().filter(|t| !t.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }
    std::env::var("DISCORD_TOKEN")
        .map(|t| t.trim().to_string())
        .ok()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow!("no Discord token: pass --token or set DISCORD_TOKEN"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("WroxBot v{} starting.", BOT_VERSION);

    let token = resolve_token(&args)?;
    let ctx = ServerContext::new(&args)
        .await
        .context("failed to initialize configuration store")?;

    let runtime = DiscordRuntime::new(
        token,
        ctx.store.clone(),
        ctx.dispatcher.clone(),
        ctx.metadata.clone(),
    );

    tokio::select! {
        res = runtime.run() => {
            if let Err(e) = res {
                error!("Discord runtime error: {:?}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Ctrl-C received, shutting down.");
        }
    }

    ctx.db.pool().close().await;
    info!("Main finished. Goodbye!");
    Ok(())
}
