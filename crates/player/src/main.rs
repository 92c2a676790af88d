//! Lorebook - composition root binary.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lorebook_player::config::{BackendConfig, ExecutionContext};
use lorebook_player::infrastructure::BackendClientAccessor;
use lorebook_player::presentation::views::{AdminView, PlayerView};
use lorebook_player::presentation::state::LoadState;
use lorebook_player::presentation::Services;
use lorebook_player::ui::terminal;
use lorebook_player::ui::ViewKind;

const USAGE: &str = "Usage: lorebook <dm|player> [--headless]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lorebook_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }
    let headless = args.iter().any(|a| a == "--headless");
    let view = match args.iter().find(|a| !a.starts_with("--")) {
        Some(name) => name
            .parse::<ViewKind>()
            .map_err(|e| anyhow::anyhow!("{e}\n{USAGE}"))?,
        None => anyhow::bail!(USAGE),
    };

    let config = BackendConfig::from_env();
    let redirect_to = config.admin_redirect_url();
    let context = ExecutionContext::detect(headless);
    tracing::info!(?view, ?context, "Starting Lorebook");

    let accessor = BackendClientAccessor::new(config, context);
    let client = accessor
        .get_client()
        .context("Backend configuration is incomplete")?;
    let services = client.map(|client| Services::new(client.clone(), client, redirect_to));

    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    match view {
        ViewKind::Dm => {
            let Some(services) = services else {
                println!("Error: Backend client unavailable");
                return Ok(());
            };
            let mut admin = AdminView::new(&services);
            terminal::run_admin(&mut admin, input, &mut stdout).await?;
        }
        ViewKind::Player => {
            let mut player = PlayerView::new(services.map(|s| s.player_lore));
            terminal::run_player(&mut player, input, &mut stdout).await?;
            // Headless runs degrade quietly; an interactive failure is an error exit
            if let LoadState::Failed(message) = player.state().load_state() {
                if accessor.context() == ExecutionContext::Interactive {
                    anyhow::bail!("Player lore could not be loaded: {message}");
                }
            }
        }
    }

    Ok(())
}
