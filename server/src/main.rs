use std::sync::Arc;

use anyhow::Context;
use duel_server::config::USAGE;
use duel_server::{Config, ConfigError, Dispatcher, transport};
use duel_team::{Catalog, JsonRosterStore, RosterStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env_and_args() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let catalog = Catalog::load(&config.pokedex)
        .await
        .with_context(|| format!("load catalog {}", config.pokedex.display()))?;
    let store: Arc<dyn RosterStore> = Arc::new(JsonRosterStore::new(&config.roster_dir));
    info!(roster_dir = %config.roster_dir.display(), "using file roster store");

    let dispatcher = Arc::new(Dispatcher::new(store, Arc::new(catalog)));
    let socket = transport::bind(config.bind).await?;
    transport::serve(socket, dispatcher).await
}
