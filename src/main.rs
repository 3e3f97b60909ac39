use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use atrium::{
    api::ApiGateway,
    app::{init_config, load_config, Config},
    auth::{SessionManager, SessionStore},
    cli::{handle_command, Cli, Commands},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // Init needs no backend or session plumbing
    if let Commands::Init = cli.command {
        return init_config();
    }

    // Load configuration
    let mut config: Config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        toml::from_str(&toml_str)?
    } else {
        load_config().unwrap_or_default()
    };
    if let Some(api_url) = cli.api_url {
        config.backend.base_url = api_url;
    }

    let store = match &config.session.state_dir {
        Some(dir) => SessionStore::open(dir)?,
        None => SessionStore::open_default()?,
    };
    let gateway = ApiGateway::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
        store.clone(),
    )?;
    let mut session = SessionManager::new(gateway, store);

    // Session state must be resolved before any command acts on it
    session.restore().await;

    handle_command(&mut session, &cli.command).await
}
