mod admin;
mod ads;
mod cli;
mod commands;
mod config;
mod error;
mod history_store;
mod session;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use commendai_core::error::CoreError;
use commendai_core::types::language::InterfaceLanguage;

use crate::cli::{Cli, Command};
use crate::commands::CommandError;
use crate::config::ConfigError;
use crate::wiring::WiringError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid cli: {0}")]
    InvalidCli(#[from] CoreError),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("command failed: {0}")]
    Command(#[from] CommandError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    config::load_dotenv()?;
    let mut config = config::AppConfig::from_env()?;
    if let Some(raw) = cli.ui_lang.as_deref() {
        config.interface_language = InterfaceLanguage::try_from(raw)?;
    }
    debug!(api_url = %config.api_url, "configuration loaded");
    let state = wiring::build_state(config)?;

    let result = match cli.command {
        Command::Generate(args) => commands::comment::generate(&state, args).await,
        Command::Post(args) => commands::comment::post(&state, args).await,
        Command::History => commands::history::show(&state).await,
        Command::Ads(args) => commands::ads::show(&state, args).await,
        Command::Admin { command } => commands::admin::run(&state, command).await,
    };
    if let Err(err) = &result {
        error!(error = %err, "command failed");
    }
    Ok(result?)
}
