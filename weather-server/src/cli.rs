use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;
use weather_core::{Config, MemoryStore, WeatherService, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather record HTTP service")]
pub struct Cli {
    /// Path to the config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to listen on, e.g. "127.0.0.1:8000".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactively store the provider credential and server settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Serve { bind: None }) {
            Command::Serve { bind } => serve(self.config, bind).await,
            Command::Configure => configure(self.config),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn serve(path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let config = load_config(path.as_ref())?.with_env();

    let provider = provider_from_config(&config.provider)?;
    let service = WeatherService::new(provider, Arc::new(MemoryStore::new()));
    let app = weather_server::router(service, &config.server.allowed_origin)?;

    let bind = bind.unwrap_or(config.server.bind);
    info!(
        provider = %config.provider.base_url,
        allowed_origin = %config.server.allowed_origin,
        "starting weather-server"
    );

    weather_server::serve(app, &bind).await
}

fn configure(path: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(path.as_ref())?;

    let access_key = Password::new("Weatherstack access key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let base_url = Text::new("Provider base URL:")
        .with_default(&config.provider.base_url)
        .prompt()?;

    let allowed_origin = Text::new("Allowed CORS origin:")
        .with_default(&config.server.allowed_origin)
        .prompt()?;

    config.provider.access_key = Some(access_key.trim().to_string());
    config.provider.base_url = base_url.trim().to_string();
    config.server.allowed_origin = allowed_origin.trim().to_string();
    config.provider.require_access_key()?;

    let saved_to = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}
