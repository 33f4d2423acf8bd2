#![allow(non_snake_case)]

use std::env;
use std::process;

use rinkFeed::cli;
use rinkFeed::config::{AppConfig, RunMode, Settings};
use rinkFeed::runtime;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
            error!(error = %e, "Ignoring config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            process::exit(1);
        }
    };

    match settings.run_mode {
        RunMode::Api => runtime::run_api(settings).await,
        RunMode::Cli => {
            let feed = runtime::build_feed(&settings);
            if let Err(e) = cli::cli(feed).await {
                error!(error = %e, "Command failed");
                process::exit(1);
            }
        }
    }
}
