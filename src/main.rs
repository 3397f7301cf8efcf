mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    app::run(AppConfig::from(cli))
}
