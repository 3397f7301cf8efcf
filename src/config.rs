// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line configuration.

use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::logic::loader::DEFAULT_ENDPOINT;

/// Browse the namegame people list in a searchable, sortable table.
#[derive(Debug, Parser)]
#[command(name = "namegame", version, about)]
pub struct Cli {
    /// Endpoint returning a JSON array of `{name, url}` objects.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Maximum edge length of row thumbnails, in pixels.
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(16..=512))]
    pub thumbnail_size: u32,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Number of background workers; defaults to the available parallelism (at least 2).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `namegame=debug`).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Resolved settings handed to the application shell.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub endpoint: Url,
    pub thumbnail_size: u32,
    pub timeout: Duration,
    pub workers: usize,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let workers = cli.workers.filter(|n| *n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get().max(2))
                .unwrap_or(2)
        });
        Self {
            endpoint: cli.endpoint,
            thumbnail_size: cli.thumbnail_size,
            timeout: Duration::from_secs(cli.timeout_secs),
            workers,
        }
    }
}
