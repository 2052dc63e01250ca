mod commands;
mod render;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use medcenter::config::MedcenterConfig;
use medcenter::{ingest, seed, AppointmentStore};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use setup::{Cli, Commands};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = MedcenterConfig::load(cli.config.as_deref()).context("loading config")?;
    init_logging(&config, cli.verbose);

    let mut store = load_store(cli.data.as_deref(), &config)?;

    match cli.command {
        Commands::List {
            skip,
            top,
            author,
            status,
            specialization,
            from,
            to,
        } => {
            let filter = medcenter::AppointmentFilter {
                author,
                status,
                specialization,
                date_from: from,
                date_to: to,
            };
            let top = top.unwrap_or_else(|| config.page_size());
            commands::list(&store, skip, top, &filter, cli.output)
        }
        Commands::Get { id } => commands::get(&store, &id, cli.output),
        Commands::Validate { file } => commands::validate(&read_json(&file)?, cli.output),
        Commands::Demo => commands::demo(&mut store),
    }
}

fn init_logging(config: &MedcenterConfig, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Fills a fresh store from `data` (a JSON array) or, without it, from the
/// sample set.
fn load_store(data: Option<&Path>, config: &MedcenterConfig) -> Result<AppointmentStore> {
    let mut store = AppointmentStore::new();

    match data {
        Some(path) => {
            let value = read_json(path)?;
            if !value.is_array() {
                warn!(path = %path.display(), "data file is not a JSON array; starting empty");
            }
            let added = ingest::insert_all_values(&mut store, &value);
            info!(path = %path.display(), added = added.len(), "loaded appointments");
        }
        None => {
            store.insert_all(seed::sample_appointments(config.seed_count));
        }
    }

    Ok(store)
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
