//! Entry point for BookSmart.
//!
//! - Initialize logging.
//! - Load user configuration from `conf/config.toml`.
//! - Collect optional PDF paths to import from the command line.
//! - Launch the library window.

mod app;
mod bookmarks;
mod cache;
mod config;
mod library;
mod mood;
mod pdf;
mod playback;
mod sound;

use crate::app::run_app;
use crate::config::{CONFIG_PATH, load_config};
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let import = parse_args()?;
    let loaded = load_config(Path::new(CONFIG_PATH));
    let config = &loaded.config;
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        books = %config.books_dir,
        bookmarks = %config.bookmarks_path,
        level = %config.log_level,
        "Starting BookSmart"
    );
    if config.sound_enabled && config.effective_api_key().is_empty() {
        warn!("No Freesound API key configured; set FREESOUND_API_KEY or sound.api_key");
    }
    if !import.is_empty() {
        info!(count = import.len(), "Importing books from the command line");
    }
    run_app(loaded, import).context("Failed to start the GUI")?;
    Ok(())
}

/// Every argument is a PDF to add to the library.
fn parse_args() -> Result<Vec<PathBuf>> {
    env::args()
        .skip(1)
        .map(PathBuf::from)
        .map(|path| {
            if path.is_file() {
                Ok(path)
            } else {
                Err(anyhow!("File not found: {}", path.display()))
            }
        })
        .collect()
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    info!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!("RUST_LOG is set; keeping it over the configured log level");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
