//! CLI entry point for the catalog crawler.

use std::io::{self, IsTerminal};
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use crawler_core::{CatalogSite, Crawler, HttpClient};
use tracing::{debug, info};

mod app;
mod app_config;
mod cli;

use app::config_runtime::{parse_cli_with_sources, resolve_default_log_level, resolve_settings};
use app::progress_manager::spawn_progress_ui;
use app::terminal::{init_tracing, is_dumb_terminal, is_no_color_requested, should_use_spinner};
use app_config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let (args, cli_sources) = parse_cli_with_sources();
    let loaded_config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(args, &cli_sources, loaded_config.config.as_ref())?;

    let no_color = is_no_color_requested(settings.no_color);
    init_tracing(resolve_default_log_level(&settings), no_color);

    debug!(?settings, config_path = ?loaded_config.path, "settings resolved");

    let site = CatalogSite::new(&settings.base_url, &settings.catalog_path)
        .context("Invalid catalog location")?;
    tokio::fs::create_dir_all(&settings.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                settings.output_dir.display()
            )
        })?;
    let client = HttpClient::new(settings.http).context("Failed to build HTTP client")?;

    let crawler = Crawler::new(client, site, settings.output_dir.clone())
        .with_letters(settings.letters.clone());

    let use_spinner = should_use_spinner(io::stderr().is_terminal(), settings.quiet, is_dumb_terminal());
    let (spinner, stop) = spawn_progress_ui(use_spinner, crawler.stats());

    let stats = crawler.run().await;

    stop.store(true, Ordering::SeqCst);
    if let Some(handle) = spinner {
        let _ = handle.await;
    }

    info!(
        downloaded = stats.downloaded(),
        skipped = stats.skipped(),
        failed = stats.failed(),
        entry_failures = stats.entry_failures(),
        bytes = stats.bytes(),
        "All downloads complete"
    );
    Ok(())
}
