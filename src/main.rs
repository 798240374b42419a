// review-console: terminal console for the synthetic review generator.
// Generates reviews, runs quality checks, and builds reports against a running server.

mod actions;
mod api;
mod app;
mod config;
mod error;
mod logging;
mod state;
mod storage;
mod templates;
mod terminal;
mod ui;

use std::sync::Arc;

use clap::Parser;

use crate::api::ReviewClient;
use crate::app::App;
use crate::config::{AppConfig, Cli};
use crate::error::Result;
use crate::state::{TabBar, ViewState};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(&cli)?;

    if cli.print_config {
        print!("{}", cfg.to_toml()?);
        return Ok(());
    }

    if let Some(path) = storage::log_path() {
        logging::init(&path, cfg.verbose)?;
    }

    let initial = TabBar::default().activate_id(&cfg.initial_tab)?.active();
    let client = ReviewClient::from_config(&cfg)?;
    tracing::info!(base_url = %cfg.base_url, tab = initial.id(), "starting");

    // The UI loop owns the main thread; actions run on the runtime's workers.
    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(
        ViewState::new(initial, !cfg.trust_server_text),
        Arc::new(client),
        runtime.handle().clone(),
        cfg.download_dir.clone(),
    );

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        terminal::restore_terminal();
        original_hook(info);
    }));

    let (mut term, restore) = terminal::enter()?;

    app.start_health_probe();
    let result = app.run(&mut term);

    drop(restore);

    runtime.shutdown_background();
    tracing::info!("exiting");

    result.map_err(Into::into)
}
