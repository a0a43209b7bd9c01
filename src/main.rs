// Entry point for the cueroom terminal client.
// Sets up logging and the app context, runs the UI, then tears everything down.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cueroom::app::App;
use cueroom::config::Config;
use cueroom::context::AppContext;
use cueroom::storage::paths;

const DEFAULT_LOG_FILTER: &str = "cueroom=info";

/// Log to a file in the cache directory; the terminal belongs to the UI.
fn init_tracing() {
    let Some(path) = paths::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> cueroom::Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(base_url = %config.base_url, data_dir = ?config.data_dir, "starting cueroom");

    let mut context = AppContext::new(config)?;
    context.start_settings();

    let mut terminal = ratatui::init();
    let mut app = App::new(&context);
    let result = app.run(&mut terminal, &context);
    ratatui::restore();

    context.shutdown().await;
    info!("cueroom stopped");

    result?;
    Ok(())
}
