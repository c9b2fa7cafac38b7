mod app;
mod commands;
mod crash_guard;
mod logging;
mod views;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use kairos_core::KairosApi;
use kairos_infrastructure::{ConfigService, HttpApiClient, KairosPaths};

use crate::crash_guard::{Outcome, run_guarded};

#[derive(Parser, Debug)]
#[command(name = "kairos")]
#[command(about = "Chat with Kairos, your AI companion", long_about = None)]
struct Args {
    /// Backend API base URL (overrides config and KAIROS_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = logging::init()?;

    let config_service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.get_config()?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    let client = Arc::new(HttpApiClient::new(&config.api)?);
    tracing::info!("[Main] Using backend at {}", client.base_url());
    let api: Arc<dyn KairosApi> = client.clone();

    let history_file = KairosPaths::history_file().ok();

    let outcome = run_guarded(
        || app::run_repl(api.clone(), &config, history_file.clone()),
        |screen| {
            print!("{}", screen);
            let mut answer = String::new();
            let read = tokio::task::block_in_place(|| std::io::stdin().read_line(&mut answer));
            matches!(read, Ok(n) if n > 0) && !matches!(answer.trim(), "quit" | "exit")
        },
    )
    .await;

    client.shutdown();

    match outcome {
        Outcome::Finished(result) => result,
        Outcome::Crashed => {
            println!("{}", "Goodbye!".bright_green());
            Ok(())
        }
    }
}
