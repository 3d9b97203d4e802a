use dotenv::dotenv;
use log::{debug, error, info};
use std::env;
use std::process::ExitCode;

mod config;
mod error;
mod handlers;
mod models;
mod services;
mod utils;

use config::Config;
use error::NotifierError;
use handlers::event::{RunOutcome, handle_event};
use models::event::EventDocument;

fn init_logging() {
    let verbose = env::var("VERBOSE_LOGS").is_ok_and(|v| config::parse_flag(&v));
    let default_filter = if verbose { "info,event_notifier=debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

async fn run() -> Result<RunOutcome, NotifierError> {
    let config = Config::from_env()?;
    info!("DISCORD_WEBHOOK_URL found (value hidden)");
    debug!("{:?}", config);

    let event = EventDocument::load(&config.event_path)?;
    handle_event(&config, &event).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    init_logging();

    match run().await {
        Ok(RunOutcome::Delivered) => ExitCode::SUCCESS,
        Ok(RunOutcome::Skipped(reason)) => {
            debug!("Nothing sent: {}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if let Some(hint) = e.remediation() {
                error!("{}", hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
