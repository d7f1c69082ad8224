mod cli;
mod config;
mod converge;
mod inventory;
mod models;
mod nautobot;
mod registry;
mod utils;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up NAUTOBOT_* from a local .env, if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the JSON report
    let default_filter = if cli.verbose {
        "nautobot_converge=debug"
    } else {
        "nautobot_converge=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.run().await {
        Ok(report) => {
            println!("{}", pretty(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            let report = serde_json::json!({ "failed": true, "changed": false, "msg": format!("{:#}", e) });
            println!("{}", pretty(&report));
            ExitCode::FAILURE
        }
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
