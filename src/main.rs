//! Fraud Scoring Engine CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- serve --bind 127.0.0.1:3000
//! cargo run -- replay payments.csv > fraud_reports.csv
//! ```
//!
//! `serve` runs the HTTP ingestion service; notification settings are read
//! from flags, the environment, or a `.env` file. `replay` scores a CSV file
//! offline and writes fraud reports to stdout.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bind failure, file not found, file not readable, etc.)

use fraud_scoring_engine::cli::{self, Command};
use fraud_scoring_engine::{replay, server};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let args = cli::parse_args();

    // Logs go to stderr so replay output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fraud_scoring_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match args.command {
        Command::Serve(serve_args) => server::run(serve_args).await,
        Command::Replay(replay_args) => {
            let mut output = std::io::stdout();
            replay::replay(&replay_args.input_file, &mut output)
                .map(|summary| {
                    tracing::info!(
                        payments = summary.payments,
                        claims = summary.claims,
                        skipped = summary.skipped,
                        fraud_reports = summary.fraud_reports,
                        "Replay complete"
                    );
                })
                .map_err(anyhow::Error::from)
        }
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        process::exit(1);
    }
}
