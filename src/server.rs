//! HTTP service bootstrap
//!
//! Wires configuration into a [`FraudEngine`], serves the router, and drains
//! in-flight fraud alerts on shutdown.

use crate::api;
use crate::cli::ServeArgs;
use crate::core::FraudEngine;
use crate::notify::{MailRelayNotifier, NotificationDispatcher};
use anyhow::Context;
use std::sync::Arc;

/// Build the notification dispatcher from settings
///
/// Missing or unusable settings are logged as a warning and yield a disabled
/// dispatcher; fraud detection keeps running either way.
pub fn build_dispatcher(args: &ServeArgs) -> NotificationDispatcher {
    let config = match args.mail_relay_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Fraud alert notifications disabled");
            return NotificationDispatcher::disabled();
        }
    };

    let policy = args.dispatch_policy();
    match MailRelayNotifier::new(config, policy.timeout) {
        Ok(notifier) => {
            tracing::info!(
                recipient = %notifier.config().recipient,
                sender = %notifier.config().sender,
                "Fraud alert notifications enabled"
            );
            NotificationDispatcher::new(Arc::new(notifier), policy)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Fraud alert notifications disabled");
            NotificationDispatcher::disabled()
        }
    }
}

/// Serve the HTTP API until interrupted
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let engine = Arc::new(FraudEngine::new(build_dispatcher(&args)));
    let app = api::router(Arc::clone(&engine));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    tracing::info!("Fraud scoring service listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let pending = engine.dispatcher().pending();
    if pending > 0 {
        tracing::info!(pending, "Waiting for in-flight fraud alerts");
    }
    engine.dispatcher().wait_idle().await;

    tracing::info!(
        transactions = engine.transaction_count(),
        fraud_reports = engine.report_count(),
        "Fraud scoring service stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
