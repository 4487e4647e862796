//! Fraud alert notifications
//!
//! This module delivers fraud reports to a human reviewer. Delivery is always
//! asynchronous and best-effort: failures are logged and never reach the
//! submission path.
//!
//! # Components
//!
//! - [`Notifier`] - Outbound channel abstraction
//! - [`Alert`] - Human-readable message built from a report
//! - `dispatcher` - Fire-and-forget delivery with timeout and bounded retry
//! - `mail_relay` - HTTP mail relay implementation of [`Notifier`]

pub mod dispatcher;
pub mod mail_relay;

pub use dispatcher::{DispatchPolicy, NotificationDispatcher};
pub use mail_relay::{MailRelayConfig, MailRelayNotifier};

use crate::types::{FraudError, FraudReport};
use async_trait::async_trait;

/// Human-readable fraud alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

impl Alert {
    /// Build an alert whose body is the pretty-printed report
    pub fn from_report(report: &FraudReport) -> Self {
        let body = serde_json::to_string_pretty(report)
            .unwrap_or_else(|_| format!("{:#?}", report));

        Alert {
            subject: format!("Fraud Alert: {}", report.fraud_type),
            body,
        }
    }
}

/// Outbound channel that delivers alerts to a reviewer
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt a single delivery of `alert`
    async fn notify(&self, alert: &Alert) -> Result<(), FraudError>;
}
