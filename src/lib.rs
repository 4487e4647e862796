//! Fraud Scoring Engine Library
//! # Overview
//!
//! This library ingests payment transactions, records them in an in-memory
//! ledger, and flags suspicious activity using recent-history heuristics. Fraud
//! reports are handed to a reviewer through a best-effort notification channel.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, FraudReport, errors)
//! - [`core`] - Business logic components:
//!   - [`core::fees`] - Insurance fee calculation
//!   - [`core::ledger`] - Append-only transaction history
//!   - [`core::scorer`] - Fraud evaluation against the ledger
//!   - [`core::report_store`] - Append-only fraud report history
//!   - [`core::engine`] - Ingestion orchestration
//! - [`notify`] - Fire-and-forget fraud alert delivery
//! - [`api`] - HTTP transport
//! - [`cli`] - CLI arguments and configuration
//! - [`io`] / [`replay`] - Offline CSV replay
//!
//! # Fraud Signals
//!
//! A transaction is flagged when any of these exceed their threshold:
//!
//! - **IP velocity**: more than 3 of the last 20 ledger entries share its IP
//! - **Device velocity**: more than 3 of the last 20 ledger entries share its device
//! - **Repeat claims**: its payer has more than 2 claimed transactions in the ledger
//!
//! # Fees
//!
//! Each transaction carries an insurance fee of 2% of its amount, split 25%
//! to the platform and 75% to the seller.

pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod notify;
pub mod replay;
pub mod server;
pub mod types;

pub use crate::core::{FraudEngine, FraudReportStore, FraudScorer, Ledger, SubmitOutcome};
pub use crate::notify::{NotificationDispatcher, Notifier};
pub use crate::types::{
    Evidence, FraudError, FraudReport, FraudType, FraudVerdict, PaymentRequest, RawSubmission,
    Transaction, TransactionId,
};
