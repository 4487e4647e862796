//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Submissions, validated requests, fees, and recorded transactions
//! - `report`: Fraud verdicts, evidence, and reports
//! - `error`: Error types for the fraud-scoring engine

pub mod error;
pub mod report;
pub mod transaction;

pub use error::FraudError;
pub use report::{Evidence, FraudReport, FraudType, FraudVerdict};
pub use transaction::{Fees, PaymentRequest, RawSubmission, Transaction, TransactionId};
