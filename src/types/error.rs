//! Error types for the fraud-scoring engine
//!
//! This module defines all error types that can occur while ingesting and
//! scoring transactions, delivering fraud alerts, or replaying CSV files.
//!
//! # Error Categories
//!
//! - **Input Errors**: Missing or malformed transaction fields
//! - **Ledger Errors**: Claims against unknown transactions
//! - **Notification Errors**: Alert delivery failures and missing configuration
//! - **File I/O Errors**: Replay input not found, unreadable, or malformed

use crate::types::TransactionId;
use thiserror::Error;

/// Main error type for the fraud-scoring engine
///
/// No variant is fatal to a running server: validation errors are surfaced
/// to the caller, notification errors are logged by the dispatcher, and
/// configuration errors only disable alert delivery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FraudError {
    /// A required transaction field is missing or malformed
    ///
    /// Raised before any state mutation, so a rejected submission leaves
    /// the ledger and report store untouched.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field as it appears on the wire
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Transaction not found in the ledger
    #[error("Transaction {id} not found for {operation}")]
    TransactionNotFound {
        /// Ledger identity that was not found
        id: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// A fraud alert could not be delivered to the reviewer
    ///
    /// This is a recoverable error - the report stays recorded and the
    /// submission result is unaffected.
    #[error("Notification delivery failed after {attempts} attempt(s): {message}")]
    NotificationDelivery {
        /// Number of attempts made before giving up
        attempts: u32,
        /// Description of the last failure
        message: String,
    },

    /// A notification setting is absent at startup
    ///
    /// Degrades alert delivery to a no-op; scoring keeps running.
    #[error("Missing configuration: {setting}")]
    ConfigurationMissing {
        /// Name of the missing setting
        setting: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// The malformed record is skipped and replay continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for FraudError {
    fn from(error: std::io::Error) -> Self {
        FraudError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for FraudError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FraudError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl FraudError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        FraudError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: TransactionId, operation: &str) -> Self {
        FraudError::TransactionNotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Create a NotificationDelivery error
    pub fn notification_delivery(attempts: u32, message: impl Into<String>) -> Self {
        FraudError::NotificationDelivery {
            attempts,
            message: message.into(),
        }
    }

    /// Create a ConfigurationMissing error
    pub fn configuration_missing(setting: &str) -> Self {
        FraudError::ConfigurationMissing {
            setting: setting.to_string(),
        }
    }

    /// Whether this error came from caller input rather than the system
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FraudError::InvalidInput { .. })
    }
}
