//! Fraud verdict and report types

use super::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification label attached to a fraud verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FraudType {
    /// Velocity or repeat-claim heuristics exceeded their thresholds
    #[serde(rename = "Suspicious Pattern Detected")]
    SuspiciousPattern,
}

impl FraudType {
    pub fn label(&self) -> &'static str {
        match self {
            FraudType::SuspiciousPattern => "Suspicious Pattern Detected",
        }
    }
}

impl fmt::Display for FraudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of the signal values that triggered a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub ip: String,
    pub device_id: String,
    /// Entries in the recent window sharing the candidate's IP
    #[serde(rename = "sameIP")]
    pub same_ip: usize,
    /// Entries in the recent window sharing the candidate's device
    pub same_device: usize,
    /// Claimed entries in the whole ledger for the candidate's payer
    pub claim_count: usize,
}

/// Output of a single scorer evaluation that fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudVerdict {
    pub fraud_type: FraudType,
    pub evidence: Evidence,
}

/// Recorded fraud report
///
/// Holds a value copy of the triggering transaction, not a live link, so a
/// later claim on that transaction does not alter the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudReport {
    pub fraud_type: FraudType,
    pub evidence: Evidence,
    pub transaction: Transaction,
    pub timestamp: DateTime<Utc>,
}

impl FraudReport {
    /// Build a report from a verdict and the transaction it was computed for
    pub fn new(verdict: FraudVerdict, transaction: Transaction) -> Self {
        Self {
            fraud_type: verdict.fraud_type,
            evidence: verdict.evidence,
            transaction,
            timestamp: Utc::now(),
        }
    }
}
