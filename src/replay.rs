//! Offline replay of payment history
//!
//! Streams a CSV file of payments and claims through a [`FraudEngine`] in file
//! order and writes the resulting fraud reports as CSV. Notifications are
//! disabled during replay.
//!
//! Malformed rows, rejected payments, and claims against unknown transactions
//! are logged and skipped; processing continues with the next row.

use crate::core::FraudEngine;
use crate::io::{write_reports_csv, ReplayReader, ReplayRecord};
use crate::types::FraudError;
use std::io::Write;
use std::path::Path;

/// Counters describing a completed replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub payments: usize,
    pub claims: usize,
    pub skipped: usize,
    pub fraud_reports: usize,
}

/// Replay `input_path` and write fraud reports to `output`
///
/// # Errors
///
/// Returns an error only for fatal conditions: the input cannot be opened or
/// the output cannot be written.
pub fn replay(input_path: &Path, output: &mut dyn Write) -> Result<ReplaySummary, FraudError> {
    let engine = FraudEngine::without_notifications();
    let reader = ReplayReader::new(input_path)?;
    let mut summary = ReplaySummary::default();

    for result in reader {
        match result {
            Ok(ReplayRecord::Payment(request)) => {
                engine.submit_payment(request);
                summary.payments += 1;
            }
            Ok(ReplayRecord::Claim(id)) => match engine.mark_claimed(id) {
                Ok(_) => summary.claims += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping claim");
                    summary.skipped += 1;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Skipping replay record");
                summary.skipped += 1;
            }
        }
    }

    let reports = engine.fraud_reports();
    summary.fraud_reports = reports.len();
    write_reports_csv(&reports, output)?;

    Ok(summary)
}
