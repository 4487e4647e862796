//! CSV format handling for replay input and fraud report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to replay records
//! - Fraud report output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{FraudError, FraudReport, PaymentRequest, TransactionId};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, tx, amount, ip, device_id, payer_id.
/// Payments leave `tx` empty; claims only carry `type` and `tx`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub tx: Option<TransactionId>,
    pub amount: Option<String>,
    pub ip: Option<String>,
    pub device_id: Option<String>,
    pub payer_id: Option<String>,
}

/// A replay instruction
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayRecord {
    /// Submit a payment to the engine
    Payment(PaymentRequest),
    /// Mark an earlier ledger entry as claimed
    Claim(TransactionId),
}

/// Convert a CsvRecord to a ReplayRecord
///
/// # Errors
///
/// Returns [`FraudError::InvalidInput`] for unknown record types, claims
/// without a `tx`, and payments with a missing or malformed field.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<ReplayRecord, FraudError> {
    match csv_record.record_type.to_lowercase().as_str() {
        "payment" => {
            let amount_text = non_empty(csv_record.amount)
                .ok_or_else(|| FraudError::invalid_input("amount", "is required"))?;
            let amount = PaymentRequest::parse_amount(&amount_text)?;

            let request = PaymentRequest::new(
                amount,
                csv_record.ip.unwrap_or_default(),
                csv_record.device_id.unwrap_or_default(),
                csv_record.payer_id.unwrap_or_default(),
            )?;
            Ok(ReplayRecord::Payment(request))
        }
        "claim" => csv_record
            .tx
            .map(ReplayRecord::Claim)
            .ok_or_else(|| FraudError::invalid_input("tx", "is required for claims")),
        other => Err(FraudError::invalid_input(
            "type",
            &format!("unknown record type '{}'", other),
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Write fraud reports in CSV format
///
/// Columns: tx, payer_id, ip, device_id, same_ip, same_device, claim_count.
/// Reports are written in the order they were raised.
pub fn write_reports_csv(
    reports: &[FraudReport],
    output: &mut dyn Write,
) -> Result<(), FraudError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "tx",
        "payer_id",
        "ip",
        "device_id",
        "same_ip",
        "same_device",
        "claim_count",
    ])?;

    for report in reports {
        writer.write_record(&[
            report.transaction.id.to_string(),
            report.transaction.payer_id.clone(),
            report.evidence.ip.clone(),
            report.evidence.device_id.clone(),
            report.evidence.same_ip.to_string(),
            report.evidence.same_device.to_string(),
            report.evidence.claim_count.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
