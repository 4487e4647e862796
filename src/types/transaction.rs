//! Transaction-related types for the fraud-scoring engine
//!
//! This module defines the raw submission payload, the validated payment
//! request, the derived fee breakdown, and the recorded ledger transaction.

use super::error::FraudError;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Ledger identity of a recorded transaction
///
/// Assigned sequentially by the ledger starting at 1, in arrival order.
pub type TransactionId = u64;

/// Unvalidated transaction submission as received from a caller
///
/// Every field is kept as a raw JSON value so that type errors (for example
/// `"amount": "abc"`) surface as [`FraudError::InvalidInput`] instead of a
/// deserialization failure at the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    pub amount: Option<Value>,
    pub ip: Option<Value>,
    pub device_id: Option<Value>,
    pub payer_id: Option<Value>,
}

/// Validated payment ready to be recorded
///
/// Construction guarantees a positive amount and non-empty identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    amount: Decimal,
    ip: String,
    device_id: String,
    payer_id: String,
}

impl PaymentRequest {
    /// Create a validated payment request
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::InvalidInput`] if the amount is zero or negative,
    /// or if any identifier is empty or whitespace-only.
    pub fn new(
        amount: Decimal,
        ip: impl Into<String>,
        device_id: impl Into<String>,
        payer_id: impl Into<String>,
    ) -> Result<Self, FraudError> {
        if amount <= Decimal::ZERO {
            return Err(FraudError::invalid_input(
                "amount",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            amount,
            ip: require_identifier("ip", ip.into())?,
            device_id: require_identifier("deviceId", device_id.into())?,
            payer_id: require_identifier("payerId", payer_id.into())?,
        })
    }

    /// Parse an amount from its textual form (used by CSV replay)
    pub fn parse_amount(text: &str) -> Result<Decimal, FraudError> {
        Decimal::from_str(text.trim())
            .or_else(|_| Decimal::from_scientific(text.trim()))
            .map_err(|_| FraudError::invalid_input("amount", "must be a number"))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }
}

impl TryFrom<RawSubmission> for PaymentRequest {
    type Error = FraudError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        let amount = json_amount(raw.amount)?;
        let ip = json_string("ip", raw.ip)?;
        let device_id = json_string("deviceId", raw.device_id)?;
        let payer_id = json_string("payerId", raw.payer_id)?;

        PaymentRequest::new(amount, ip, device_id, payer_id)
    }
}

fn json_amount(value: Option<Value>) -> Result<Decimal, FraudError> {
    let number = match value {
        Some(Value::Number(number)) => number,
        Some(_) => return Err(FraudError::invalid_input("amount", "must be a number")),
        None => return Err(FraudError::invalid_input("amount", "is required")),
    };

    let float = number
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FraudError::invalid_input("amount", "must be a finite number"))?;

    // Out-of-range floats have no decimal representation; tiny positive
    // floats round down to zero
    let amount = Decimal::from_f64(float)
        .ok_or_else(|| FraudError::invalid_input("amount", "is out of range"))?;
    if float > 0.0 && amount.is_zero() {
        return Err(FraudError::invalid_input("amount", "is out of range"));
    }

    Ok(amount)
}

fn json_string(field: &str, value: Option<Value>) -> Result<String, FraudError> {
    match value {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(FraudError::invalid_input(field, "must be a string")),
        None => Err(FraudError::invalid_input(field, "is required")),
    }
}

fn require_identifier(field: &str, value: String) -> Result<String, FraudError> {
    if value.trim().is_empty() {
        return Err(FraudError::invalid_input(field, "must not be empty"));
    }
    Ok(value)
}

/// Fee breakdown derived from a transaction amount
///
/// `platform_fee + seller_share == insurance_fee` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fees {
    pub insurance_fee: Decimal,
    pub platform_fee: Decimal,
    pub seller_share: Decimal,
}

/// A transaction recorded in the ledger
///
/// Immutable once recorded, except for the `claimed` flag which the claims
/// process may set later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Ledger identity (1-based arrival order)
    pub id: TransactionId,

    /// Positive payment amount
    pub amount: Decimal,

    /// Originating network address
    pub ip: String,

    /// Originating device identifier
    pub device_id: String,

    /// Paying party identifier
    pub payer_id: String,

    /// Insurance fee (2% of the amount)
    pub insurance_fee: Decimal,

    /// Platform's share of the insurance fee (25%)
    pub platform_fee: Decimal,

    /// Seller's share of the insurance fee (75%)
    pub seller_share: Decimal,

    /// Whether an insurance claim was made against this transaction
    pub claimed: bool,

    /// Instant the ledger recorded this transaction
    pub timestamp: DateTime<Utc>,
}
