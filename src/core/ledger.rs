//! Append-only transaction ledger
//!
//! This module provides the Ledger component that records every accepted
//! transaction in arrival order. The ledger is the single source of truth for
//! the history-based fraud checks.
//!
//! # Ordering
//!
//! Entries are never reordered or removed. The ledger assigns each entry a
//! sequential identity and a timestamp at append time.
//!
//! # Mutation
//!
//! Besides `append`, the only mutation is `mark_claimed`, which the claims
//! process uses to flag an existing entry by identity.

use crate::types::{Fees, FraudError, PaymentRequest, Transaction, TransactionId};
use chrono::Utc;

/// Ordered, append-only history of recorded transactions
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Ledger {
            entries: Vec::new(),
        }
    }

    /// Record a validated payment with its derived fees
    ///
    /// The new entry starts unclaimed and receives the next identity and the
    /// current time. Returns a copy of the recorded transaction.
    pub fn append(&mut self, request: PaymentRequest, fees: Fees) -> Transaction {
        let transaction = Transaction {
            id: self.entries.len() as TransactionId + 1,
            amount: request.amount(),
            ip: request.ip().to_string(),
            device_id: request.device_id().to_string(),
            payer_id: request.payer_id().to_string(),
            insurance_fee: fees.insurance_fee,
            platform_fee: fees.platform_fee,
            seller_share: fees.seller_share,
            claimed: false,
            timestamp: Utc::now(),
        };

        self.entries.push(transaction.clone());
        transaction
    }

    /// The last `n` entries in arrival order
    ///
    /// Returns the whole ledger when it holds fewer than `n` entries.
    pub fn recent_window(&self, n: usize) -> &[Transaction] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// The full ledger in arrival order
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    /// Look up an entry by identity
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    /// Flag an existing entry as claimed
    ///
    /// Marking an already-claimed entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::TransactionNotFound`] if no entry has this identity.
    pub fn mark_claimed(&mut self, id: TransactionId) -> Result<&Transaction, FraudError> {
        let index = usize::try_from(id)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .filter(|&i| i < self.entries.len())
            .ok_or_else(|| FraudError::transaction_not_found(id, "claim"))?;

        let entry = &mut self.entries[index];
        entry.claimed = true;
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fees::compute_fees;
    use rust_decimal::Decimal;

    fn record(ledger: &mut Ledger, ip: &str) -> Transaction {
        let request = PaymentRequest::new(Decimal::new(100, 0), ip, "device", "payer").unwrap();
        let fees = compute_fees(request.amount());
        ledger.append(request, fees)
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut ledger = Ledger::new();

        let first = record(&mut ledger, "10.0.0.1");
        let second = record(&mut ledger, "10.0.0.2");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(ledger.len(), 2);
        assert!(!first.claimed);
        assert_eq!(first.insurance_fee, Decimal::new(2, 0));
    }

    #[test]
    fn test_all_preserves_arrival_order() {
        let mut ledger = Ledger::new();
        for i in 0..5 {
            record(&mut ledger, &format!("10.0.0.{}", i));
        }

        let ips: Vec<&str> = ledger.all().iter().map(|tx| tx.ip.as_str()).collect();
        assert_eq!(
            ips,
            vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]
        );
    }

    #[test]
    fn test_recent_window_shorter_history() {
        let mut ledger = Ledger::new();
        assert!(ledger.recent_window(20).is_empty());

        record(&mut ledger, "a");
        record(&mut ledger, "b");

        assert_eq!(ledger.recent_window(20).len(), 2);
    }

    #[test]
    fn test_recent_window_returns_last_entries() {
        let mut ledger = Ledger::new();
        for i in 1..=25 {
            record(&mut ledger, &i.to_string());
        }

        let window = ledger.recent_window(20);
        assert_eq!(window.len(), 20);
        assert_eq!(window.first().unwrap().id, 6);
        assert_eq!(window.last().unwrap().id, 25);
    }

    #[test]
    fn test_get_by_id() {
        let mut ledger = Ledger::new();
        record(&mut ledger, "a");
        record(&mut ledger, "b");

        assert_eq!(ledger.get(2).unwrap().ip, "b");
        assert!(ledger.get(0).is_none());
        assert!(ledger.get(3).is_none());
    }

    #[test]
    fn test_mark_claimed_success() {
        let mut ledger = Ledger::new();
        record(&mut ledger, "a");

        let claimed = ledger.mark_claimed(1).unwrap();
        assert!(claimed.claimed);
        assert!(ledger.get(1).unwrap().claimed);

        // Idempotent
        assert!(ledger.mark_claimed(1).is_ok());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_mark_claimed_nonexistent_transaction() {
        let mut ledger = Ledger::new();
        record(&mut ledger, "a");

        for id in [0, 2, 999] {
            let result = ledger.mark_claimed(id);
            assert!(matches!(
                result.unwrap_err(),
                FraudError::TransactionNotFound { .. }
            ));
        }
    }
}
