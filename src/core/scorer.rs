//! Fraud scoring
//!
//! Evaluates a freshly recorded transaction against the ledger using three
//! history-based signals:
//!
//! - **IP velocity**: entries in the recent window sharing the candidate's IP
//! - **Device velocity**: entries in the recent window sharing the candidate's device
//! - **Repeat claims**: claimed entries anywhere in the ledger for the candidate's payer
//!
//! The candidate is already a ledger member when it is evaluated, so every
//! count includes the candidate itself when its own fields match.
//!
//! The window size and thresholds are fixed. Evaluation reads no clock and no
//! randomness: identical ledger state and candidate always produce the same
//! verdict.

use crate::core::ledger::Ledger;
use crate::types::{Evidence, FraudType, FraudVerdict, Transaction};

/// Number of most recent ledger entries used for velocity checks
pub const RECENT_WINDOW: usize = 20;

/// Fires when more than this many window entries share the candidate's IP
pub const SAME_IP_LIMIT: usize = 3;

/// Fires when more than this many window entries share the candidate's device
pub const SAME_DEVICE_LIMIT: usize = 3;

/// Fires when the payer has more than this many claimed transactions
pub const PAYER_CLAIM_LIMIT: usize = 2;

/// Stateless evaluator for suspicious transaction patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudScorer;

impl FraudScorer {
    pub fn new() -> Self {
        FraudScorer
    }

    /// Evaluate `candidate` against `ledger`
    ///
    /// Must be called after `candidate` has been appended to `ledger`.
    ///
    /// # Returns
    ///
    /// * `Some(FraudVerdict)` - At least one signal exceeded its threshold
    /// * `None` - No suspicious pattern detected
    pub fn evaluate(&self, candidate: &Transaction, ledger: &Ledger) -> Option<FraudVerdict> {
        let window = ledger.recent_window(RECENT_WINDOW);

        let same_ip = window.iter().filter(|tx| tx.ip == candidate.ip).count();
        let same_device = window
            .iter()
            .filter(|tx| tx.device_id == candidate.device_id)
            .count();
        let claim_count = ledger
            .all()
            .iter()
            .filter(|tx| tx.payer_id == candidate.payer_id && tx.claimed)
            .count();

        let fired = same_ip > SAME_IP_LIMIT
            || same_device > SAME_DEVICE_LIMIT
            || claim_count > PAYER_CLAIM_LIMIT;

        if !fired {
            return None;
        }

        Some(FraudVerdict {
            fraud_type: FraudType::SuspiciousPattern,
            evidence: Evidence {
                ip: candidate.ip.clone(),
                device_id: candidate.device_id.clone(),
                same_ip,
                same_device,
                claim_count,
            },
        })
    }
}
