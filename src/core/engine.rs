//! Transaction ingestion engine
//!
//! This module provides the FraudEngine that orchestrates ingestion by
//! coordinating between the fee calculator, Ledger, FraudScorer, and
//! FraudReportStore, then handing reports to the notification dispatcher.
//!
//! # Critical Section
//!
//! Appending a candidate, evaluating it, and recording its report happen under
//! one lock. No other submission can append between a candidate's append and
//! its evaluation, so every verdict is computed against a well-defined ledger
//! state. Validation and fee computation run before the lock; notification
//! dispatch runs after it is released.

use crate::core::fees::compute_fees;
use crate::core::ledger::Ledger;
use crate::core::report_store::FraudReportStore;
use crate::core::scorer::FraudScorer;
use crate::notify::NotificationDispatcher;
use crate::types::{
    FraudError, FraudReport, PaymentRequest, RawSubmission, Transaction, TransactionId,
};
use parking_lot::Mutex;
use serde::Serialize;

/// Result of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    /// Ledger identity assigned to the transaction
    pub transaction_id: TransactionId,
    /// Whether the scorer flagged the transaction
    pub fraud_detected: bool,
}

/// State guarded by the engine's single lock
#[derive(Debug, Default)]
struct Books {
    ledger: Ledger,
    reports: FraudReportStore,
}

/// Ingestion orchestrator owning the ledger and report store
///
/// The engine is `Send + Sync`; share it behind an `Arc` to serve concurrent
/// submissions.
#[derive(Debug)]
pub struct FraudEngine {
    books: Mutex<Books>,
    scorer: FraudScorer,
    dispatcher: NotificationDispatcher,
}

impl FraudEngine {
    /// Create an engine that hands fraud reports to `dispatcher`
    pub fn new(dispatcher: NotificationDispatcher) -> Self {
        FraudEngine {
            books: Mutex::new(Books::default()),
            scorer: FraudScorer::new(),
            dispatcher,
        }
    }

    /// Create an engine that records reports without notifying anyone
    pub fn without_notifications() -> Self {
        Self::new(NotificationDispatcher::disabled())
    }

    /// Validate and ingest a raw submission
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::InvalidInput`] if any field is missing or
    /// malformed. Nothing is recorded in that case.
    pub fn submit(&self, raw: RawSubmission) -> Result<SubmitOutcome, FraudError> {
        let request = PaymentRequest::try_from(raw).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected transaction submission");
        })?;

        Ok(self.submit_payment(request))
    }

    /// Ingest an already validated payment
    ///
    /// Always records exactly one ledger entry. Notification failures are
    /// handled by the dispatcher and never surface here.
    pub fn submit_payment(&self, request: PaymentRequest) -> SubmitOutcome {
        let fees = compute_fees(request.amount());

        let (transaction, report) = {
            let mut books = self.books.lock();

            let transaction = books.ledger.append(request, fees);
            let report = self
                .scorer
                .evaluate(&transaction, &books.ledger)
                .map(|verdict| FraudReport::new(verdict, transaction.clone()));

            if let Some(report) = &report {
                books.reports.append(report.clone());
            }

            (transaction, report)
        };

        tracing::debug!(
            transaction_id = transaction.id,
            payer_id = %transaction.payer_id,
            "Transaction recorded"
        );

        let fraud_detected = match report {
            Some(report) => {
                tracing::warn!(
                    transaction_id = transaction.id,
                    ip = %report.evidence.ip,
                    device_id = %report.evidence.device_id,
                    same_ip = report.evidence.same_ip,
                    same_device = report.evidence.same_device,
                    claim_count = report.evidence.claim_count,
                    "Suspicious pattern detected"
                );
                self.dispatcher.dispatch(&report);
                true
            }
            None => false,
        };

        SubmitOutcome {
            transaction_id: transaction.id,
            fraud_detected,
        }
    }

    /// Mark a recorded transaction as claimed
    ///
    /// Hook for the external claims process. Claimed entries feed the
    /// repeat-claim signal for later submissions by the same payer.
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::TransactionNotFound`] if `id` is not in the ledger.
    pub fn mark_claimed(&self, id: TransactionId) -> Result<Transaction, FraudError> {
        let mut books = self.books.lock();
        let transaction = books.ledger.mark_claimed(id)?.clone();

        tracing::info!(transaction_id = id, payer_id = %transaction.payer_id, "Transaction claimed");
        Ok(transaction)
    }

    /// Snapshot of the full ledger in arrival order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.books.lock().ledger.all().to_vec()
    }

    /// Snapshot of all fraud reports in the order raised
    pub fn fraud_reports(&self) -> Vec<FraudReport> {
        self.books.lock().reports.all().to_vec()
    }

    pub fn transaction_count(&self) -> usize {
        self.books.lock().ledger.len()
    }

    pub fn report_count(&self) -> usize {
        self.books.lock().reports.len()
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }
}

impl Default for FraudEngine {
    fn default() -> Self {
        Self::without_notifications()
    }
}
