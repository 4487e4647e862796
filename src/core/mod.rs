//! Core business logic module
//!
//! This module contains the fraud-scoring components:
//! - `fees` - Insurance fee calculation and split
//! - `ledger` - Append-only transaction history
//! - `scorer` - History-based fraud evaluation
//! - `report_store` - Append-only fraud report history
//! - `engine` - Ingestion orchestration and the scoring critical section

pub mod engine;
pub mod fees;
pub mod ledger;
pub mod report_store;
pub mod scorer;

pub use engine::{FraudEngine, SubmitOutcome};
pub use fees::compute_fees;
pub use ledger::Ledger;
pub use report_store::FraudReportStore;
pub use scorer::FraudScorer;
