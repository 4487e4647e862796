//! Append-only store of fraud reports

use crate::types::FraudReport;

/// Ordered history of fraud reports, in the order they were raised
#[derive(Debug, Default)]
pub struct FraudReportStore {
    reports: Vec<FraudReport>,
}

impl FraudReportStore {
    pub fn new() -> Self {
        FraudReportStore {
            reports: Vec::new(),
        }
    }

    pub fn append(&mut self, report: FraudReport) {
        self.reports.push(report);
    }

    pub fn all(&self) -> &[FraudReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
