//! Streaming CSV reader for replay input
//!
//! Provides an iterator over replay records from a CSV file. Delegates format
//! concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator,
//!   tagged with the CSV line number
//!
//! Records are read one at a time; the file is never loaded into memory.

use crate::io::csv_format::{convert_csv_record, CsvRecord, ReplayRecord};
use crate::types::FraudError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Replay CSV reader
///
/// ```no_run
/// use fraud_scoring_engine::io::ReplayReader;
/// use std::path::Path;
///
/// let reader = ReplayReader::new(Path::new("payments.csv")).unwrap();
/// let records: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Successfully parsed {} records", records.len());
/// ```
#[derive(Debug)]
pub struct ReplayReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl ReplayReader {
    /// Open a replay CSV file
    ///
    /// The CSV reader trims whitespace from all fields and allows flexible
    /// field counts, so claim rows may omit trailing payment columns.
    pub fn new(path: &Path) -> Result<Self, FraudError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FraudError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => FraudError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for ReplayReader {
    type Item = Result<ReplayRecord, FraudError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.reader.deserialize::<CsvRecord>().next()?;
        // Line 1 is the header
        self.line_num += 1;
        let line = self.line_num;

        match result {
            Ok(csv_record) => Some(convert_csv_record(csv_record).map_err(|e| {
                FraudError::ParseError {
                    line: Some(line),
                    message: e.to_string(),
                }
            })),
            Err(e) => Some(Err(FraudError::ParseError {
                line: Some(line),
                message: e.to_string(),
            })),
        }
    }
}
