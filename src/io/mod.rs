//! I/O module
//!
//! Handles CSV parsing and output for offline replay.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `replay_reader` - Streaming CSV reader with iterator interface

pub mod csv_format;
pub mod replay_reader;

pub use csv_format::{convert_csv_record, write_reports_csv, CsvRecord, ReplayRecord};
pub use replay_reader::ReplayReader;
