//! Positional CSV parser for stat exports
//!
//! Row 0 is a header and is discarded. Every later row is converted column
//! by column through [`RowFields`] into a typed record; see
//! [`super::schema`] for the column layout of each record kind.
//!
//! Rows are numbered over non-blank records only: empty lines and lines
//! holding nothing but whitespace or empty fields are dropped before
//! numbering, so a reported row is the data row index, not the file line.

use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{debug, warn};

use super::conversion::{as_percentage, parse_float, parse_integer, round_to, truncate_to_int};
use super::schema::CsvRecord;
use crate::errors::{IngestError, IngestResult};

/// What to do with a row that fails conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Abort the whole parse with the row's error
    #[default]
    Fail,
    /// Log the row's error and continue with the next row
    Skip,
}

/// Records parsed from one source
#[derive(Debug, Clone)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    /// Rows dropped under [`RowErrorPolicy::Skip`]
    pub skipped_rows: usize,
}

/// Typed access to the fields of one data row
pub struct RowFields<'a> {
    record: &'a csv::StringRecord,
    row: usize,
    headers: &'static [&'static str],
}

impl<'a> RowFields<'a> {
    fn raw(&self, column: usize) -> &'a str {
        self.record.get(column).unwrap_or("")
    }

    fn field_name(&self, column: usize) -> &'static str {
        self.headers.get(column).copied().unwrap_or("?")
    }

    fn malformed(&self, column: usize, expected: &'static str) -> IngestError {
        IngestError::malformed(
            self.row,
            column,
            self.field_name(column),
            self.raw(column),
            expected,
        )
    }

    pub fn text(&self, column: usize) -> String {
        self.raw(column).to_string()
    }

    pub fn integer(&self, column: usize) -> IngestResult<u32> {
        parse_integer(self.raw(column)).map_err(|_| self.malformed(column, "integer"))
    }

    /// A float kept exactly as parsed
    pub fn float(&self, column: usize) -> IngestResult<f64> {
        parse_float(self.raw(column)).ok_or_else(|| self.malformed(column, "number"))
    }

    /// A float rounded to `places` decimals
    pub fn decimal(&self, column: usize, places: u32) -> IngestResult<f64> {
        Ok(round_to(self.float(column)?, places))
    }

    /// A fraction converted to a percentage, then rounded to `places` decimals
    pub fn percentage(&self, column: usize, places: u32) -> IngestResult<f64> {
        Ok(round_to(as_percentage(self.float(column)?), places))
    }

    /// A float with its fractional part dropped
    pub fn truncated(&self, column: usize) -> IngestResult<i32> {
        truncate_to_int(self.float(column)?).ok_or_else(|| self.malformed(column, "32-bit integer"))
    }
}

/// Parser turning a CSV source into typed records
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRecordParser {
    policy: RowErrorPolicy,
}

impl CsvRecordParser {
    pub fn new(policy: RowErrorPolicy) -> Self {
        Self { policy }
    }

    /// Parse every data row of `reader` into records of type `T`
    pub fn parse<T: CsvRecord, R: Read>(&self, reader: R) -> IngestResult<ParsedRecords<T>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped_rows = 0;
        let mut next_row = 0;

        for result in csv_reader.byte_records() {
            let raw = result?;
            if raw.iter().all(|field| field.is_empty()) {
                continue;
            }

            let row = next_row;
            next_row += 1;
            if row == 0 {
                continue;
            }

            match Self::convert_row::<T>(raw, row) {
                Ok(parsed) => records.push(parsed),
                Err(e) => match self.policy {
                    RowErrorPolicy::Fail => return Err(e),
                    RowErrorPolicy::Skip => {
                        warn!("Skipping {} row: {}", T::KIND, e);
                        skipped_rows += 1;
                    }
                },
            }
        }

        debug!(
            "Parsed {} {} rows ({} skipped)",
            records.len(),
            T::KIND,
            skipped_rows
        );

        Ok(ParsedRecords {
            records,
            skipped_rows,
        })
    }

    fn convert_row<T: CsvRecord>(raw: csv::ByteRecord, row: usize) -> IngestResult<T> {
        let record = csv::StringRecord::from_byte_record(raw).map_err(|e| IngestError::InvalidUtf8 {
            row,
            column: e.utf8_error().field(),
        })?;

        let expected = T::HEADERS.len();
        if record.len() < expected {
            return Err(IngestError::MissingColumns {
                row,
                expected,
                found: record.len(),
            });
        }

        T::from_fields(&RowFields {
            record: &record,
            row,
            headers: T::HEADERS,
        })
    }
}
