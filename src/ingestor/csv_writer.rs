//! CSV export
//!
//! The inverse of [`super::CsvRecordParser`]: records are written with the
//! import header row and column order, and percentage columns go back out as
//! fractions so an exported file imports to the same values.

use std::io::Write;

use super::schema::CsvRecord;
use crate::errors::IngestResult;

/// Write `records` as CSV in the same column order the parser reads
pub fn write_records<T: CsvRecord, W: Write>(writer: W, records: &[T]) -> IngestResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(T::HEADERS)?;
    for record in records {
        csv_writer.write_record(record.to_fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
