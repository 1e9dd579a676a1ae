//! CSV ingestion: conversion helpers, the positional record parser, the
//! matching writer and the fail-fast import pipeline.

pub mod conversion;
pub mod csv_parser;
pub mod csv_writer;
pub mod import;
pub mod schema;

pub use csv_parser::{CsvRecordParser, ParsedRecords, RowErrorPolicy, RowFields};
pub use csv_writer::write_records;
pub use import::{import_records, ImportPipeline, ImportSummary};
pub use schema::CsvRecord;
