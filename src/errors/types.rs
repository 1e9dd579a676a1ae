//! Error type definitions for the baseball stats service
//!
//! The hierarchy mirrors the layers of the application: ingestion errors
//! come from the CSV parser, repository errors from the persistence layer,
//! import errors combine the two for the batch pipeline, and `AppError` is
//! what the web layer turns into HTTP responses.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// CSV ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Batch import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },
}

/// Repository layer specific errors
///
/// This is the persistence error surfaced verbatim by the import pipeline.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database connection failures
    #[error("Database connection failed: {message}")]
    ConnectionFailed { message: String },

    /// SQL query execution failures
    #[error("Query failed: {query} - {message}")]
    QueryFailed { query: String, message: String },

    /// Constraint violations (unique, check, not null)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },

    /// Migration failures
    #[error("Migration failed: {message}")]
    MigrationFailed { message: String },
}

/// Errors raised while reading a stats CSV into typed records
#[derive(Error, Debug)]
pub enum IngestError {
    /// The source file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row is shorter than the schema requires
    #[error("Row {row}: expected {expected} columns, found {found}")]
    MissingColumns {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A data row holds bytes that are not UTF-8
    #[error("Row {row}, column {column}: invalid UTF-8")]
    InvalidUtf8 { row: usize, column: usize },

    /// A field failed its type conversion
    #[error("Row {row}, column {column} ({field}): cannot parse '{value}' as {expected}")]
    MalformedInput {
        row: usize,
        column: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Errors raised by the fail-fast import pipeline
#[derive(Error, Debug)]
pub enum ImportError {
    /// The source could not be parsed; nothing was inserted
    #[error("Failed to parse import source: {0}")]
    Parse(#[from] IngestError),

    /// Inserting the record at `position` (1-based) failed; earlier records stay persisted
    #[error("Failed to persist record {position} ({name}, {team}): {source}")]
    Persistence {
        position: usize,
        name: String,
        team: String,
        #[source]
        source: RepositoryError,
    },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

impl RepositoryError {
    /// Create a query failed error
    pub fn query_failed<Q: Into<String>, M: Into<String>>(query: Q, message: M) -> Self {
        Self::QueryFailed {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a record not found error
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: Into<String>>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation<C: Into<String>, M: Into<String>>(
        constraint: C,
        message: M,
    ) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Classify a driver error raised while running `query`
    pub fn from_sqlx<Q: Into<String>>(query: Q, error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) => {
                if db_error.is_unique_violation() {
                    Self::constraint_violation("unique (name, team)", db_error.message())
                } else if db_error.is_check_violation() {
                    Self::constraint_violation("check", db_error.message())
                } else {
                    Self::query_failed(query, db_error.message())
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionFailed {
                    message: error.to_string(),
                }
            }
            _ => Self::query_failed(query, error.to_string()),
        }
    }
}

impl IngestError {
    /// Create a malformed input error for one field of one row
    pub fn malformed<V: Into<String>>(
        row: usize,
        column: usize,
        field: &'static str,
        value: V,
        expected: &'static str,
    ) -> Self {
        Self::MalformedInput {
            row,
            column,
            field,
            value: value.into(),
            expected,
        }
    }
}
