//! Centralized error handling for the baseball stats service
//!
//! This module unifies the error types of every layer so that handlers,
//! the import pipeline and the binary all report failures the same way.
//!
//! # Error Categories
//!
//! - **Repository Errors**: Data access failures, including SQLite
//!   connection and migration issues
//! - **Ingest Errors**: CSV reading and field conversion
//! - **Import Errors**: Fail-fast batch import outcomes
//! - **Validation Errors**: Input validation at the HTTP boundary
//!
//! # Usage
//!
//! ```rust
//! use baseball_stats::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for CSV ingestion Results
pub type IngestResult<T> = Result<T, IngestError>;
