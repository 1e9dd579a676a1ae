//! Web utility functions

use crate::errors::{AppError, AppResult};

/// Parse a numeric `player_id` path segment
pub fn parse_id(param: &str) -> AppResult<i64> {
    param
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid id: '{}'", param)))
}
