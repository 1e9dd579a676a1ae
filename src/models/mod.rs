//! Stat records and their persisted forms

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

pub mod pitcher;
pub mod position_player;

pub use pitcher::PitcherRecord;
pub use position_player::PositionPlayerRecord;

/// A stored position player: the table's `player_id` plus the record
pub type PositionPlayer = Persisted<PositionPlayerRecord>;

/// A stored pitcher: the table's `player_id` plus the record
pub type Pitcher = Persisted<PitcherRecord>;

/// Which of the two stat schemas a file, table or request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    PositionPlayers,
    Pitchers,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::PositionPlayers => "position_players",
            RecordKind::Pitchers => "pitchers",
        }
    }

    /// Table the records of this kind are persisted in
    pub fn table(&self) -> &'static str {
        self.as_str()
    }

    /// Singular name used in messages ("pitcher with id '3' not found")
    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::PositionPlayers => "position player",
            RecordKind::Pitchers => "pitcher",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record read back from its table, with the store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persisted<T> {
    pub id: i64,
    #[serde(flatten)]
    pub record: T,
}

impl<'r, T> FromRow<'r, SqliteRow> for Persisted<T>
where
    T: FromRow<'r, SqliteRow>,
{
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("player_id")?,
            record: T::from_row(row)?,
        })
    }
}

/// Result of a single-record insert
///
/// A `(name, team)` conflict leaves the stored row untouched and is reported
/// as `Ignored`, which is still a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum InsertOutcome {
    Inserted(i64),
    Ignored,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_deserializes_from_table_name() {
        let kind: RecordKind = serde_json::from_str("\"pitchers\"").unwrap();
        assert_eq!(kind, RecordKind::Pitchers);
        assert!(serde_json::from_str::<RecordKind>("\"batters\"").is_err());
    }

    #[test]
    fn record_kind_serializes_as_table_name() {
        let json = serde_json::to_string(&RecordKind::PositionPlayers).unwrap();
        assert_eq!(json, "\"position_players\"");
        assert_eq!(RecordKind::Pitchers.table(), "pitchers");
    }
}
