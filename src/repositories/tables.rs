//! Column mapping between the stat records and their tables
//!
//! Parameter order in every statement follows [`StatTable::COLUMNS`], and
//! [`StatTable::bind_columns`] must bind in exactly that order.

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

use crate::ingestor::CsvRecord;
use crate::models::{PitcherRecord, PositionPlayerRecord};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A record type persisted in one table keyed by `player_id`
pub trait StatTable: CsvRecord + Clone + Unpin + for<'r> FromRow<'r, SqliteRow> + 'static {
    /// Writable columns, in bind order
    const COLUMNS: &'static [&'static str];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

impl StatTable for PositionPlayerRecord {
    const COLUMNS: &'static [&'static str] = &[
        "name", "team", "g", "pa", "hr", "runs", "rbi", "sb", "wrc_plus", "bb_rate", "k_rate",
        "iso", "babip", "average", "obp", "slg", "woba", "x_woba", "bsr", "war",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.team.as_str())
            .bind(self.games)
            .bind(self.plate_appearances)
            .bind(self.home_runs)
            .bind(self.runs)
            .bind(self.runs_batted_in)
            .bind(self.stolen_bases)
            .bind(self.weighted_runs_created_plus)
            .bind(self.walk_rate)
            .bind(self.strikeout_rate)
            .bind(self.isolated_power)
            .bind(self.babip)
            .bind(self.batting_average)
            .bind(self.on_base_percentage)
            .bind(self.slugging_percentage)
            .bind(self.woba)
            .bind(self.expected_woba)
            .bind(self.base_running)
            .bind(self.wins_above_replacement)
    }
}

impl StatTable for PitcherRecord {
    const COLUMNS: &'static [&'static str] = &[
        "name", "team", "w", "l", "sv", "g", "gs", "ip", "k9", "bb9", "hr9", "babip", "lob", "gb",
        "hrfb", "vfa", "era", "xera", "fip", "xfip", "war",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.team.as_str())
            .bind(self.wins)
            .bind(self.losses)
            .bind(self.saves)
            .bind(self.games)
            .bind(self.games_started)
            .bind(self.innings_pitched)
            .bind(self.strikeouts_per_nine)
            .bind(self.walks_per_nine)
            .bind(self.home_runs_per_nine)
            .bind(self.babip)
            .bind(self.left_on_base_rate)
            .bind(self.ground_ball_rate)
            .bind(self.home_run_to_fly_ball_rate)
            .bind(self.fastball_velocity)
            .bind(self.era)
            .bind(self.expected_era)
            .bind(self.fip)
            .bind(self.expected_fip)
            .bind(self.wins_above_replacement)
    }
}
