//! Column layouts of the two stat exports
//!
//! The mapping is positional: the header row is never consulted, so the
//! order of [`CsvRecord::HEADERS`] is the contract with the source file.

use super::conversion::as_fraction;
use super::csv_parser::RowFields;
use crate::errors::IngestResult;
use crate::models::{PitcherRecord, PositionPlayerRecord, RecordKind};

/// A record that can be read from, and written back to, one CSV row
pub trait CsvRecord: Sized + Send + Sync {
    const KIND: RecordKind;
    /// Column headers in source order; the length is the expected column count
    const HEADERS: &'static [&'static str];

    fn from_fields(fields: &RowFields<'_>) -> IngestResult<Self>;

    /// Fields in source order, with percentages turned back into fractions
    fn to_fields(&self) -> Vec<String>;

    fn name(&self) -> &str;
    fn team(&self) -> &str;
}

impl CsvRecord for PositionPlayerRecord {
    const KIND: RecordKind = RecordKind::PositionPlayers;
    const HEADERS: &'static [&'static str] = &[
        "Name", "Team", "G", "PA", "HR", "R", "RBI", "SB", "wRC+", "BB%", "K%", "ISO", "BABIP",
        "AVG", "OBP", "SLG", "wOBA", "xwOBA", "BsR", "WAR",
    ];

    fn from_fields(f: &RowFields<'_>) -> IngestResult<Self> {
        Ok(Self {
            name: f.text(0),
            team: f.text(1),
            games: f.integer(2)?,
            plate_appearances: f.integer(3)?,
            home_runs: f.integer(4)?,
            runs: f.integer(5)?,
            runs_batted_in: f.integer(6)?,
            stolen_bases: f.integer(7)?,
            weighted_runs_created_plus: f.truncated(8)?,
            walk_rate: f.percentage(9, 1)?,
            strikeout_rate: f.percentage(10, 1)?,
            isolated_power: f.decimal(11, 3)?,
            babip: f.decimal(12, 3)?,
            batting_average: f.decimal(13, 3)?,
            on_base_percentage: f.decimal(14, 3)?,
            slugging_percentage: f.decimal(15, 3)?,
            woba: f.decimal(16, 3)?,
            expected_woba: f.decimal(17, 3)?,
            base_running: f.decimal(18, 1)?,
            wins_above_replacement: f.decimal(19, 1)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.team.clone(),
            self.games.to_string(),
            self.plate_appearances.to_string(),
            self.home_runs.to_string(),
            self.runs.to_string(),
            self.runs_batted_in.to_string(),
            self.stolen_bases.to_string(),
            self.weighted_runs_created_plus.to_string(),
            as_fraction(self.walk_rate).to_string(),
            as_fraction(self.strikeout_rate).to_string(),
            self.isolated_power.to_string(),
            self.babip.to_string(),
            self.batting_average.to_string(),
            self.on_base_percentage.to_string(),
            self.slugging_percentage.to_string(),
            self.woba.to_string(),
            self.expected_woba.to_string(),
            self.base_running.to_string(),
            self.wins_above_replacement.to_string(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn team(&self) -> &str {
        &self.team
    }
}

impl CsvRecord for PitcherRecord {
    const KIND: RecordKind = RecordKind::Pitchers;
    const HEADERS: &'static [&'static str] = &[
        "Name", "Team", "W", "L", "SV", "G", "GS", "IP", "K/9", "BB/9", "HR/9", "BABIP", "LOB%",
        "GB%", "HR/FB", "vFA (pi)", "ERA", "xERA", "FIP", "xFIP", "WAR",
    ];

    fn from_fields(f: &RowFields<'_>) -> IngestResult<Self> {
        Ok(Self {
            name: f.text(0),
            team: f.text(1),
            wins: f.integer(2)?,
            losses: f.integer(3)?,
            saves: f.integer(4)?,
            games: f.integer(5)?,
            games_started: f.integer(6)?,
            innings_pitched: f.float(7)?,
            strikeouts_per_nine: f.decimal(8, 2)?,
            walks_per_nine: f.decimal(9, 2)?,
            home_runs_per_nine: f.decimal(10, 2)?,
            babip: f.decimal(11, 3)?,
            left_on_base_rate: f.percentage(12, 1)?,
            ground_ball_rate: f.percentage(13, 1)?,
            home_run_to_fly_ball_rate: f.percentage(14, 1)?,
            fastball_velocity: f.decimal(15, 1)?,
            era: f.decimal(16, 2)?,
            expected_era: f.decimal(17, 2)?,
            fip: f.decimal(18, 2)?,
            expected_fip: f.decimal(19, 2)?,
            wins_above_replacement: f.decimal(20, 1)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.team.clone(),
            self.wins.to_string(),
            self.losses.to_string(),
            self.saves.to_string(),
            self.games.to_string(),
            self.games_started.to_string(),
            self.innings_pitched.to_string(),
            self.strikeouts_per_nine.to_string(),
            self.walks_per_nine.to_string(),
            self.home_runs_per_nine.to_string(),
            self.babip.to_string(),
            as_fraction(self.left_on_base_rate).to_string(),
            as_fraction(self.ground_ball_rate).to_string(),
            as_fraction(self.home_run_to_fly_ball_rate).to_string(),
            self.fastball_velocity.to_string(),
            self.era.to_string(),
            self.expected_era.to_string(),
            self.fip.to_string(),
            self.expected_fip.to_string(),
            self.wins_above_replacement.to_string(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn team(&self) -> &str {
        &self.team
    }
}
