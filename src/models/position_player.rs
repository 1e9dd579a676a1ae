use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One position player's season line, as imported or submitted
///
/// Column renames map each field onto the `position_players` table; serde
/// renames keep the JSON names the API has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PositionPlayerRecord {
    pub name: String,
    pub team: String,
    #[serde(rename = "games")]
    #[sqlx(rename = "g")]
    pub games: u32,
    #[serde(rename = "plateAppearances")]
    #[sqlx(rename = "pa")]
    pub plate_appearances: u32,
    #[serde(rename = "homeRuns")]
    #[sqlx(rename = "hr")]
    pub home_runs: u32,
    #[serde(rename = "runs")]
    pub runs: u32,
    #[serde(rename = "runsBattedIn")]
    #[sqlx(rename = "rbi")]
    pub runs_batted_in: u32,
    #[serde(rename = "stolenBases")]
    #[sqlx(rename = "sb")]
    pub stolen_bases: u32,
    #[serde(rename = "weightedRunsCreatedPlus")]
    #[sqlx(rename = "wrc_plus")]
    pub weighted_runs_created_plus: i32,
    /// Percentage, one decimal
    #[serde(rename = "walkRate")]
    #[sqlx(rename = "bb_rate")]
    pub walk_rate: f64,
    /// Percentage, one decimal
    #[serde(rename = "strikeoutRate")]
    #[sqlx(rename = "k_rate")]
    pub strikeout_rate: f64,
    #[serde(rename = "isolatedPower")]
    #[sqlx(rename = "iso")]
    pub isolated_power: f64,
    #[serde(rename = "battingAvgBallsInPlay")]
    pub babip: f64,
    #[serde(rename = "battingAvg")]
    #[sqlx(rename = "average")]
    pub batting_average: f64,
    #[serde(rename = "onBasePct")]
    #[sqlx(rename = "obp")]
    pub on_base_percentage: f64,
    #[serde(rename = "sluggingPct")]
    #[sqlx(rename = "slg")]
    pub slugging_percentage: f64,
    #[serde(rename = "weightedOnBaseAvg")]
    pub woba: f64,
    #[serde(rename = "expWeightedOnBaseAvg")]
    #[sqlx(rename = "x_woba")]
    pub expected_woba: f64,
    #[serde(rename = "baseRunning")]
    #[sqlx(rename = "bsr")]
    pub base_running: f64,
    #[serde(rename = "winsAboveReplacement")]
    #[sqlx(rename = "war")]
    pub wins_above_replacement: f64,
}
