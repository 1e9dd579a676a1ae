use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One pitcher's season line, as imported or submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PitcherRecord {
    pub name: String,
    pub team: String,
    #[serde(rename = "wins")]
    #[sqlx(rename = "w")]
    pub wins: u32,
    #[serde(rename = "losses")]
    #[sqlx(rename = "l")]
    pub losses: u32,
    #[serde(rename = "saves")]
    #[sqlx(rename = "sv")]
    pub saves: u32,
    #[serde(rename = "games")]
    #[sqlx(rename = "g")]
    pub games: u32,
    #[serde(rename = "gamesStarted")]
    #[sqlx(rename = "gs")]
    pub games_started: u32,
    #[serde(rename = "inningsPitched")]
    #[sqlx(rename = "ip")]
    pub innings_pitched: f64,
    #[serde(rename = "strikeoutsPerNine")]
    #[sqlx(rename = "k9")]
    pub strikeouts_per_nine: f64,
    #[serde(rename = "walksPerNine")]
    #[sqlx(rename = "bb9")]
    pub walks_per_nine: f64,
    #[serde(rename = "homeRunsPerNine")]
    #[sqlx(rename = "hr9")]
    pub home_runs_per_nine: f64,
    #[serde(rename = "battingAvgBallsInPlay")]
    pub babip: f64,
    /// Percentage, one decimal
    #[serde(rename = "leftOnBase")]
    #[sqlx(rename = "lob")]
    pub left_on_base_rate: f64,
    /// Percentage, one decimal
    #[serde(rename = "groundballRate")]
    #[sqlx(rename = "gb")]
    pub ground_ball_rate: f64,
    /// Percentage, one decimal
    #[serde(rename = "homeRunToFlyBallRatio")]
    #[sqlx(rename = "hrfb")]
    pub home_run_to_fly_ball_rate: f64,
    #[serde(rename = "fourseamFastballVelocity")]
    #[sqlx(rename = "vfa")]
    pub fastball_velocity: f64,
    #[serde(rename = "earnedRunAvg")]
    pub era: f64,
    #[serde(rename = "expectedEarnedRunAvg")]
    #[sqlx(rename = "xera")]
    pub expected_era: f64,
    #[serde(rename = "fielderIndependentPitching")]
    pub fip: f64,
    #[serde(rename = "expectedFielderIndependentPitching")]
    #[sqlx(rename = "xfip")]
    pub expected_fip: f64,
    #[serde(rename = "winsAboveReplacement")]
    #[sqlx(rename = "war")]
    pub wins_above_replacement: f64,
}
