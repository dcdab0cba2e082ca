use chrono::{DateTime, Utc};
use mastermind_agent::LearnerParams;
use mastermind_engine::{GameConfig, Seed};
use serde::{Deserialize, Serialize};

/// Summary of one `train` run, written as JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingReport {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub config: GameConfig,
    pub params: LearnerParams,
    pub seed: Seed,
    pub resumed_from: Option<String>,
    pub games: usize,
    pub wins: usize,
    pub win_rate: Option<f64>,
    pub state_count: usize,
    /// `(games played, cumulative win rate)` samples.
    pub curve: Vec<CurvePoint>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CurvePoint {
    pub games: usize,
    pub win_rate: f64,
}
