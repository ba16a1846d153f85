use chrono::{DateTime, Utc};
use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Performance numbers reported by the game client for one match
#[cw_serde]
pub struct GameData {
    /// Hit percentage, 0 to 100
    pub accuracy: f64,
    pub avg_reaction_ms: f64,
    /// Positive for a win streak, negative for a loss streak
    pub current_streak: i32,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            accuracy: 65.0,
            avg_reaction_ms: 300.0,
            current_streak: 0,
        }
    }
}

#[cw_serde]
pub struct GameOutcome {
    pub opponent_mmr: i32,
    pub result: GameResult,
    pub accuracy: f64,
    pub avg_reaction_ms: f64,
    pub played_at: DateTime<Utc>,
}
