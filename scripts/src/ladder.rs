use arena_divisions::{DivisionConfig, DivisionEngine, DivisionRegistry};
use arena_interface::ratings::{GameOutcome, GameResult, UserDivisionStatus};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::Rng;

pub const PLAYER: &str = "ladder-player";

/// Rough shape of the simulated player's game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Chance of winning any single game
    pub win_rate: f64,
    pub accuracy: f64,
    pub avg_reaction_ms: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            win_rate: 0.55,
            accuracy: 70.0,
            avg_reaction_ms: 280.0,
        }
    }
}

/// Runs one player through `games` matches against opponents near their own MMR
pub fn run<R: Rng + ?Sized>(
    config: DivisionConfig,
    profile: Profile,
    games: u32,
    start: DateTime<Utc>,
    rng: &mut R,
) -> anyhow::Result<UserDivisionStatus> {
    let mut registry = DivisionRegistry::new(DivisionEngine::new(config), 1);
    registry.register(PLAYER)?;

    for game in 0..games {
        let mmr = registry.get(PLAYER)?.current_mmr;
        let result = if rng.gen_bool(profile.win_rate.clamp(0.0, 1.0)) {
            GameResult::Win
        } else {
            GameResult::Loss
        };
        let outcome = GameOutcome {
            opponent_mmr: (mmr + rng.gen_range(-150..=150)).max(0),
            result,
            accuracy: (profile.accuracy + rng.gen_range(-10.0..10.0)).clamp(0.0, 100.0),
            avg_reaction_ms: (profile.avg_reaction_ms + rng.gen_range(-40.0..40.0)).max(0.0),
            played_at: start + Duration::minutes(i64::from(game) * 20),
        };

        let report = registry.record_match(PLAYER, &outcome)?;
        debug!(
            "game {}: {:?}, {:+} to {}",
            game + 1,
            result,
            report.mmr_delta,
            report.mmr
        );
    }

    Ok(registry.get(PLAYER)?.clone())
}
