//! Elo-style MMR updates weighted by in-game performance.

use arena_interface::ratings::{GameData, GameResult};
use rust_decimal::{prelude::*, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::DivisionConfig;

pub const HIGH_ACCURACY: f64 = 80.0;
pub const LOW_ACCURACY: f64 = 50.0;
pub const MAX_STREAK_MULTIPLIER: Decimal = dec!(1.5);

/// Probability of `user_mmr` beating `opponent_mmr`
pub fn expected_score(user_mmr: i32, opponent_mmr: i32) -> Decimal {
    let exponent = Decimal::from(opponent_mmr - user_mmr) / dec!(400);
    match dec!(10).checked_powd(exponent) {
        Some(power) => Decimal::ONE / (Decimal::ONE + power),
        // Only reachable for absurd gaps, where the outcome is certain anyway
        None if exponent.is_sign_positive() => Decimal::ZERO,
        None => Decimal::ONE,
    }
}

pub fn actual_score(result: GameResult) -> Decimal {
    match result {
        GameResult::Win => Decimal::ONE,
        GameResult::Draw => dec!(0.5),
        GameResult::Loss => Decimal::ZERO,
    }
}

pub fn accuracy_multiplier(accuracy: f64) -> Decimal {
    if accuracy > HIGH_ACCURACY {
        dec!(1.2)
    } else if accuracy < LOW_ACCURACY {
        dec!(0.8)
    } else {
        Decimal::ONE
    }
}

/// Grows 10% per game of streak in either direction, capped at 1.5
pub fn streak_multiplier(streak: i32) -> Decimal {
    let bonus = dec!(0.1) * Decimal::from(streak.unsigned_abs());
    (Decimal::ONE + bonus).min(MAX_STREAK_MULTIPLIER)
}

/// MMR change for one game under the default configuration
pub fn calculate_mmr_change(
    user_mmr: i32,
    opponent_mmr: i32,
    result: GameResult,
    game_data: &GameData,
) -> i32 {
    mmr_change(
        &DivisionConfig::default(),
        user_mmr,
        opponent_mmr,
        result,
        game_data,
    )
}

pub fn mmr_change(
    config: &DivisionConfig,
    user_mmr: i32,
    opponent_mmr: i32,
    result: GameResult,
    game_data: &GameData,
) -> i32 {
    let swing = Decimal::from(config.k_factor)
        * (actual_score(result) - expected_score(user_mmr, opponent_mmr))
        * accuracy_multiplier(game_data.accuracy)
        * streak_multiplier(game_data.current_streak);

    let limit = Decimal::from(config.max_mmr_change.abs());
    swing
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(-limit, limit)
        .to_i32()
        .unwrap_or_default()
}
