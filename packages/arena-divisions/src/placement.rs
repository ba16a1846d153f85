//! Initial tier assignment once the placement games are played.

use arena_interface::ratings::{SeasonStats, Tier};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Reaction time that scores zero
const SLOWEST_REACTION_MS: Decimal = dec!(600);
/// Milliseconds per reaction score point
const REACTION_MS_PER_POINT: Decimal = dec!(4.5);

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// 0 to 100, where 150 ms or faster is a perfect score
pub fn reaction_score(avg_reaction_ms: f64) -> Decimal {
    ((SLOWEST_REACTION_MS - decimal(avg_reaction_ms)) / REACTION_MS_PER_POINT)
        .clamp(Decimal::ZERO, dec!(100))
}

/// Overall skill from accuracy, reaction time and win rate, weighted 50/30/20
pub fn skill_rating(stats: &SeasonStats) -> Decimal {
    dec!(0.5) * decimal(stats.avg_accuracy)
        + dec!(0.3) * reaction_score(stats.avg_reaction_ms)
        + dec!(0.2) * decimal(stats.win_rate)
}

pub fn tier_for_skill(skill: Decimal) -> Tier {
    match skill {
        s if s >= dec!(90) => Tier::Master,
        s if s >= dec!(80) => Tier::Diamond,
        s if s >= dec!(70) => Tier::Platinum,
        s if s >= dec!(60) => Tier::Gold,
        s if s >= dec!(50) => Tier::Silver,
        _ => Tier::Bronze,
    }
}
