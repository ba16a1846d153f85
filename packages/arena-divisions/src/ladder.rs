//! The ordered set of divisions and where an MMR falls inside them.

use arena_interface::ratings::{DemotionThreshold, Division, PromotionRequirement, Tier};
use rust_decimal::{prelude::*, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::DivisionError;

fn division(
    tier: Tier,
    min_mmr: i32,
    max_mmr: i32,
    promotion: Option<PromotionRequirement>,
    demotion: Option<DemotionThreshold>,
    rewards: &[&str],
    privileges: &[&str],
) -> Division {
    Division {
        tier,
        min_mmr,
        max_mmr,
        promotion,
        demotion,
        rewards: rewards.iter().map(|r| r.to_string()).collect(),
        privileges: privileges.iter().map(|p| p.to_string()).collect(),
    }
}

fn promote(
    wins_required: u32,
    win_streak: Option<u32>,
    min_accuracy: Option<f64>,
) -> Option<PromotionRequirement> {
    Some(PromotionRequirement {
        wins_required,
        win_streak,
        min_accuracy,
    })
}

fn demote(max_losses: u32, loss_streak: Option<u32>) -> Option<DemotionThreshold> {
    Some(DemotionThreshold {
        max_losses,
        loss_streak,
    })
}

/// One division per tier, in tier order, with contiguous bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Division>", into = "Vec<Division>")]
pub struct Ladder {
    divisions: Vec<Division>,
}

impl Default for Ladder {
    fn default() -> Self {
        Self {
            divisions: vec![
                division(
                    Tier::Bronze,
                    0,
                    1200,
                    promote(3, None, None),
                    None,
                    &["bronze_banner"],
                    &["ranked_queue"],
                ),
                division(
                    Tier::Silver,
                    1200,
                    1400,
                    promote(3, None, None),
                    demote(3, None),
                    &["silver_banner"],
                    &["ranked_queue"],
                ),
                division(
                    Tier::Gold,
                    1400,
                    1600,
                    promote(4, Some(2), None),
                    demote(4, Some(3)),
                    &["gold_banner", "gold_crosshair"],
                    &["ranked_queue", "custom_lobbies"],
                ),
                division(
                    Tier::Platinum,
                    1600,
                    1800,
                    promote(5, Some(2), Some(60.0)),
                    demote(4, Some(3)),
                    &["platinum_banner", "platinum_crosshair"],
                    &["ranked_queue", "custom_lobbies"],
                ),
                division(
                    Tier::Diamond,
                    1800,
                    2000,
                    promote(5, Some(3), Some(70.0)),
                    demote(5, Some(3)),
                    &["diamond_banner", "diamond_crosshair"],
                    &["ranked_queue", "custom_lobbies", "tournament_priority"],
                ),
                division(
                    Tier::Master,
                    2000,
                    2400,
                    None,
                    demote(5, Some(4)),
                    &["master_banner", "master_crosshair", "season_title"],
                    &["ranked_queue", "custom_lobbies", "tournament_priority"],
                ),
            ],
        }
    }
}

impl TryFrom<Vec<Division>> for Ladder {
    type Error = DivisionError;

    fn try_from(divisions: Vec<Division>) -> Result<Self, Self::Error> {
        Ladder::new(divisions)
    }
}

impl From<Ladder> for Vec<Division> {
    fn from(ladder: Ladder) -> Self {
        ladder.divisions
    }
}

impl Ladder {
    pub fn new(divisions: Vec<Division>) -> Result<Self, DivisionError> {
        let invalid = |reason: String| DivisionError::InvalidLadder { reason };

        if divisions.len() != Tier::ALL.len() {
            return Err(invalid(format!(
                "expected {} divisions, got {}",
                Tier::ALL.len(),
                divisions.len()
            )));
        }
        for (division, tier) in divisions.iter().zip(Tier::ALL) {
            if division.tier != tier {
                return Err(invalid(format!("{} is out of order", division.tier)));
            }
            if division.max_mmr <= division.min_mmr {
                return Err(invalid(format!("{} has an empty band", tier)));
            }
        }
        for (lower, upper) in divisions.iter().zip(divisions.iter().skip(1)) {
            if lower.max_mmr != upper.min_mmr {
                return Err(invalid(format!(
                    "{} and {} bands are not contiguous",
                    lower.tier, upper.tier
                )));
            }
        }

        Ok(Self { divisions })
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division(&self, tier: Tier) -> &Division {
        &self.divisions[tier.index()]
    }

    /// Division whose band holds `mmr`; values outside the ladder go to the nearest end
    pub fn for_mmr(&self, mmr: i32) -> &Division {
        self.divisions
            .iter()
            .find(|division| division.contains(mmr))
            .unwrap_or_else(|| {
                if mmr < self.division(Tier::Bronze).min_mmr {
                    self.division(Tier::Bronze)
                } else {
                    self.division(Tier::Master)
                }
            })
    }

    /// Position of `mmr` inside the tier's band as a 0 to 100 percentage
    pub fn division_mmr(&self, tier: Tier, mmr: i32) -> u32 {
        let division = self.division(tier);
        let progress = Decimal::from(mmr - division.min_mmr) / Decimal::from(division.width())
            * dec!(100);

        progress
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .clamp(Decimal::ZERO, dec!(100))
            .to_u32()
            .unwrap_or_default()
    }
}
