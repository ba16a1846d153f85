use std::fmt;

use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
        Tier::Master,
    ];

    pub fn next(&self) -> Option<Tier> {
        let index = self.index();
        Tier::ALL.get(index + 1).copied()
    }

    pub fn previous(&self) -> Option<Tier> {
        self.index().checked_sub(1).map(|index| Tier::ALL[index])
    }

    pub fn index(&self) -> usize {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
            Tier::Diamond => 4,
            Tier::Master => 5,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tier::Bronze => write!(f, "Bronze"),
            Tier::Silver => write!(f, "Silver"),
            Tier::Gold => write!(f, "Gold"),
            Tier::Platinum => write!(f, "Platinum"),
            Tier::Diamond => write!(f, "Diamond"),
            Tier::Master => write!(f, "Master"),
        }
    }
}

#[cw_serde]
pub struct PromotionRequirement {
    pub wins_required: u32,
    pub win_streak: Option<u32>,
    /// Season average accuracy, in percent
    pub min_accuracy: Option<f64>,
}

#[cw_serde]
pub struct DemotionThreshold {
    /// Losses in the division before a user at risk drops
    pub max_losses: u32,
    pub loss_streak: Option<u32>,
}

#[cw_serde]
pub struct Division {
    pub tier: Tier,
    /// Inclusive lower bound of the band
    pub min_mmr: i32,
    /// Exclusive upper bound of the band
    pub max_mmr: i32,
    /// None for the top tier
    pub promotion: Option<PromotionRequirement>,
    /// None for the bottom tier
    pub demotion: Option<DemotionThreshold>,
    pub rewards: Vec<String>,
    pub privileges: Vec<String>,
}

impl Division {
    pub fn width(&self) -> i32 {
        (self.max_mmr - self.min_mmr).max(1)
    }

    pub fn contains(&self, mmr: i32) -> bool {
        mmr >= self.min_mmr && mmr < self.max_mmr
    }

    pub fn midpoint(&self) -> i32 {
        self.min_mmr + self.width() / 2
    }

    /// Highest MMR still inside the band
    pub fn ceiling(&self) -> i32 {
        self.max_mmr - 1
    }
}
