mod division;
mod event;
mod game;
mod status;

pub use division::{DemotionThreshold, Division, PromotionRequirement, Tier};
pub use event::{DivisionEvent, DivisionEventKind};
pub use game::{GameData, GameOutcome, GameResult};
pub use status::{
    DemotionProgress, DemotionShield, DivisionPhase, PromotionProgress, SeasonStats,
    SeasonSummary, UserDivisionStatus,
};
