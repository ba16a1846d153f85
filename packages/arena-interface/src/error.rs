use thiserror::Error;

use crate::competition::matches::MatchStatus;

#[derive(Error, Debug, PartialEq)]
pub enum InterfaceError {
    #[error("InvalidFormat")]
    InvalidFormat { format: String },

    #[error("InvalidSeedingMethod")]
    InvalidSeedingMethod { method: String },

    #[error("InvalidTransition")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("SlotOccupied")]
    SlotOccupied { match_id: String },
}
