use arena_interface::{
    competition::{matches::MatchStatus, state::TournamentFormat},
    InterfaceError,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BracketError {
    #[error("{0}")]
    InterfaceError(#[from] InterfaceError),

    #[error("InvalidFormat")]
    InvalidFormat { format: String },

    #[error("InsufficientParticipants")]
    InsufficientParticipants { required: usize, actual: usize },

    #[error("MatchNotFound")]
    MatchNotFound { match_id: String },

    #[error("InvalidAdvancement")]
    InvalidAdvancement {
        match_id: String,
        status: MatchStatus,
    },

    #[error("ParticipantNotInMatch")]
    ParticipantNotInMatch { match_id: String, user_id: String },

    #[error("DrawNotAllowed")]
    DrawNotAllowed { format: TournamentFormat },

    #[error("RoundIncomplete")]
    RoundIncomplete { round: u32 },

    #[error("AllRoundsPaired")]
    AllRoundsPaired { total_rounds: u32 },

    #[error("TournamentIncomplete")]
    TournamentIncomplete {},

    #[error("BracketIntegrity")]
    BracketIntegrity { reason: String },
}
