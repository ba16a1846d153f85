use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DivisionError {
    #[error("StatusNotFound")]
    StatusNotFound { user_id: String },

    #[error("AlreadyRegistered")]
    AlreadyRegistered { user_id: String },

    #[error("InvalidGameData")]
    InvalidGameData { reason: String },

    #[error("InvalidLadder")]
    InvalidLadder { reason: String },
}
