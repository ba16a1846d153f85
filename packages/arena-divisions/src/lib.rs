mod config;
mod engine;
mod error;
pub mod ladder;
pub mod mmr;
pub mod placement;
mod registry;

pub use crate::config::DivisionConfig;
pub use crate::engine::{DivisionEngine, MatchReport};
pub use crate::error::DivisionError;
pub use crate::ladder::Ladder;
pub use crate::mmr::calculate_mmr_change;
pub use crate::registry::DivisionRegistry;
