mod advance;
mod bracket;
mod error;
pub mod generate;
mod schedule;
mod seed_order;
pub mod seeding;
pub mod swiss;
mod standings;
mod validate;

pub use crate::bracket::{match_id, Bracket, BracketNode};
pub use crate::error::BracketError;
pub use crate::generate::{generate, generate_with_rng, parse_format};
pub use crate::seed_order::bracket_order;
pub use crate::standings::{Placement, Standing};

#[cfg(test)]
mod tests;
