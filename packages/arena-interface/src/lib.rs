//! Plain data shared by the bracket engine, the division ladder and whatever store or UI
//! layer sits on top of them. Nothing in here holds state between calls.

pub mod competition;
mod error;
pub mod ratings;

pub use error::InterfaceError;

#[cfg(test)]
mod tests;
