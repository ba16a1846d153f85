pub mod matches;
pub mod participant;
pub mod schedule;
pub mod state;
