use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use cosmwasm_schema::cw_serde;

use crate::{
    competition::{participant::Participant, schedule::ScheduleConfig},
    InterfaceError,
};

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
}

impl TournamentFormat {
    pub fn is_elimination(&self) -> bool {
        matches!(
            self,
            TournamentFormat::SingleElimination | TournamentFormat::DoubleElimination
        )
    }

    /// Draws only make sense where points are tallied instead of winners advancing
    pub fn allows_draws(&self) -> bool {
        !self.is_elimination()
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TournamentFormat::SingleElimination => write!(f, "single_elimination"),
            TournamentFormat::DoubleElimination => write!(f, "double_elimination"),
            TournamentFormat::RoundRobin => write!(f, "round_robin"),
            TournamentFormat::Swiss => write!(f, "swiss"),
        }
    }
}

impl FromStr for TournamentFormat {
    type Err = InterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_elimination" | "single" => Ok(TournamentFormat::SingleElimination),
            "double_elimination" | "double" => Ok(TournamentFormat::DoubleElimination),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            "swiss" => Ok(TournamentFormat::Swiss),
            _ => Err(InterfaceError::InvalidFormat {
                format: s.to_string(),
            }),
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum SeedingMethod {
    Random,
    #[default]
    Rating,
    Manual,
}

impl fmt::Display for SeedingMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeedingMethod::Random => write!(f, "random"),
            SeedingMethod::Rating => write!(f, "rating"),
            SeedingMethod::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for SeedingMethod {
    type Err = InterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SeedingMethod::Random),
            "rating" | "elo" => Ok(SeedingMethod::Rating),
            "manual" => Ok(SeedingMethod::Manual),
            _ => Err(InterfaceError::InvalidSeedingMethod {
                method: s.to_string(),
            }),
        }
    }
}

#[cw_serde]
pub struct BracketSettings {
    pub best_of: u32,
    pub seeding: SeedingMethod,
    pub late_registration: bool,
    /// Single elimination only, needs at least 4 participants
    pub play_third_place_match: bool,
    /// Double elimination only, replays the grand final when the losers champion wins it
    pub grand_finals_reset: bool,
    pub schedule: ScheduleConfig,
}

impl Default for BracketSettings {
    fn default() -> Self {
        Self {
            best_of: 1,
            seeding: SeedingMethod::default(),
            late_registration: false,
            play_third_place_match: false,
            grand_finals_reset: true,
            schedule: ScheduleConfig::default(),
        }
    }
}

#[cw_serde]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub format: TournamentFormat,
    pub participants: Vec<Participant>,
    pub settings: BracketSettings,
    pub start_time: DateTime<Utc>,
}

impl Tournament {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        format: TournamentFormat,
        participants: Vec<Participant>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            format,
            participants,
            settings: BracketSettings::default(),
            start_time,
        }
    }

    pub fn with_settings(mut self, settings: BracketSettings) -> Self {
        self.settings = settings;
        self
    }
}
