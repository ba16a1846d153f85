use std::fmt;

use chrono::{DateTime, Utc};
use cosmwasm_schema::cw_serde;

use crate::InterfaceError;

/// Lifecycle of a bracket node. Ordered so that later states compare greater.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum MatchStatus {
    /// At least one slot is still waiting on a feeder match
    Waiting,
    /// Both slots are known and the match has not started
    Pending,
    Active,
    Finished,
}

impl MatchStatus {
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::Waiting, MatchStatus::Pending)
                | (MatchStatus::Pending, MatchStatus::Active)
                | (MatchStatus::Pending, MatchStatus::Finished)
                | (MatchStatus::Active, MatchStatus::Finished)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchStatus::Waiting => write!(f, "waiting"),
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Active => write!(f, "active"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum BracketSide {
    Winners,
    Losers,
    GrandFinals,
    ThirdPlace,
}

impl BracketSide {
    pub fn prefix(&self) -> &'static str {
        match self {
            BracketSide::Winners => "W",
            BracketSide::Losers => "L",
            BracketSide::GrandFinals => "GF",
            BracketSide::ThirdPlace => "3P",
        }
    }
}

impl fmt::Display for BracketSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BracketSide::Winners => write!(f, "winners"),
            BracketSide::Losers => write!(f, "losers"),
            BracketSide::GrandFinals => write!(f, "grand_finals"),
            BracketSide::ThirdPlace => write!(f, "third_place"),
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn other(&self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Edge of the bracket graph: where a participant goes once a match is decided
#[cw_serde]
pub struct MatchLink {
    pub match_id: String,
    pub slot: Slot,
}

#[cw_serde]
pub enum MatchResult {
    Winner { user_id: String },
    Draw,
}

#[cw_serde]
#[derive(Default, Copy, Eq)]
pub struct SeriesScore {
    pub participant_1: u32,
    pub participant_2: u32,
}

#[cw_serde]
pub struct Match {
    pub id: String,
    pub round: u32,
    pub position: u32,
    pub bracket: Option<BracketSide>,
    pub participant_1: Option<String>,
    pub participant_2: Option<String>,
    pub status: MatchStatus,
    pub best_of: u32,
    pub score: SeriesScore,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<MatchResult>,
    pub next_match_winner: Option<MatchLink>,
    pub next_match_loser: Option<MatchLink>,
}

impl Match {
    pub fn new(
        id: impl Into<String>,
        round: u32,
        position: u32,
        bracket: Option<BracketSide>,
        best_of: u32,
    ) -> Self {
        Self {
            id: id.into(),
            round,
            position,
            bracket,
            participant_1: None,
            participant_2: None,
            status: MatchStatus::Waiting,
            best_of,
            score: SeriesScore::default(),
            scheduled_at: None,
            started_at: None,
            completed_at: None,
            result: None,
            next_match_winner: None,
            next_match_loser: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&String> {
        match slot {
            Slot::First => self.participant_1.as_ref(),
            Slot::Second => self.participant_2.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::First => &mut self.participant_1,
            Slot::Second => &mut self.participant_2,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.participant_1.is_some() && self.participant_2.is_some()
    }

    /// Which slot the user occupies, if any
    pub fn slot_of(&self, user_id: &str) -> Option<Slot> {
        if self.participant_1.as_deref() == Some(user_id) {
            Some(Slot::First)
        } else if self.participant_2.as_deref() == Some(user_id) {
            Some(Slot::Second)
        } else {
            None
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.slot_of(user_id).is_some()
    }

    pub fn opponent_of(&self, user_id: &str) -> Option<&String> {
        self.slot_of(user_id)
            .and_then(|slot| self.slot(slot.other()))
    }

    /// Seats a participant and promotes the match to pending once both seats are taken
    pub fn fill(&mut self, slot: Slot, user_id: impl Into<String>) -> Result<(), InterfaceError> {
        if self.slot(slot).is_some() {
            return Err(InterfaceError::SlotOccupied {
                match_id: self.id.clone(),
            });
        }
        *self.slot_mut(slot) = Some(user_id.into());

        if self.is_ready() && self.status == MatchStatus::Waiting {
            self.transition(MatchStatus::Pending)?;
        }

        Ok(())
    }

    pub fn transition(&mut self, to: MatchStatus) -> Result<(), InterfaceError> {
        if !self.status.can_transition_to(to) {
            return Err(InterfaceError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn winner(&self) -> Option<&str> {
        match &self.result {
            Some(MatchResult::Winner { user_id }) => Some(user_id.as_str()),
            _ => None,
        }
    }

    pub fn loser(&self) -> Option<&String> {
        self.winner().and_then(|winner| self.opponent_of(winner))
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.result, Some(MatchResult::Draw))
    }

    /// Game wins needed to take the series
    pub fn wins_needed(&self) -> u32 {
        self.best_of.max(1) / 2 + 1
    }
}

/// A Swiss round sat out by an odd participant, scored like a win
#[cw_serde]
pub struct Bye {
    pub round: u32,
    pub user_id: String,
}
