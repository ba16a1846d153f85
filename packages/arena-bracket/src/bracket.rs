use std::collections::HashMap;

use arena_interface::competition::{
    matches::{BracketSide, Bye, Match, MatchLink},
    participant::Participant,
    schedule::ScheduleRound,
    state::{BracketSettings, TournamentFormat},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{schedule, BracketError};

type SlotKey = (Option<BracketSide>, u32, u32);

/// Canonical id of the match at `(side, round, position)`
pub fn match_id(side: Option<BracketSide>, round: u32, position: u32) -> String {
    match side {
        None => format!("R{}-M{}", round, position),
        Some(BracketSide::ThirdPlace) => BracketSide::ThirdPlace.prefix().to_string(),
        Some(BracketSide::GrandFinals) => format!("GF-{}", round),
        Some(side) => format!("{}{}-{}", side.prefix(), round, position),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct MatchIndex {
    by_id: HashMap<String, usize>,
    by_slot: HashMap<SlotKey, usize>,
}

impl MatchIndex {
    fn build(matches: &[Match]) -> Result<Self, BracketError> {
        let mut index = MatchIndex::default();
        for (position, match_) in matches.iter().enumerate() {
            index.insert(match_, position)?;
        }
        Ok(index)
    }

    fn insert(&mut self, match_: &Match, position: usize) -> Result<(), BracketError> {
        if self.by_id.insert(match_.id.clone(), position).is_some() {
            return Err(BracketError::BracketIntegrity {
                reason: format!("duplicate match id {}", match_.id),
            });
        }
        let key = (match_.bracket, match_.round, match_.position);
        if self.by_slot.insert(key, position).is_some() {
            return Err(BracketError::BracketIntegrity {
                reason: format!("match {} reuses an occupied bracket position", match_.id),
            });
        }
        Ok(())
    }
}

/// Winner-advancement tree, rooted at the deciding match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketNode {
    pub match_id: String,
    pub feeders: Vec<BracketNode>,
}

#[derive(Deserialize)]
struct BracketRecord {
    tournament_id: String,
    format: TournamentFormat,
    total_rounds: u32,
    losers_rounds: u32,
    participants: Vec<Participant>,
    matches: Vec<Match>,
    schedule: Vec<ScheduleRound>,
    byes: Vec<Bye>,
    settings: BracketSettings,
    start_time: DateTime<Utc>,
}

impl TryFrom<BracketRecord> for Bracket {
    type Error = BracketError;

    fn try_from(record: BracketRecord) -> Result<Self, Self::Error> {
        let bracket = Bracket {
            index: MatchIndex::build(&record.matches)?,
            tournament_id: record.tournament_id,
            format: record.format,
            total_rounds: record.total_rounds,
            losers_rounds: record.losers_rounds,
            participants: record.participants,
            matches: record.matches,
            schedule: record.schedule,
            byes: record.byes,
            settings: record.settings,
            start_time: record.start_time,
        };
        bracket.validate()?;
        Ok(bracket)
    }
}

/// Match graph for one tournament.
///
/// Matches live in a flat arena and are addressed through an index, so lookups by id or by
/// `(side, round, position)` never scan the whole bracket. The index is not serialized; it is
/// rebuilt, and the bracket re-validated, when a bracket is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BracketRecord")]
pub struct Bracket {
    pub(crate) tournament_id: String,
    pub(crate) format: TournamentFormat,
    /// Winners rounds for double elimination
    pub(crate) total_rounds: u32,
    pub(crate) losers_rounds: u32,
    /// Seed order
    pub(crate) participants: Vec<Participant>,
    pub(crate) matches: Vec<Match>,
    pub(crate) schedule: Vec<ScheduleRound>,
    pub(crate) byes: Vec<Bye>,
    pub(crate) settings: BracketSettings,
    pub(crate) start_time: DateTime<Utc>,
    #[serde(skip)]
    index: MatchIndex,
}

impl Bracket {
    pub(crate) fn new(
        tournament_id: String,
        format: TournamentFormat,
        total_rounds: u32,
        losers_rounds: u32,
        participants: Vec<Participant>,
        settings: BracketSettings,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            tournament_id,
            format,
            total_rounds,
            losers_rounds,
            participants,
            matches: vec![],
            schedule: vec![],
            byes: vec![],
            settings,
            start_time,
            index: MatchIndex::default(),
        }
    }

    pub(crate) fn push_match(&mut self, match_: Match) -> Result<usize, BracketError> {
        let position = self.matches.len();
        self.index.insert(&match_, position)?;
        self.matches.push(match_);
        Ok(position)
    }

    pub(crate) fn index_of(&self, match_id: &str) -> Result<usize, BracketError> {
        self.index
            .by_id
            .get(match_id)
            .copied()
            .ok_or_else(|| BracketError::MatchNotFound {
                match_id: match_id.to_string(),
            })
    }

    /// Index of a link target, which must exist in a well-formed bracket
    pub(crate) fn link_target(&self, link: &MatchLink) -> Result<usize, BracketError> {
        self.index
            .by_id
            .get(&link.match_id)
            .copied()
            .ok_or_else(|| BracketError::BracketIntegrity {
                reason: format!("link to missing match {}", link.match_id),
            })
    }

    pub(crate) fn participant_mut(&mut self, user_id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.user_id == user_id)
    }

    pub(crate) fn refresh_schedule(&mut self) {
        self.schedule = schedule::build(
            &mut self.matches,
            self.total_rounds,
            self.start_time,
            &self.settings.schedule,
        );
    }

    pub fn tournament_id(&self) -> &str {
        &self.tournament_id
    }

    pub fn format(&self) -> TournamentFormat {
        self.format
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn losers_rounds(&self) -> u32 {
        self.losers_rounds
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn schedule(&self) -> &[ScheduleRound] {
        &self.schedule
    }

    pub fn byes(&self) -> &[Bye] {
        &self.byes
    }

    pub fn settings(&self) -> &BracketSettings {
        &self.settings
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.index.by_id.get(match_id).map(|&i| &self.matches[i])
    }

    pub fn match_at(
        &self,
        side: Option<BracketSide>,
        round: u32,
        position: u32,
    ) -> Option<&Match> {
        self.index
            .by_slot
            .get(&(side, round, position))
            .map(|&i| &self.matches[i])
    }

    /// Matches of one round, by position
    pub fn matches_in_round(&self, side: Option<BracketSide>, round: u32) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| m.bracket == side && m.round == round)
            .collect();
        matches.sort_by_key(|m| m.position);
        matches
    }

    /// The earliest unfinished match the user is seated in
    pub fn next_match_for(&self, user_id: &str) -> Option<&Match> {
        self.matches
            .iter()
            .filter(|m| !m.is_finished() && m.involves(user_id))
            .min_by_key(|m| (schedule::phase(m, self.total_rounds), m.position))
    }

    /// Highest round created so far on the main side, Swiss byes included
    pub fn current_round(&self) -> u32 {
        self.matches
            .iter()
            .filter(|m| m.bracket.is_none())
            .map(|m| m.round)
            .chain(self.byes.iter().map(|b| b.round))
            .max()
            .unwrap_or_default()
    }

    pub fn is_complete(&self) -> bool {
        let all_finished = !self.matches.is_empty() && self.matches.iter().all(Match::is_finished);

        match self.format {
            TournamentFormat::Swiss => all_finished && self.current_round() >= self.total_rounds,
            _ => all_finished,
        }
    }

    /// The match whose winner takes the tournament
    pub(crate) fn deciding_match(&self) -> Option<&Match> {
        match self.format {
            TournamentFormat::SingleElimination => self.match_at(None, self.total_rounds, 1),
            TournamentFormat::DoubleElimination => self
                .match_at(Some(BracketSide::GrandFinals), 2, 1)
                .or_else(|| self.match_at(Some(BracketSide::GrandFinals), 1, 1)),
            TournamentFormat::RoundRobin | TournamentFormat::Swiss => None,
        }
    }

    /// Winner-advancement tree, `None` for formats without one
    pub fn tree(&self) -> Option<BracketNode> {
        let root = match self.format {
            TournamentFormat::SingleElimination => self.match_at(None, self.total_rounds, 1),
            TournamentFormat::DoubleElimination => {
                self.match_at(Some(BracketSide::GrandFinals), 1, 1)
            }
            _ => None,
        }?;

        let mut feeders: HashMap<&str, Vec<&str>> = HashMap::new();
        for match_ in &self.matches {
            if let Some(link) = &match_.next_match_winner {
                feeders
                    .entry(link.match_id.as_str())
                    .or_default()
                    .push(match_.id.as_str());
            }
        }

        Some(build_node(&root.id, &feeders))
    }
}

fn build_node(match_id: &str, feeders: &HashMap<&str, Vec<&str>>) -> BracketNode {
    BracketNode {
        match_id: match_id.to_string(),
        feeders: feeders
            .get(match_id)
            .map(|ids| ids.iter().map(|id| build_node(id, feeders)).collect())
            .unwrap_or_default(),
    }
}
