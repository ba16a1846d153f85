use std::collections::{BTreeMap, BTreeSet, HashSet};

use arena_interface::competition::matches::{BracketSide, MatchResult, MatchStatus};
use itertools::Itertools;

use crate::{Bracket, BracketError};

fn integrity(reason: String) -> BracketError {
    BracketError::BracketIntegrity { reason }
}

impl Bracket {
    /// Structural checks run after generation and after deserialization
    pub fn validate(&self) -> Result<(), BracketError> {
        if self
            .participants
            .iter()
            .map(|p| p.user_id.as_str())
            .unique()
            .count()
            != self.participants.len()
        {
            return Err(integrity("participants contain duplicates".to_string()));
        }

        self.validate_rounds()?;
        self.validate_links()?;
        self.validate_results()
    }

    fn validate_rounds(&self) -> Result<(), BracketError> {
        let mut sides: BTreeMap<Option<BracketSide>, BTreeMap<u32, BTreeSet<u32>>> =
            BTreeMap::new();
        for match_ in &self.matches {
            if match_.round == 0 || match_.position == 0 {
                return Err(integrity(format!(
                    "{} has a zero round or position",
                    match_.id
                )));
            }
            sides
                .entry(match_.bracket)
                .or_default()
                .entry(match_.round)
                .or_default()
                .insert(match_.position);
        }

        for (side, rounds) in &sides {
            let limit = match side {
                None | Some(BracketSide::Winners) => self.total_rounds,
                Some(BracketSide::Losers) => self.losers_rounds,
                Some(BracketSide::GrandFinals) => 2,
                Some(BracketSide::ThirdPlace) => 1,
            };

            let present: Vec<u32> = rounds.keys().copied().collect();
            if present.iter().any(|&round| round > limit) {
                return Err(integrity(format!(
                    "{:?} bracket has rounds beyond {}",
                    side, limit
                )));
            }
            if present.iter().tuple_windows().any(|(a, b)| b - a != 1) {
                return Err(integrity(format!("{:?} bracket skips a round", side)));
            }
            let starts_late = present.first().map_or(false, |&first| first != 1);
            if starts_late && *side != Some(BracketSide::Losers) {
                return Err(integrity(format!(
                    "{:?} bracket does not start at round 1",
                    side
                )));
            }

            if !self.format.is_elimination() {
                // Points formats fill every position of a round
                for (round, positions) in rounds {
                    if positions.iter().copied().ne(1..=positions.len() as u32) {
                        return Err(integrity(format!("round {} has position gaps", round)));
                    }
                }
            } else if matches!(side, None | Some(BracketSide::Winners)) {
                // Beyond the first round every structural slot exists
                let size = 1u32 << self.total_rounds;
                for (round, positions) in rounds.iter().filter(|(&round, _)| round > 1) {
                    if positions.len() as u32 != size >> round {
                        return Err(integrity(format!(
                            "round {} has {} matches, expected {}",
                            round,
                            positions.len(),
                            size >> round
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_links(&self) -> Result<(), BracketError> {
        let mut targets = HashSet::new();
        for match_ in &self.matches {
            for link in [&match_.next_match_winner, &match_.next_match_loser]
                .into_iter()
                .flatten()
            {
                if link.match_id == match_.id {
                    return Err(integrity(format!("{} links to itself", match_.id)));
                }
                if self.get(&link.match_id).is_none() {
                    return Err(integrity(format!(
                        "{} links to missing match {}",
                        match_.id, link.match_id
                    )));
                }
                if !targets.insert((link.match_id.as_str(), link.slot)) {
                    return Err(integrity(format!(
                        "two matches feed the same slot of {}",
                        link.match_id
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_results(&self) -> Result<(), BracketError> {
        for match_ in &self.matches {
            if match_.status > MatchStatus::Waiting && !match_.is_ready() {
                return Err(integrity(format!(
                    "{} is {} with an empty slot",
                    match_.id, match_.status
                )));
            }

            let consistent = match (&match_.result, match_.is_finished()) {
                (None, false) => true,
                (Some(MatchResult::Winner { user_id }), true) => match_.involves(user_id),
                (Some(MatchResult::Draw), true) => self.format.allows_draws(),
                _ => false,
            };
            if !consistent {
                return Err(integrity(format!(
                    "{} has a result inconsistent with its status",
                    match_.id
                )));
            }
        }
        Ok(())
    }
}
