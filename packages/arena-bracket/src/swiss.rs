//! Round-by-round Swiss pairing.

use std::collections::{HashMap, HashSet};

use arena_interface::competition::{
    matches::{Bye, Match, MatchResult, Slot},
    participant::Participant,
    state::TournamentFormat,
};
use itertools::Itertools;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{match_id, Bracket, BracketError};

/// Pairings produced for one Swiss round
#[derive(Debug, Clone, PartialEq)]
pub struct SwissRound {
    pub matches: Vec<Match>,
    pub bye: Option<Bye>,
    /// Participants left without a legal opponent this round
    pub unpaired: Vec<String>,
}

/// Running Swiss score: 1 per win, 0.5 per draw, 1 per bye
pub fn scores(
    participants: &[Participant],
    prior_matches: &[Match],
    prior_byes: &[Bye],
) -> HashMap<String, Decimal> {
    let mut scores: HashMap<String, Decimal> = participants
        .iter()
        .map(|p| (p.user_id.clone(), Decimal::ZERO))
        .collect();

    for match_ in prior_matches.iter().filter(|m| m.is_finished()) {
        match &match_.result {
            Some(MatchResult::Winner { user_id }) => {
                if let Some(score) = scores.get_mut(user_id) {
                    *score += Decimal::ONE;
                }
            }
            Some(MatchResult::Draw) => {
                for user_id in [&match_.participant_1, &match_.participant_2]
                    .into_iter()
                    .flatten()
                {
                    if let Some(score) = scores.get_mut(user_id) {
                        *score += dec!(0.5);
                    }
                }
            }
            None => {}
        }
    }

    for bye in prior_byes {
        if let Some(score) = scores.get_mut(&bye.user_id) {
            *score += Decimal::ONE;
        }
    }

    scores
}

fn pairing_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pairs `round` from the running scores.
///
/// `participants` must be in seed order, which breaks score ties. With an odd field the
/// lowest-ranked participant who has not had a bye sits out first. Everyone else is paired
/// top-down with the first lower-ranked participant they have not met yet.
pub fn pair_round(
    participants: &[Participant],
    round: u32,
    prior_matches: &[Match],
    prior_byes: &[Bye],
    best_of: u32,
) -> Result<SwissRound, BracketError> {
    let scores = scores(participants, prior_matches, prior_byes);
    let played: HashSet<(&str, &str)> = prior_matches
        .iter()
        .filter_map(|m| {
            Some(pairing_key(
                m.participant_1.as_deref()?,
                m.participant_2.as_deref()?,
            ))
        })
        .collect();

    let mut ranked: Vec<&Participant> = participants
        .iter()
        .sorted_by(|a, b| scores[&b.user_id].cmp(&scores[&a.user_id]))
        .collect();

    let mut bye = None;
    if ranked.len() % 2 == 1 {
        let had_bye: HashSet<&str> = prior_byes.iter().map(|b| b.user_id.as_str()).collect();
        let pick = ranked
            .iter()
            .rposition(|p| !had_bye.contains(p.user_id.as_str()))
            .unwrap_or(ranked.len() - 1);
        let sitting_out = ranked.remove(pick);
        bye = Some(Bye {
            round,
            user_id: sitting_out.user_id.clone(),
        });
    }

    let mut paired = vec![false; ranked.len()];
    let mut matches = vec![];
    for i in 0..ranked.len() {
        if paired[i] {
            continue;
        }
        let opponent = (i + 1..ranked.len()).find(|&j| {
            !paired[j]
                && !played.contains(&pairing_key(&ranked[i].user_id, &ranked[j].user_id))
        });

        if let Some(j) = opponent {
            paired[i] = true;
            paired[j] = true;

            let position = matches.len() as u32 + 1;
            let mut match_ =
                Match::new(match_id(None, round, position), round, position, None, best_of);
            match_.fill(Slot::First, ranked[i].user_id.clone())?;
            match_.fill(Slot::Second, ranked[j].user_id.clone())?;
            matches.push(match_);
        }
    }

    let unpaired: Vec<String> = ranked
        .iter()
        .zip(&paired)
        .filter(|(_, &seated)| !seated)
        .map(|(p, _)| p.user_id.clone())
        .collect();
    if !unpaired.is_empty() {
        warn!(
            "swiss round {}: no legal opponent left for {}",
            round,
            unpaired.join(", ")
        );
    }

    Ok(SwissRound {
        matches,
        bye,
        unpaired,
    })
}

impl Bracket {
    /// Pairs the next Swiss round once every match of the current one is finished
    pub fn pair_next_swiss_round(&mut self) -> Result<Vec<Match>, BracketError> {
        if self.format != TournamentFormat::Swiss {
            return Err(BracketError::InvalidFormat {
                format: self.format.to_string(),
            });
        }

        let current = self.current_round();
        if current >= self.total_rounds {
            return Err(BracketError::AllRoundsPaired {
                total_rounds: self.total_rounds,
            });
        }
        if self
            .matches
            .iter()
            .any(|m| m.round == current && !m.is_finished())
        {
            return Err(BracketError::RoundIncomplete { round: current });
        }

        let first = self.matches.len();
        self.pair_swiss_round(current + 1)?;
        Ok(self.matches[first..].to_vec())
    }

    pub(crate) fn pair_swiss_round(&mut self, round: u32) -> Result<(), BracketError> {
        let paired = pair_round(
            &self.participants,
            round,
            &self.matches,
            &self.byes,
            self.settings.best_of,
        )?;

        for match_ in paired.matches {
            self.push_match(match_)?;
        }
        if let Some(bye) = paired.bye {
            debug!("{} sits out swiss round {}", bye.user_id, round);
            self.byes.push(bye);
        }

        self.refresh_schedule();
        Ok(())
    }
}
