use std::collections::HashMap;

use arena_interface::competition::{
    matches::{BracketSide, MatchResult},
    state::TournamentFormat,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::{Bracket, BracketError};

/// Points table row for round robin and Swiss
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub user_id: String,
    pub points: Decimal,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub byes: u32,
}

impl Standing {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            points: Decimal::ZERO,
            wins: 0,
            draws: 0,
            losses: 0,
            byes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub place: u32,
    pub user_id: String,
}

impl Bracket {
    /// Points table over finished matches, best first.
    ///
    /// Wins and byes score 1, draws 0.5. Ties fall back to wins and then to seed order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: HashMap<&str, Standing> = self
            .participants
            .iter()
            .map(|p| (p.user_id.as_str(), Standing::new(&p.user_id)))
            .collect();

        for match_ in self.matches.iter().filter(|m| m.is_finished()) {
            let players = [&match_.participant_1, &match_.participant_2];
            for user_id in players.into_iter().flatten() {
                let Some(row) = rows.get_mut(user_id.as_str()) else {
                    continue;
                };
                match &match_.result {
                    Some(MatchResult::Winner { user_id: winner }) if winner == user_id => {
                        row.wins += 1;
                        row.points += Decimal::ONE;
                    }
                    Some(MatchResult::Winner { .. }) => row.losses += 1,
                    Some(MatchResult::Draw) => {
                        row.draws += 1;
                        row.points += dec!(0.5);
                    }
                    None => {}
                }
            }
        }

        for bye in &self.byes {
            if let Some(row) = rows.get_mut(bye.user_id.as_str()) {
                row.byes += 1;
                row.points += Decimal::ONE;
            }
        }

        let mut standings: Vec<Standing> = self
            .participants
            .iter()
            .filter_map(|p| rows.remove(p.user_id.as_str()))
            .collect();
        standings.sort_by(|a, b| b.points.cmp(&a.points).then(b.wins.cmp(&a.wins)));
        standings
    }

    /// Final placements once every match is played
    pub fn placements(&self) -> Result<Vec<Placement>, BracketError> {
        if !self.is_complete() {
            return Err(BracketError::TournamentIncomplete {});
        }

        let mut order: Vec<String> = vec![];
        match self.format {
            TournamentFormat::SingleElimination | TournamentFormat::DoubleElimination => {
                let deciding = self
                    .deciding_match()
                    .ok_or_else(|| BracketError::BracketIntegrity {
                        reason: "bracket has no deciding match".to_string(),
                    })?;
                order.extend(deciding.winner().map(str::to_string));
                order.extend(deciding.loser().cloned());

                let third = if self.format == TournamentFormat::SingleElimination {
                    self.match_at(Some(BracketSide::ThirdPlace), 1, 1)
                } else {
                    self.match_at(Some(BracketSide::Losers), self.losers_rounds, 1)
                };
                if let Some(third) = third {
                    if self.format == TournamentFormat::SingleElimination {
                        order.extend(third.winner().map(str::to_string));
                    }
                    order.extend(third.loser().cloned());
                }
            }
            TournamentFormat::RoundRobin | TournamentFormat::Swiss => {
                order.extend(self.standings().into_iter().map(|s| s.user_id));
            }
        }

        Ok(order
            .into_iter()
            .enumerate()
            .map(|(i, user_id)| Placement {
                place: i as u32 + 1,
                user_id,
            })
            .collect())
    }

    /// Tournament winner, once the bracket is complete
    pub fn champion(&self) -> Option<String> {
        self.placements()
            .ok()
            .and_then(|placements| placements.into_iter().next())
            .map(|placement| placement.user_id)
    }
}
