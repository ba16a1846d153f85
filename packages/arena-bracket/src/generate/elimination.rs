//! Elimination bracket layout.
//!
//! The full structural bracket (including slots that only ever see a bye) is drafted first as a
//! set of nodes whose two inputs are either a seeded entrant or the winner / loser of another
//! node. Bye propagation is then resolved over the draft, and only nodes with two real inputs
//! become matches. Links out of a live node skip over dropped nodes, since a dropped node would
//! simply pass its single real input along.

use std::collections::{BTreeMap, HashMap};

use arena_interface::competition::{
    matches::{BracketSide, Match, MatchLink, Slot},
    participant::Participant,
};
use itertools::Itertools;
use log::debug;

use crate::{match_id, seed_order::bracket_order, BracketError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct NodeKey {
    side: Option<BracketSide>,
    round: u32,
    position: u32,
}

impl NodeKey {
    fn new(side: Option<BracketSide>, round: u32, position: u32) -> Self {
        Self {
            side,
            round,
            position,
        }
    }

    fn depth(&self, winners_rounds: u32) -> u32 {
        match self.side {
            None | Some(BracketSide::Winners) => self.round,
            Some(BracketSide::Losers) => self.round + 1,
            Some(BracketSide::GrandFinals) => 2 * winners_rounds,
            Some(BracketSide::ThirdPlace) => winners_rounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Outcome {
    Winner,
    Loser,
}

#[derive(Debug, Clone, Copy)]
enum Feed {
    /// Seed index into the seeded list, `None` for a bye
    Entrant(Option<usize>),
    Winner(NodeKey),
    Loser(NodeKey),
}

/// A participant that skips straight past a dropped first-round node
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ByePlacement {
    pub user_id: String,
    pub link: MatchLink,
}

#[derive(Debug)]
pub(crate) struct Layout {
    winners_rounds: u32,
    entrants: usize,
    nodes: BTreeMap<NodeKey, [Feed; 2]>,
}

impl Layout {
    pub(crate) fn single_elimination(entrants: usize, third_place: bool) -> Layout {
        let mut layout = Layout::winners_side(None, entrants);
        if third_place && layout.winners_rounds >= 2 {
            let semis = layout.winners_rounds - 1;
            layout.nodes.insert(
                NodeKey::new(Some(BracketSide::ThirdPlace), 1, 1),
                [
                    Feed::Loser(NodeKey::new(None, semis, 1)),
                    Feed::Loser(NodeKey::new(None, semis, 2)),
                ],
            );
        }
        layout
    }

    pub(crate) fn double_elimination(entrants: usize) -> Layout {
        let winners = Some(BracketSide::Winners);
        let losers = Some(BracketSide::Losers);
        let mut layout = Layout::winners_side(winners, entrants);
        let size = 1usize << layout.winners_rounds;
        let losers_rounds = layout.losers_rounds();

        for j in 1..=losers_rounds {
            if j == 1 {
                for p in 1..=(size / 4) as u32 {
                    layout.nodes.insert(
                        NodeKey::new(losers, 1, p),
                        [
                            Feed::Loser(NodeKey::new(winners, 1, 2 * p - 1)),
                            Feed::Loser(NodeKey::new(winners, 1, 2 * p)),
                        ],
                    );
                }
            } else if j % 2 == 0 {
                // Feed-in round: losers winners meet the dropouts of winners round r + 1,
                // reversed every other time so early opponents do not meet again at once
                let r = j / 2;
                let count = (size >> (r + 1)) as u32;
                for p in 1..=count {
                    let dropout = if r % 2 == 1 { count - p + 1 } else { p };
                    layout.nodes.insert(
                        NodeKey::new(losers, j, p),
                        [
                            Feed::Winner(NodeKey::new(losers, j - 1, p)),
                            Feed::Loser(NodeKey::new(winners, r + 1, dropout)),
                        ],
                    );
                }
            } else {
                let r = (j - 1) / 2;
                let count = (size >> (r + 2)) as u32;
                for p in 1..=count {
                    layout.nodes.insert(
                        NodeKey::new(losers, j, p),
                        [
                            Feed::Winner(NodeKey::new(losers, j - 1, 2 * p - 1)),
                            Feed::Winner(NodeKey::new(losers, j - 1, 2 * p)),
                        ],
                    );
                }
            }
        }

        let losers_champion = if losers_rounds == 0 {
            Feed::Loser(NodeKey::new(winners, 1, 1))
        } else {
            Feed::Winner(NodeKey::new(losers, losers_rounds, 1))
        };
        layout.nodes.insert(
            NodeKey::new(Some(BracketSide::GrandFinals), 1, 1),
            [
                Feed::Winner(NodeKey::new(winners, layout.winners_rounds, 1)),
                losers_champion,
            ],
        );

        layout
    }

    fn winners_side(side: Option<BracketSide>, entrants: usize) -> Layout {
        let size = entrants.next_power_of_two().max(2);
        let winners_rounds = size.trailing_zeros();
        let mut nodes = BTreeMap::new();

        let order = bracket_order(size);
        for (p, (a, b)) in order.into_iter().tuples().enumerate() {
            let entrant = |seed: usize| Feed::Entrant((seed < entrants).then_some(seed));
            nodes.insert(
                NodeKey::new(side, 1, p as u32 + 1),
                [entrant(a), entrant(b)],
            );
        }

        for round in 2..=winners_rounds {
            for p in 1..=(size >> round) as u32 {
                nodes.insert(
                    NodeKey::new(side, round, p),
                    [
                        Feed::Winner(NodeKey::new(side, round - 1, 2 * p - 1)),
                        Feed::Winner(NodeKey::new(side, round - 1, 2 * p)),
                    ],
                );
            }
        }

        Layout {
            winners_rounds,
            entrants,
            nodes,
        }
    }

    pub(crate) fn winners_rounds(&self) -> u32 {
        self.winners_rounds
    }

    pub(crate) fn losers_rounds(&self) -> u32 {
        2 * self.winners_rounds.saturating_sub(1)
    }

    /// For every node, whether each of its two inputs can only ever deliver a bye.
    ///
    /// A winner output is a bye when both inputs are; a loser output is a bye as soon as one
    /// input is, because the real participant then advances without losing.
    fn resolve_byes(&self) -> HashMap<NodeKey, [bool; 2]> {
        let mut byes: HashMap<NodeKey, [bool; 2]> = HashMap::with_capacity(self.nodes.len());
        let ordered = self
            .nodes
            .keys()
            .sorted_by_key(|key| key.depth(self.winners_rounds));

        for key in ordered {
            let feeds = &self.nodes[key];
            let is_bye = |feed: &Feed| match feed {
                Feed::Entrant(entrant) => entrant.is_none(),
                Feed::Winner(source) => byes.get(source).map_or(true, |b| b[0] && b[1]),
                Feed::Loser(source) => byes.get(source).map_or(true, |b| b[0] || b[1]),
            };
            let resolved = [is_bye(&feeds[0]), is_bye(&feeds[1])];
            byes.insert(*key, resolved);
        }

        byes
    }

    /// Where each node's outputs are consumed
    fn destinations(&self) -> HashMap<(NodeKey, Outcome), (NodeKey, Slot)> {
        let mut destinations = HashMap::new();
        for (key, feeds) in &self.nodes {
            for (feed, slot) in feeds.iter().zip([Slot::First, Slot::Second]) {
                match feed {
                    Feed::Winner(source) => {
                        destinations.insert((*source, Outcome::Winner), (*key, slot));
                    }
                    Feed::Loser(source) => {
                        destinations.insert((*source, Outcome::Loser), (*key, slot));
                    }
                    Feed::Entrant(_) => {}
                }
            }
        }
        destinations
    }

    /// Turns the draft into matches for `seeded` participants.
    ///
    /// Returns the live matches in bracket order together with the participants who skip a
    /// dropped first-round node and where they land.
    pub(crate) fn materialize(
        &self,
        seeded: &[Participant],
        best_of: u32,
    ) -> Result<(Vec<Match>, Vec<ByePlacement>), BracketError> {
        if seeded.len() != self.entrants {
            return Err(BracketError::BracketIntegrity {
                reason: format!(
                    "layout drafted for {} entrants, got {}",
                    self.entrants,
                    seeded.len()
                ),
            });
        }

        let byes = self.resolve_byes();
        let destinations = self.destinations();
        let is_live = |key: &NodeKey| byes.get(key).map_or(false, |b| !b[0] && !b[1]);

        let forward = |mut target: Option<(NodeKey, Slot)>| -> Option<MatchLink> {
            while let Some((key, slot)) = target {
                if is_live(&key) {
                    return Some(MatchLink {
                        match_id: match_id(key.side, key.round, key.position),
                        slot,
                    });
                }
                target = destinations.get(&(key, Outcome::Winner)).copied();
            }
            None
        };

        let mut matches = vec![];
        let mut placements = vec![];

        for (key, feeds) in &self.nodes {
            let entrants = feeds.iter().zip([Slot::First, Slot::Second]).filter_map(
                |(feed, slot)| match feed {
                    Feed::Entrant(Some(seed)) => Some((&seeded[*seed], slot)),
                    _ => None,
                },
            );

            if is_live(key) {
                let mut match_ = Match::new(
                    match_id(key.side, key.round, key.position),
                    key.round,
                    key.position,
                    key.side,
                    best_of,
                );
                for (participant, slot) in entrants {
                    match_.fill(slot, participant.user_id.clone())?;
                }
                match_.next_match_winner =
                    forward(destinations.get(&(*key, Outcome::Winner)).copied());
                match_.next_match_loser =
                    forward(destinations.get(&(*key, Outcome::Loser)).copied());
                matches.push(match_);
            } else {
                for (participant, _) in entrants {
                    if let Some(link) =
                        forward(destinations.get(&(*key, Outcome::Winner)).copied())
                    {
                        debug!(
                            "{} receives a bye into {}",
                            participant.user_id, link.match_id
                        );
                        placements.push(ByePlacement {
                            user_id: participant.user_id.clone(),
                            link,
                        });
                    }
                }
            }
        }

        Ok((matches, placements))
    }
}
