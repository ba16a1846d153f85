use arena_interface::competition::{
    matches::{Match, Slot},
    participant::Participant,
};

use crate::{match_id, BracketError};

/// Pairings per round by seed index, using the circle method.
///
/// One position stays fixed while the rest rotate. With an odd field a phantom position is
/// added and whoever faces it sits the round out.
pub(crate) fn pairings(count: usize) -> Vec<Vec<(usize, usize)>> {
    if count < 2 {
        return vec![];
    }

    let rounds = if count % 2 == 1 { count } else { count - 1 };
    let matches_per_round = (rounds + 1) / 2;

    // Positions 0..count are real, `count` itself is the phantom on odd fields
    let mut table: Vec<usize> = (0..=rounds).collect();

    let mut schedule = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let round = (0..matches_per_round)
            .map(|m| (table[m], table[table.len() - 1 - m]))
            .filter(|&(a, b)| a < count && b < count)
            .collect();
        schedule.push(round);

        if let Some(last) = table.pop() {
            table.insert(1, last);
        }
    }

    schedule
}

pub(crate) fn build_matches(
    seeded: &[Participant],
    best_of: u32,
) -> Result<(u32, Vec<Match>), BracketError> {
    let rounds = pairings(seeded.len());
    let mut matches = vec![];

    for (r, round_pairings) in rounds.iter().enumerate() {
        let round = r as u32 + 1;
        for (p, &(a, b)) in round_pairings.iter().enumerate() {
            let position = p as u32 + 1;
            let mut match_ = Match::new(
                match_id(None, round, position),
                round,
                position,
                None,
                best_of,
            );
            match_.fill(Slot::First, seeded[a].user_id.clone())?;
            match_.fill(Slot::Second, seeded[b].user_id.clone())?;
            matches.push(match_);
        }
    }

    Ok((rounds.len() as u32, matches))
}
