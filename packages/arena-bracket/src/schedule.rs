use std::collections::BTreeMap;

use arena_interface::competition::{
    matches::{BracketSide, Match},
    schedule::{ScheduleConfig, ScheduleRound, ScheduledMatch},
};
use chrono::{DateTime, Utc};
use itertools::Itertools;

/// Dependency depth of a match: everything feeding it sits at a lower phase
pub(crate) fn phase(match_: &Match, winners_rounds: u32) -> u32 {
    match match_.bracket {
        None | Some(BracketSide::Winners) => match_.round,
        Some(BracketSide::Losers) => match_.round + 1,
        Some(BracketSide::GrandFinals) => 2 * winners_rounds + match_.round - 1,
        Some(BracketSide::ThirdPlace) => winners_rounds,
    }
}

fn label(match_: &Match) -> String {
    match match_.bracket {
        None => format!("Round {}", match_.round),
        Some(BracketSide::Winners) => format!("Winners Round {}", match_.round),
        Some(BracketSide::Losers) => format!("Losers Round {}", match_.round),
        Some(BracketSide::GrandFinals) if match_.round > 1 => "Grand Final Reset".to_string(),
        Some(BracketSide::GrandFinals) => "Grand Final".to_string(),
        Some(BracketSide::ThirdPlace) => "Third Place".to_string(),
    }
}

/// Projects start times for every match and stamps them onto `scheduled_at`.
///
/// Rounds are spaced by `round_gap_percent` of a match duration and matches inside a round are
/// staggered, so the result is fully determined by the start time and the config.
pub(crate) fn build(
    matches: &mut [Match],
    winners_rounds: u32,
    start: DateTime<Utc>,
    config: &ScheduleConfig,
) -> Vec<ScheduleRound> {
    let mut phases: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, match_) in matches.iter().enumerate() {
        phases
            .entry(phase(match_, winners_rounds))
            .or_default()
            .push(i);
    }

    let mut rounds = Vec::with_capacity(phases.len());
    for (offset, (phase, members)) in phases.into_iter().enumerate() {
        let starts_at = start + config.round_offset(offset as u32);

        let mut scheduled = Vec::with_capacity(members.len());
        for (j, &i) in members.iter().enumerate() {
            let match_start = starts_at + config.stagger() * j as i32;
            matches[i].scheduled_at = Some(match_start);
            scheduled.push(ScheduledMatch {
                match_id: matches[i].id.clone(),
                starts_at: match_start,
                ends_at: match_start + config.match_duration(),
            });
        }

        let count = members.len() as u32;
        rounds.push(ScheduleRound {
            index: phase,
            label: members.iter().map(|&i| label(&matches[i])).unique().join(" / "),
            starts_at,
            estimated_minutes: config.match_duration_minutes
                + count.saturating_sub(1) * config.match_stagger_minutes,
            matches: scheduled,
        });
    }

    rounds
}
