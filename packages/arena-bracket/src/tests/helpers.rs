use arena_interface::competition::{
    matches::{Match, MatchStatus},
    participant::Participant,
    state::{BracketSettings, Tournament, TournamentFormat},
};
use chrono::{DateTime, TimeZone, Utc};

use crate::{generate, Bracket};

pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
}

/// `p1` is the highest rated, so rating seeding keeps the numbering
pub(crate) fn players(count: usize) -> Vec<Participant> {
    (1..=count)
        .map(|i| Participant::new(format!("p{}", i), format!("player{}", i), 2000 - i as u32 * 10))
        .collect()
}

pub(crate) fn tournament(format: TournamentFormat, count: usize) -> Tournament {
    Tournament::new("cup", "Weekend Cup", format, players(count), start_time())
}

pub(crate) fn bracket(format: TournamentFormat, count: usize) -> Bracket {
    generate(&tournament(format, count)).unwrap()
}

pub(crate) fn bracket_with(
    format: TournamentFormat,
    count: usize,
    settings: BracketSettings,
) -> Bracket {
    generate(&tournament(format, count).with_settings(settings)).unwrap()
}

pub(crate) fn next_pending(bracket: &Bracket) -> Option<Match> {
    bracket
        .matches()
        .iter()
        .find(|m| m.status == MatchStatus::Pending)
        .cloned()
}

/// Plays every reachable match, letting `pick` choose each winner
pub(crate) fn play_out(bracket: &mut Bracket, pick: impl Fn(&Match) -> String) {
    while let Some(match_) = next_pending(bracket) {
        let winner = pick(&match_);
        bracket
            .advance_winner_at(&match_.id, &winner, start_time())
            .unwrap();
    }
}

pub(crate) fn first_slot_wins(match_: &Match) -> String {
    match_.participant_1.clone().unwrap()
}

/// Lower player number wins, so the top seed takes everything
pub(crate) fn better_seed_wins(match_: &Match) -> String {
    let number = |id: &String| id.trim_start_matches('p').parse::<u32>().unwrap();
    let a = match_.participant_1.clone().unwrap();
    let b = match_.participant_2.clone().unwrap();
    if number(&a) < number(&b) {
        a
    } else {
        b
    }
}
