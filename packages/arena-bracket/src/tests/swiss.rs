use std::collections::HashSet;

use arena_interface::competition::{matches::Match, state::TournamentFormat};

use crate::{
    tests::helpers::{bracket, first_slot_wins, start_time},
    Bracket, BracketError,
};

const FORMAT: TournamentFormat = TournamentFormat::Swiss;

fn finish_round(bracket: &mut Bracket, round: u32) {
    let matches: Vec<Match> = bracket
        .matches_in_round(None, round)
        .into_iter()
        .cloned()
        .collect();
    for match_ in matches {
        bracket
            .advance_winner_at(&match_.id, &first_slot_wins(&match_), start_time())
            .unwrap();
    }
}

fn pairings(matches: &[Match]) -> HashSet<(String, String)> {
    matches
        .iter()
        .map(|m| {
            let a = m.participant_1.clone().unwrap();
            let b = m.participant_2.clone().unwrap();
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

#[test]
fn test_first_round_follows_seed_order() {
    let bracket = bracket(FORMAT, 8);
    assert_eq!(bracket.total_rounds(), 3);
    assert_eq!(bracket.matches().len(), 4);

    let first = bracket.get("R1-M1").unwrap();
    assert_eq!(first.participant_1.as_deref(), Some("p1"));
    assert_eq!(first.participant_2.as_deref(), Some("p2"));
    let last = bracket.get("R1-M4").unwrap();
    assert_eq!(last.participant_1.as_deref(), Some("p7"));
    assert_eq!(last.participant_2.as_deref(), Some("p8"));
}

#[test]
fn test_second_round_avoids_rematches() {
    let mut bracket = bracket(FORMAT, 8);

    assert_eq!(
        bracket.pair_next_swiss_round(),
        Err(BracketError::RoundIncomplete { round: 1 })
    );

    finish_round(&mut bracket, 1);
    let played: Vec<Match> = bracket
        .matches_in_round(None, 1)
        .into_iter()
        .cloned()
        .collect();
    let round_one = pairings(&played);
    let round_two = bracket.pair_next_swiss_round().unwrap();

    assert_eq!(round_two.len(), 4);
    assert!(pairings(&round_two).is_disjoint(&round_one));

    // Winners meet winners
    let top = &round_two[0];
    assert_eq!(top.participant_1.as_deref(), Some("p1"));
    assert_eq!(top.participant_2.as_deref(), Some("p3"));
}

#[test]
fn test_odd_field_gets_one_bye_per_round() {
    let mut bracket = bracket(FORMAT, 7);
    assert_eq!(bracket.total_rounds(), 3);

    for round in 1..=3 {
        if round > 1 {
            bracket.pair_next_swiss_round().unwrap();
        }
        assert_eq!(bracket.byes().iter().filter(|b| b.round == round).count(), 1);
        finish_round(&mut bracket, round);
    }

    let recipients: HashSet<&str> = bracket.byes().iter().map(|b| b.user_id.as_str()).collect();
    assert_eq!(recipients.len(), 3);
    assert_eq!(bracket.byes()[0].user_id, "p7");

    assert_eq!(
        bracket.pair_next_swiss_round(),
        Err(BracketError::AllRoundsPaired { total_rounds: 3 })
    );
    assert!(bracket.is_complete());

    let standings = bracket.standings();
    let bye_total: u32 = standings.iter().map(|s| s.byes).sum();
    assert_eq!(bye_total, 3);
}

#[test]
fn test_pairing_requires_swiss() {
    let mut bracket = bracket(TournamentFormat::RoundRobin, 4);
    assert_eq!(
        bracket.pair_next_swiss_round(),
        Err(BracketError::InvalidFormat {
            format: "round_robin".to_string()
        })
    );
}
