use arena_interface::competition::{
    matches::{BracketSide, MatchStatus, Slot},
    state::{BracketSettings, TournamentFormat},
};

use crate::{
    generate,
    tests::helpers::{
        better_seed_wins, bracket, bracket_with, play_out, start_time, tournament,
    },
    BracketError,
};

const FORMAT: TournamentFormat = TournamentFormat::SingleElimination;

#[test]
fn test_match_and_round_counts() {
    for count in 2..=33usize {
        let bracket = bracket(FORMAT, count);
        let rounds = count.next_power_of_two().trailing_zeros();

        assert_eq!(bracket.matches().len(), count - 1, "{} participants", count);
        assert_eq!(bracket.total_rounds(), rounds, "{} participants", count);
    }
}

#[test]
fn test_eight_players() {
    let mut bracket = bracket(FORMAT, 8);
    assert_eq!(bracket.total_rounds(), 3);
    assert_eq!(bracket.matches().len(), 7);

    let pairs: Vec<(String, String)> = bracket
        .matches_in_round(None, 1)
        .iter()
        .map(|m| {
            (
                m.participant_1.clone().unwrap(),
                m.participant_2.clone().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("p1".to_string(), "p8".to_string()),
            ("p4".to_string(), "p5".to_string()),
            ("p2".to_string(), "p7".to_string()),
            ("p3".to_string(), "p6".to_string()),
        ]
    );

    let first = bracket.get("R1-M1").unwrap();
    let link = first.next_match_winner.clone().unwrap();
    assert_eq!(link.match_id, "R2-M1");
    assert_eq!(link.slot, Slot::First);
    assert_eq!(
        bracket.get("R1-M2").unwrap().next_match_winner.clone().unwrap().slot,
        Slot::Second
    );

    for match_ in bracket.matches_in_round(None, 1).into_iter().cloned().collect::<Vec<_>>() {
        let winner = match_.participant_1.unwrap();
        bracket.advance_winner(&match_.id, &winner).unwrap();
    }

    let round_two = bracket.matches_in_round(None, 2);
    assert_eq!(round_two.len(), 2);
    for match_ in round_two {
        assert!(match_.is_ready());
        assert_eq!(match_.status, MatchStatus::Pending);
    }
    assert_eq!(bracket.get("R2-M1").unwrap().participant_1.as_deref(), Some("p1"));
    assert_eq!(bracket.get("R2-M1").unwrap().participant_2.as_deref(), Some("p4"));
}

#[test]
fn test_byes_go_to_top_seeds() {
    let bracket = bracket(FORMAT, 5);
    assert_eq!(bracket.matches().len(), 4);

    let round_one = bracket.matches_in_round(None, 1);
    assert_eq!(round_one.len(), 1);
    assert_eq!(round_one[0].id, "R1-M2");
    assert_eq!(round_one[0].participant_1.as_deref(), Some("p4"));
    assert_eq!(round_one[0].participant_2.as_deref(), Some("p5"));

    let top = bracket.get("R2-M1").unwrap();
    assert_eq!(top.participant_1.as_deref(), Some("p1"));
    assert_eq!(top.participant_2, None);
    assert_eq!(top.status, MatchStatus::Waiting);

    let bottom = bracket.get("R2-M2").unwrap();
    assert_eq!(bottom.participant_1.as_deref(), Some("p2"));
    assert_eq!(bottom.participant_2.as_deref(), Some("p3"));
    assert_eq!(bottom.status, MatchStatus::Pending);
}

#[test]
fn test_two_players() {
    let mut bracket = bracket(FORMAT, 2);
    assert_eq!(bracket.matches().len(), 1);
    assert!(bracket.champion().is_none());

    bracket.advance_winner("R1-M1", "p2").unwrap();
    assert!(bracket.is_complete());
    assert_eq!(bracket.champion(), Some("p2".to_string()));
    assert!(bracket.participant("p1").unwrap().eliminated);
}

#[test]
fn test_play_out_crowns_top_seed() {
    let mut bracket = bracket(FORMAT, 13);
    play_out(&mut bracket, better_seed_wins);

    assert!(bracket.is_complete());
    assert_eq!(bracket.champion(), Some("p1".to_string()));

    let placements = bracket.placements().unwrap();
    assert_eq!(placements[0].user_id, "p1");
    assert_eq!(placements[1].user_id, "p2");

    let alive: Vec<&str> = bracket
        .participants()
        .iter()
        .filter(|p| !p.eliminated)
        .map(|p| p.user_id.as_str())
        .collect();
    assert_eq!(alive, vec!["p1"]);
}

#[test]
fn test_third_place_match() {
    let settings = BracketSettings {
        play_third_place_match: true,
        ..Default::default()
    };
    let mut bracket = bracket_with(FORMAT, 8, settings.clone());
    assert_eq!(bracket.matches().len(), 8);

    let third = bracket.match_at(Some(BracketSide::ThirdPlace), 1, 1).unwrap();
    assert_eq!(third.id, "3P");
    assert_eq!(third.status, MatchStatus::Waiting);

    play_out(&mut bracket, better_seed_wins);
    let placements = bracket.placements().unwrap();
    let order: Vec<&str> = placements.iter().map(|p| p.user_id.as_str()).collect();
    assert_eq!(order, vec!["p1", "p2", "p3", "p4"]);

    let result = generate(&tournament(FORMAT, 3).with_settings(settings));
    assert_eq!(
        result,
        Err(BracketError::InsufficientParticipants {
            required: 4,
            actual: 3
        })
    );
}

#[test]
fn test_insufficient_participants() {
    let result = generate(&tournament(FORMAT, 1));
    assert_eq!(
        result,
        Err(BracketError::InsufficientParticipants {
            required: 2,
            actual: 1
        })
    );
}

#[test]
fn test_duplicate_participants() {
    let mut tournament = tournament(FORMAT, 4);
    tournament.participants[3].user_id = "p1".to_string();

    assert!(matches!(
        generate(&tournament),
        Err(BracketError::BracketIntegrity { .. })
    ));
}

#[test]
fn test_tree() {
    let bracket = bracket(FORMAT, 6);
    let tree = bracket.tree().unwrap();

    assert_eq!(tree.match_id, "R3-M1");
    assert_eq!(tree.feeders.len(), 2);

    // Both semi-finals exist, but only the matches actually played feed them
    let feeder_count: usize = tree.feeders.iter().map(|f| f.feeders.len()).sum();
    assert_eq!(feeder_count, 2);
    assert_eq!(bracket.schedule()[0].starts_at, start_time());
}
