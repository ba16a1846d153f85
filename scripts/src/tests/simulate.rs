use arena_interface::competition::state::{BracketSettings, TournamentFormat};

use super::helpers::{rng, start_time};
use crate::simulate::{field, run};

const FORMATS: [TournamentFormat; 4] = [
    TournamentFormat::SingleElimination,
    TournamentFormat::DoubleElimination,
    TournamentFormat::RoundRobin,
    TournamentFormat::Swiss,
];

#[test]
fn test_field_ratings_in_range() {
    let players = field(32, &mut rng(1));

    assert_eq!(players.len(), 32);
    assert!(players
        .iter()
        .all(|p| (800..=2400).contains(&p.rating) && p.games_played() == 0));
}

#[test]
fn test_every_format_plays_out() {
    for format in FORMATS {
        for count in [2, 3, 5, 8, 13] {
            let bracket = run(
                format,
                count,
                BracketSettings::default(),
                start_time(),
                &mut rng(count as u64),
            )
            .unwrap();

            assert!(bracket.is_complete(), "{} with {}", format, count);
            assert!(bracket.matches().iter().all(|m| m.scheduled_at.is_some()));

            let placements = bracket.placements().unwrap();
            assert_eq!(
                placements.first().map(|p| p.user_id.clone()),
                bracket.champion()
            );
            if !format.is_elimination() {
                assert_eq!(placements.len(), count, "{} with {}", format, count);
            }
        }
    }
}

#[test]
fn test_single_elimination_losers_are_out() {
    let bracket = run(
        TournamentFormat::SingleElimination,
        11,
        BracketSettings::default(),
        start_time(),
        &mut rng(11),
    )
    .unwrap();
    let champion = bracket.champion().unwrap();

    for participant in bracket.participants() {
        if participant.user_id == champion {
            assert_eq!(participant.losses, 0);
            assert!(!participant.eliminated);
        } else {
            assert_eq!(participant.losses, 1, "{}", participant.user_id);
            assert!(participant.eliminated);
        }
    }
}

#[test]
fn test_double_elimination_takes_two_losses() {
    for seed in 0..5 {
        let bracket = run(
            TournamentFormat::DoubleElimination,
            9,
            BracketSettings::default(),
            start_time(),
            &mut rng(seed),
        )
        .unwrap();
        let champion = bracket.champion().unwrap();

        for participant in bracket.participants() {
            if participant.user_id == champion {
                assert!(participant.losses <= 1);
            } else {
                assert_eq!(participant.losses, 2, "{}", participant.user_id);
                assert!(participant.eliminated);
            }
        }
    }
}

#[test]
fn test_round_robin_everyone_meets() {
    for count in [4, 7] {
        let bracket = run(
            TournamentFormat::RoundRobin,
            count,
            BracketSettings::default(),
            start_time(),
            &mut rng(3),
        )
        .unwrap();

        assert!(bracket
            .participants()
            .iter()
            .all(|p| p.games_played() == count as u32 - 1));
    }
}

#[test]
fn test_swiss_plays_every_round() {
    let bracket = run(
        TournamentFormat::Swiss,
        16,
        BracketSettings::default(),
        start_time(),
        &mut rng(16),
    )
    .unwrap();

    assert_eq!(bracket.total_rounds(), 4);
    assert_eq!(bracket.current_round(), 4);
    assert!(bracket.participants().iter().all(|p| p.games_played() <= 4));
}

#[test]
fn test_series_stop_at_wins_needed() {
    let settings = BracketSettings {
        best_of: 3,
        ..Default::default()
    };
    let bracket = run(
        TournamentFormat::SingleElimination,
        8,
        settings,
        start_time(),
        &mut rng(5),
    )
    .unwrap();

    for match_ in bracket.matches() {
        let (a, b) = (match_.score.participant_1, match_.score.participant_2);
        assert_eq!(a.max(b), 2, "{}", match_.id);
        assert!(a.min(b) < 2);
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let play = || {
        run(
            TournamentFormat::DoubleElimination,
            12,
            BracketSettings::default(),
            start_time(),
            &mut rng(42),
        )
        .unwrap()
    };

    assert_eq!(play(), play());
}
