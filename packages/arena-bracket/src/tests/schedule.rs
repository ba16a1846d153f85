use arena_interface::competition::{
    matches::BracketSide,
    schedule::ScheduleConfig,
    state::{BracketSettings, TournamentFormat},
};
use chrono::Duration;

use crate::tests::helpers::{bracket, bracket_with, start_time};

#[test]
fn test_single_elimination_schedule() {
    let bracket = bracket(TournamentFormat::SingleElimination, 8);
    let schedule = bracket.schedule();
    assert_eq!(schedule.len(), 3);

    let first = &schedule[0];
    assert_eq!(first.index, 1);
    assert_eq!(first.label, "Round 1");
    assert_eq!(first.starts_at, start_time());
    assert_eq!(first.estimated_minutes, 45);
    let starts: Vec<i64> = first
        .matches
        .iter()
        .map(|m| (m.starts_at - start_time()).num_minutes())
        .collect();
    assert_eq!(starts, vec![0, 5, 10, 15]);
    assert_eq!(
        first.matches[0].ends_at,
        start_time() + Duration::minutes(30)
    );

    assert_eq!(schedule[1].starts_at, start_time() + Duration::minutes(45));
    assert_eq!(schedule[2].starts_at, start_time() + Duration::minutes(90));
    assert_eq!(schedule[2].estimated_minutes, 30);

    let final_match = bracket.get("R3-M1").unwrap();
    assert_eq!(final_match.scheduled_at, Some(schedule[2].starts_at));
}

#[test]
fn test_double_elimination_phases() {
    let bracket = bracket(TournamentFormat::DoubleElimination, 8);
    let schedule = bracket.schedule();

    // Winners rounds 1..3, losers rounds shifted by one, grand final last
    assert_eq!(schedule.len(), 6);
    assert_eq!(schedule[1].label, "Winners Round 2 / Losers Round 1");
    assert_eq!(schedule[5].label, "Grand Final");
    assert_eq!(schedule[5].index, 6);

    let grand_final = bracket.match_at(Some(BracketSide::GrandFinals), 1, 1).unwrap();
    assert_eq!(grand_final.scheduled_at, Some(schedule[5].starts_at));
}

#[test]
fn test_custom_config() {
    let settings = BracketSettings {
        schedule: ScheduleConfig {
            match_duration_minutes: 20,
            round_gap_percent: 100,
            match_stagger_minutes: 0,
        },
        ..Default::default()
    };
    let bracket = bracket_with(TournamentFormat::RoundRobin, 4, settings);
    let schedule = bracket.schedule();

    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule[2].starts_at, start_time() + Duration::minutes(40));
    assert_eq!(schedule[2].estimated_minutes, 20);
    assert!(schedule[2]
        .matches
        .iter()
        .all(|m| m.starts_at == schedule[2].starts_at));
}
