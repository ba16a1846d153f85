use std::str::FromStr;

use crate::{
    competition::{
        matches::{Match, MatchResult, MatchStatus, Slot},
        schedule::ScheduleConfig,
        state::{SeedingMethod, TournamentFormat},
    },
    ratings::{DemotionShield, GameResult, SeasonStats, Tier},
    InterfaceError,
};

#[test]
fn test_format_parsing() {
    assert_eq!(
        TournamentFormat::from_str("single-elimination"),
        Ok(TournamentFormat::SingleElimination)
    );
    assert_eq!(
        TournamentFormat::from_str("Round_Robin"),
        Ok(TournamentFormat::RoundRobin)
    );
    assert_eq!(
        TournamentFormat::from_str("ladder"),
        Err(InterfaceError::InvalidFormat {
            format: "ladder".to_string()
        })
    );
    assert_eq!(SeedingMethod::from_str("elo"), Ok(SeedingMethod::Rating));
}

#[test]
fn test_format_serializes_snake_case() {
    let json = serde_json::to_string(&TournamentFormat::DoubleElimination).unwrap();
    assert_eq!(json, "\"double_elimination\"");

    let status: MatchStatus = serde_json::from_str("\"pending\"").unwrap();
    assert_eq!(status, MatchStatus::Pending);
}

#[test]
fn test_status_only_moves_forward() {
    assert!(MatchStatus::Waiting.can_transition_to(MatchStatus::Pending));
    assert!(MatchStatus::Pending.can_transition_to(MatchStatus::Finished));
    assert!(!MatchStatus::Waiting.can_transition_to(MatchStatus::Active));
    assert!(!MatchStatus::Finished.can_transition_to(MatchStatus::Active));
    assert!(!MatchStatus::Active.can_transition_to(MatchStatus::Pending));
    assert!(!MatchStatus::Pending.can_transition_to(MatchStatus::Pending));
}

#[test]
fn test_fill_promotes_to_pending() {
    let mut match_ = Match::new("R2-M1", 2, 1, None, 1);
    match_.fill(Slot::Second, "bob").unwrap();
    assert_eq!(match_.status, MatchStatus::Waiting);

    match_.fill(Slot::First, "alice").unwrap();
    assert_eq!(match_.status, MatchStatus::Pending);
    assert_eq!(match_.opponent_of("alice"), Some(&"bob".to_string()));

    let result = match_.fill(Slot::First, "carol");
    assert_eq!(
        result,
        Err(InterfaceError::SlotOccupied {
            match_id: "R2-M1".to_string()
        })
    );
}

#[test]
fn test_winner_and_loser() {
    let mut match_ = Match::new("R1-M1", 1, 1, None, 3);
    match_.fill(Slot::First, "alice").unwrap();
    match_.fill(Slot::Second, "bob").unwrap();
    match_.result = Some(MatchResult::Winner {
        user_id: "bob".to_string(),
    });

    assert_eq!(match_.winner(), Some("bob"));
    assert_eq!(match_.loser(), Some(&"alice".to_string()));
    assert_eq!(match_.wins_needed(), 2);
}

#[test]
fn test_schedule_round_offset() {
    let config = ScheduleConfig::default();
    assert_eq!(config.round_offset(0).num_minutes(), 0);
    assert_eq!(config.round_offset(1).num_minutes(), 45);
    assert_eq!(config.round_offset(4).num_minutes(), 180);
}

#[test]
fn test_tier_order() {
    assert_eq!(Tier::Bronze.next(), Some(Tier::Silver));
    assert_eq!(Tier::Master.next(), None);
    assert_eq!(Tier::Bronze.previous(), None);
    assert!(Tier::Diamond > Tier::Platinum);
}

#[test]
fn test_shield_runs_out() {
    let mut shield = DemotionShield::activate(2);
    shield.consume();
    assert!(shield.active);
    shield.consume();
    assert!(!shield.active);
    assert_eq!(shield.games_remaining, 0);
}

#[test]
fn test_season_stats_streaks() {
    let mut stats = SeasonStats::new(1);
    stats.record(GameResult::Win, 80.0, 250.0);
    stats.record(GameResult::Win, 60.0, 350.0);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.best_win_streak, 2);
    assert_eq!(stats.avg_accuracy, 70.0);

    stats.record(GameResult::Loss, 70.0, 300.0);
    assert_eq!(stats.current_streak, -1);
    assert_eq!(stats.best_win_streak, 2);
    assert_eq!(stats.games_played, 3);
}
