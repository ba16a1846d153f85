use arena_divisions::DivisionConfig;
use arena_interface::competition::schedule::ScheduleConfig;

use crate::config::{parse, ArenaConfig};

#[test]
fn test_empty_config_uses_defaults() {
    assert_eq!(parse("{}").unwrap(), ArenaConfig::default());
}

#[test]
fn test_partial_division_section() {
    let config = parse(r#"{ "divisions": { "k_factor": 40, "placement_games": 5 } }"#).unwrap();

    assert_eq!(config.schedule, ScheduleConfig::default());
    assert_eq!(
        config.divisions,
        DivisionConfig {
            k_factor: 40,
            placement_games: 5,
            ..Default::default()
        }
    );
}

#[test]
fn test_full_schedule_section() {
    let config = parse(
        r#"{
            "schedule": {
                "match_duration_minutes": 20,
                "round_gap_percent": 200,
                "match_stagger_minutes": 0
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.schedule.match_duration_minutes, 20);
    assert_eq!(config.schedule.round_gap_percent, 200);
    assert_eq!(config.divisions, DivisionConfig::default());
}

#[test]
fn test_unknown_section_rejected() {
    assert!(parse(r#"{ "payments": {} }"#).is_err());
    assert!(parse("not json").is_err());
}
