use anyhow::bail;
use arena_bracket::{generate_with_rng, Bracket};
use arena_divisions::mmr::expected_score;
use arena_interface::competition::{
    matches::{Match, MatchStatus},
    participant::Participant,
    state::{BracketSettings, Tournament, TournamentFormat},
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;

/// Chance that a round robin or Swiss match ends level
const DRAW_CHANCE: f64 = 0.1;

pub fn field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Participant> {
    (1..=count)
        .map(|i| {
            Participant::new(
                format!("player-{}", i),
                format!("Player {}", i),
                rng.gen_range(800..=2400),
            )
        })
        .collect()
}

/// Generates a tournament over a random field and plays it to the end
pub fn run<R: Rng + ?Sized>(
    format: TournamentFormat,
    count: usize,
    settings: BracketSettings,
    start: DateTime<Utc>,
    rng: &mut R,
) -> anyhow::Result<Bracket> {
    let tournament = Tournament::new(
        format!("sim-{}", format),
        format!("Simulated {} cup", format),
        format,
        field(count, rng),
        start,
    )
    .with_settings(settings);
    let mut bracket = generate_with_rng(&tournament, rng)?;

    loop {
        let ready: Vec<Match> = bracket
            .matches()
            .iter()
            .filter(|m| m.status == MatchStatus::Pending)
            .cloned()
            .collect();

        if ready.is_empty() {
            if format != TournamentFormat::Swiss || bracket.is_complete() {
                break;
            }
            let round = bracket.current_round();
            let paired = bracket.pair_next_swiss_round()?;
            if paired.is_empty() && bracket.current_round() == round {
                bail!("swiss round {} could not be paired", round + 1);
            }
            debug!("paired {} matches for swiss round {}", paired.len(), round + 1);
            continue;
        }

        for match_ in &ready {
            play(&mut bracket, match_, rng)?;
        }
    }

    if !bracket.is_complete() {
        bail!("{} stalled with unplayable matches", bracket.tournament_id());
    }
    info!(
        "{} finished after {} matches",
        bracket.tournament_id(),
        bracket.matches().len()
    );
    Ok(bracket)
}

/// Plays a whole series game by game, the higher rated player being the favourite
fn play<R: Rng + ?Sized>(
    bracket: &mut Bracket,
    match_: &Match,
    rng: &mut R,
) -> anyhow::Result<()> {
    let (Some(first), Some(second)) = (&match_.participant_1, &match_.participant_2) else {
        bail!("{} is pending with an empty slot", match_.id);
    };
    let at = match_.scheduled_at.unwrap_or_else(|| bracket.start_time());

    if bracket.format().allows_draws() && rng.gen_bool(DRAW_CHANCE) {
        bracket.record_draw(&match_.id, at)?;
        return Ok(());
    }

    let rating = |user_id: &str| bracket.participant(user_id).map_or(0, |p| p.rating as i32);
    let favourite = expected_score(rating(first), rating(second))
        .to_f64()
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    loop {
        let winner = if rng.gen_bool(favourite) { first } else { second };
        if bracket.report_game(&match_.id, winner, at)?.is_some() {
            return Ok(());
        }
    }
}
