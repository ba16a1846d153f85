mod elimination;
mod round_robin;

use std::str::FromStr;

use arena_interface::competition::{
    participant::Participant,
    state::{Tournament, TournamentFormat},
};
use itertools::Itertools;
use log::{debug, info};
use rand::{thread_rng, Rng};

use crate::{seeding::seed_with_rng, Bracket, BracketError};

use self::elimination::Layout;

/// Parses a user-supplied format name
pub fn parse_format(format: &str) -> Result<TournamentFormat, BracketError> {
    TournamentFormat::from_str(format).map_err(|_| BracketError::InvalidFormat {
        format: format.to_string(),
    })
}

/// Builds the bracket for a tournament, seeding with the thread rng
pub fn generate(tournament: &Tournament) -> Result<Bracket, BracketError> {
    generate_with_rng(tournament, &mut thread_rng())
}

pub fn generate_with_rng<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
) -> Result<Bracket, BracketError> {
    let count = tournament.participants.len();
    if count < 2 {
        return Err(BracketError::InsufficientParticipants {
            required: 2,
            actual: count,
        });
    }
    if tournament
        .participants
        .iter()
        .map(|p| p.user_id.as_str())
        .unique()
        .count()
        != count
    {
        return Err(BracketError::BracketIntegrity {
            reason: "participants contain duplicates".to_string(),
        });
    }

    let settings = &tournament.settings;
    let third_place = tournament.format == TournamentFormat::SingleElimination
        && settings.play_third_place_match;
    if third_place && count < 4 {
        return Err(BracketError::InsufficientParticipants {
            required: 4,
            actual: count,
        });
    }

    let seeded = seed_with_rng(&tournament.participants, settings.seeding, rng);
    debug!(
        "seeded {} participants for {} by {}",
        count, tournament.id, settings.seeding
    );

    let mut bracket = match tournament.format {
        TournamentFormat::SingleElimination => {
            let layout = Layout::single_elimination(count, third_place);
            elimination_bracket(tournament, seeded, layout, 0)?
        }
        TournamentFormat::DoubleElimination => {
            let layout = Layout::double_elimination(count);
            let losers_rounds = layout.losers_rounds();
            elimination_bracket(tournament, seeded, layout, losers_rounds)?
        }
        TournamentFormat::RoundRobin => {
            let (rounds, matches) = round_robin::build_matches(&seeded, settings.best_of)?;
            let mut bracket = empty_bracket(tournament, seeded, rounds, 0);
            for match_ in matches {
                bracket.push_match(match_)?;
            }
            bracket
        }
        TournamentFormat::Swiss => {
            let rounds = count.next_power_of_two().trailing_zeros().max(1);
            let mut bracket = empty_bracket(tournament, seeded, rounds, 0);
            bracket.pair_swiss_round(1)?;
            bracket
        }
    };

    bracket.refresh_schedule();
    bracket.validate()?;

    info!(
        "generated {} bracket for {}: {} matches over {} rounds",
        bracket.format,
        bracket.tournament_id,
        bracket.matches.len(),
        bracket.total_rounds
    );
    Ok(bracket)
}

fn empty_bracket(
    tournament: &Tournament,
    seeded: Vec<Participant>,
    total_rounds: u32,
    losers_rounds: u32,
) -> Bracket {
    Bracket::new(
        tournament.id.clone(),
        tournament.format,
        total_rounds,
        losers_rounds,
        seeded,
        tournament.settings.clone(),
        tournament.start_time,
    )
}

fn elimination_bracket(
    tournament: &Tournament,
    seeded: Vec<Participant>,
    layout: Layout,
    losers_rounds: u32,
) -> Result<Bracket, BracketError> {
    let (matches, byes) = layout.materialize(&seeded, tournament.settings.best_of)?;
    let mut bracket = empty_bracket(tournament, seeded, layout.winners_rounds(), losers_rounds);

    for match_ in matches {
        bracket.push_match(match_)?;
    }
    for bye in byes {
        bracket.apply_bye(&bye.user_id, &bye.link)?;
    }

    Ok(bracket)
}
