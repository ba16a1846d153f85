use std::env;

use anyhow::{bail, Context};
use arena_bracket::parse_format;
use arena_interface::competition::state::BracketSettings;
use chrono::Utc;
use itertools::Itertools;

mod config;
mod ladder;
mod simulate;

const USAGE: &str = "usage: scripts simulate <format> <participants> | scripts ladder <games>";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    dotenv::dotenv().ok(); // Used to load the `.env` file if any
    pretty_env_logger::init();

    let config = config::load()?;
    let mut rng = config::rng()?;

    match args.get(1).map(String::as_str) {
        Some("simulate") => {
            let (Some(format), Some(count)) = (args.get(2), args.get(3)) else {
                bail!(USAGE);
            };
            let format = parse_format(format)?;
            let count: usize = count.parse().context("participant count")?;
            let settings = BracketSettings {
                schedule: config.schedule,
                ..Default::default()
            };

            let bracket = simulate::run(format, count, settings, Utc::now(), &mut rng)?;
            for round in bracket.schedule() {
                println!(
                    "{:>3} {:<32} {} ({} min)",
                    round.index,
                    round.label,
                    round.starts_at.format("%H:%M"),
                    round.estimated_minutes
                );
            }
            for placement in bracket.placements()? {
                println!("#{} {}", placement.place, placement.user_id);
            }
        }
        Some("ladder") => {
            let games: u32 = args
                .get(2)
                .context(USAGE)?
                .parse()
                .context("game count")?;

            let status = ladder::run(
                config.divisions,
                ladder::Profile::default(),
                games,
                Utc::now(),
                &mut rng,
            )?;
            println!(
                "{}: {} at {} mmr ({}/100 in division)",
                status.user_id,
                status
                    .tier
                    .map_or_else(|| "unplaced".to_string(), |tier| tier.to_string()),
                status.current_mmr,
                status.division_mmr
            );
            println!(
                "{}",
                status
                    .history
                    .iter()
                    .map(|event| format!("{:?} -> {}", event.kind, event.to))
                    .join("\n")
            );
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
