use std::{env, fs};

use anyhow::Context;
use arena_divisions::DivisionConfig;
use arena_interface::competition::schedule::ScheduleConfig;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

pub const CONFIG_VAR: &str = "ARENA_CONFIG";
pub const SEED_VAR: &str = "ARENA_SEED";

/// Contents of the file named by `ARENA_CONFIG`. Missing sections use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    pub schedule: ScheduleConfig,
    pub divisions: DivisionConfig,
}

pub fn parse(json: &str) -> anyhow::Result<ArenaConfig> {
    serde_json::from_str(json).context("malformed arena config")
}

pub fn load() -> anyhow::Result<ArenaConfig> {
    let Ok(path) = env::var(CONFIG_VAR) else {
        return Ok(ArenaConfig::default());
    };

    let json = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let config = parse(&json).with_context(|| format!("loading {}", path))?;
    log::info!("loaded config from {}", path);
    Ok(config)
}

/// Seeded from `ARENA_SEED` when set, so runs can be replayed
pub fn rng() -> anyhow::Result<StdRng> {
    match env::var(SEED_VAR) {
        Ok(seed) => {
            let seed: u64 = seed
                .trim()
                .parse()
                .with_context(|| format!("{} must be an unsigned integer", SEED_VAR))?;
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_entropy()),
    }
}
