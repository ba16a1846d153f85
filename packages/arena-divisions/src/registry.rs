use std::collections::HashMap;

use arena_interface::ratings::{GameOutcome, SeasonSummary, Tier, UserDivisionStatus};
use log::info;

use crate::{DivisionEngine, DivisionError, MatchReport};

/// Division statuses of every registered user for the running season
#[derive(Debug, Clone, Default)]
pub struct DivisionRegistry {
    engine: DivisionEngine,
    season: u32,
    statuses: HashMap<String, UserDivisionStatus>,
}

impl DivisionRegistry {
    pub fn new(engine: DivisionEngine, season: u32) -> Self {
        Self {
            engine,
            season,
            statuses: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &DivisionEngine {
        &self.engine
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn register(&mut self, user_id: &str) -> Result<&UserDivisionStatus, DivisionError> {
        if self.statuses.contains_key(user_id) {
            return Err(DivisionError::AlreadyRegistered {
                user_id: user_id.to_string(),
            });
        }

        let status = self.engine.new_status(user_id, self.season);
        Ok(self.statuses.entry(user_id.to_string()).or_insert(status))
    }

    pub fn get(&self, user_id: &str) -> Result<&UserDivisionStatus, DivisionError> {
        self.statuses
            .get(user_id)
            .ok_or_else(|| DivisionError::StatusNotFound {
                user_id: user_id.to_string(),
            })
    }

    pub fn record_match(
        &mut self,
        user_id: &str,
        outcome: &GameOutcome,
    ) -> Result<MatchReport, DivisionError> {
        let status =
            self.statuses
                .get_mut(user_id)
                .ok_or_else(|| DivisionError::StatusNotFound {
                    user_id: user_id.to_string(),
                })?;
        self.engine.record_match(status, outcome)
    }

    /// Placed users of one tier, highest MMR first
    pub fn members(&self, tier: Tier) -> Vec<&UserDivisionStatus> {
        let mut members: Vec<&UserDivisionStatus> = self
            .statuses
            .values()
            .filter(|status| status.tier == Some(tier))
            .collect();
        members.sort_by(|a, b| {
            b.current_mmr
                .cmp(&a.current_mmr)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        members
    }

    /// Closes the running season for everyone and returns the archived summaries
    pub fn start_season(&mut self, season: u32) -> Vec<SeasonSummary> {
        let mut summaries: Vec<(String, SeasonSummary)> = self
            .statuses
            .iter_mut()
            .map(|(user_id, status)| (user_id.clone(), self.engine.start_season(status, season)))
            .collect();
        summaries.sort_by(|a, b| a.0.cmp(&b.0));

        info!(
            "season {} closed for {} users, season {} started",
            self.season,
            summaries.len(),
            season
        );
        self.season = season;
        summaries.into_iter().map(|(_, summary)| summary).collect()
    }
}
