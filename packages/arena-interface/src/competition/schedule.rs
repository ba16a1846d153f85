use chrono::{DateTime, Duration, Utc};
use cosmwasm_schema::cw_serde;

#[cw_serde]
pub struct ScheduleConfig {
    pub match_duration_minutes: u32,
    /// Spacing between round starts, as a percentage of one match duration
    pub round_gap_percent: u32,
    /// Offset between consecutive matches inside a round
    pub match_stagger_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            match_duration_minutes: 30,
            round_gap_percent: 150,
            match_stagger_minutes: 5,
        }
    }
}

impl ScheduleConfig {
    pub fn match_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.match_duration_minutes))
    }

    pub fn stagger(&self) -> Duration {
        Duration::minutes(i64::from(self.match_stagger_minutes))
    }

    /// Offset of the round at `index` (0-based) from the tournament start
    pub fn round_offset(&self, index: u32) -> Duration {
        let minutes = u64::from(index)
            * u64::from(self.match_duration_minutes)
            * u64::from(self.round_gap_percent)
            / 100;
        Duration::minutes(minutes as i64)
    }
}

#[cw_serde]
pub struct ScheduledMatch {
    pub match_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[cw_serde]
pub struct ScheduleRound {
    /// 1-based order in which rounds are expected to be played
    pub index: u32,
    pub label: String,
    pub starts_at: DateTime<Utc>,
    pub estimated_minutes: u32,
    pub matches: Vec<ScheduledMatch>,
}
