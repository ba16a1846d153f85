use chrono::{DateTime, Utc};
use cosmwasm_schema::cw_serde;

use super::Tier;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum DivisionEventKind {
    Placement,
    Promotion,
    Demotion,
}

/// History entry. Entries are appended and never edited afterwards.
#[cw_serde]
pub struct DivisionEvent {
    pub kind: DivisionEventKind,
    pub from: Option<Tier>,
    pub to: Tier,
    pub mmr: i32,
    pub season: u32,
    pub at: DateTime<Utc>,
}
