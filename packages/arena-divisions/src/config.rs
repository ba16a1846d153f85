use cosmwasm_schema::cw_serde;

/// Tunables of the division engine. Missing fields fall back to the defaults.
#[cw_serde]
#[serde(default)]
pub struct DivisionConfig {
    pub k_factor: u32,
    /// Largest MMR swing a single match can cause, either way
    pub max_mmr_change: i32,
    pub placement_games: u32,
    /// Games of demotion protection granted by a promotion
    pub shield_games: u32,
    /// In-division MMR needed to promote
    pub promotion_threshold: u32,
    /// In-division MMR at or below which losses can demote
    pub demotion_risk_threshold: u32,
    /// MMR a new user starts placement with
    pub starting_mmr: i32,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            k_factor: 32,
            max_mmr_change: 50,
            placement_games: 10,
            shield_games: 5,
            promotion_threshold: 80,
            demotion_risk_threshold: 20,
            starting_mmr: 1000,
        }
    }
}
