use cosmwasm_schema::cw_serde;

#[cw_serde]
pub struct Participant {
    pub user_id: String,
    pub username: String,
    /// Skill estimate used by rating seeding
    pub rating: u32,
    /// Declared rank used by manual seeding, 1 being the top seed
    pub seed: Option<u32>,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub eliminated: bool,
}

impl Participant {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, rating: u32) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            rating,
            seed: None,
            wins: 0,
            losses: 0,
            draws: 0,
            eliminated: false,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}
