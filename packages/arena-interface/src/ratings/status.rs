use cosmwasm_schema::cw_serde;

use super::{DivisionEvent, GameResult, Tier};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum DivisionPhase {
    /// Unranked until the placement games are done
    Placement { games_played: u32 },
    Ranked,
}

#[cw_serde]
#[derive(Default, Copy, Eq)]
pub struct PromotionProgress {
    /// Wins since entering the current division
    pub wins: u32,
    pub win_streak: u32,
    /// Set while the in-division MMR sits in the promotion zone
    pub in_promotion: bool,
}

#[cw_serde]
#[derive(Default, Copy, Eq)]
pub struct DemotionProgress {
    /// Losses since entering the current division
    pub losses: u32,
    pub loss_streak: u32,
    pub at_risk: bool,
}

#[cw_serde]
#[derive(Default, Copy, Eq)]
pub struct DemotionShield {
    pub active: bool,
    pub games_remaining: u32,
}

impl DemotionShield {
    pub fn activate(games: u32) -> Self {
        Self {
            active: games > 0,
            games_remaining: games,
        }
    }

    /// Burns one game of protection
    pub fn consume(&mut self) {
        if !self.active {
            return;
        }
        self.games_remaining = self.games_remaining.saturating_sub(1);
        if self.games_remaining == 0 {
            self.active = false;
        }
    }
}

#[cw_serde]
#[derive(Default)]
pub struct SeasonStats {
    pub season: u32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Percentage of games won
    pub win_rate: f64,
    /// Positive while winning, negative while losing
    pub current_streak: i32,
    pub best_win_streak: u32,
    pub avg_accuracy: f64,
    pub avg_reaction_ms: f64,
    pub highest_tier: Option<Tier>,
}

impl SeasonStats {
    pub fn new(season: u32) -> Self {
        Self {
            season,
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: GameResult, accuracy: f64, avg_reaction_ms: f64) {
        self.games_played += 1;
        let n = f64::from(self.games_played);
        self.avg_accuracy += (accuracy - self.avg_accuracy) / n;
        self.avg_reaction_ms += (avg_reaction_ms - self.avg_reaction_ms) / n;

        match result {
            GameResult::Win => {
                self.wins += 1;
                self.current_streak = self.current_streak.max(0) + 1;
                self.best_win_streak = self.best_win_streak.max(self.current_streak as u32);
            }
            GameResult::Loss => {
                self.losses += 1;
                self.current_streak = self.current_streak.min(0) - 1;
            }
            GameResult::Draw => {
                self.draws += 1;
                self.current_streak = 0;
            }
        }

        self.win_rate = f64::from(self.wins) * 100.0 / n;
    }

    pub fn note_tier(&mut self, tier: Tier) {
        if self.highest_tier.map_or(true, |highest| tier > highest) {
            self.highest_tier = Some(tier);
        }
    }
}

#[cw_serde]
pub struct SeasonSummary {
    pub season: u32,
    pub final_tier: Option<Tier>,
    pub final_mmr: i32,
    pub highest_tier: Option<Tier>,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

#[cw_serde]
pub struct UserDivisionStatus {
    pub user_id: String,
    pub phase: DivisionPhase,
    /// None while placement games are still being played
    pub tier: Option<Tier>,
    pub current_mmr: i32,
    /// Position inside the tier's band, 0 to 100
    pub division_mmr: u32,
    pub promotion: PromotionProgress,
    pub demotion: DemotionProgress,
    pub shield: DemotionShield,
    pub season: SeasonStats,
    pub history: Vec<DivisionEvent>,
    pub past_seasons: Vec<SeasonSummary>,
}

impl UserDivisionStatus {
    pub fn new(user_id: impl Into<String>, starting_mmr: i32, season: u32) -> Self {
        Self {
            user_id: user_id.into(),
            phase: DivisionPhase::Placement { games_played: 0 },
            tier: None,
            current_mmr: starting_mmr,
            division_mmr: 0,
            promotion: PromotionProgress::default(),
            demotion: DemotionProgress::default(),
            shield: DemotionShield::default(),
            season: SeasonStats::new(season),
            history: vec![],
            past_seasons: vec![],
        }
    }

    pub fn is_placed(&self) -> bool {
        self.phase == DivisionPhase::Ranked
    }

    /// History only grows; nothing rewrites past entries
    pub fn record_event(&mut self, event: DivisionEvent) {
        self.history.push(event);
    }

    pub fn summarize_season(&self) -> SeasonSummary {
        SeasonSummary {
            season: self.season.season,
            final_tier: self.tier,
            final_mmr: self.current_mmr,
            highest_tier: self.season.highest_tier,
            games_played: self.season.games_played,
            wins: self.season.wins,
            losses: self.season.losses,
            win_rate: self.season.win_rate,
        }
    }
}
