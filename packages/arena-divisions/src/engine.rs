use arena_interface::ratings::{
    DemotionProgress, DemotionShield, Division, DivisionEvent, DivisionEventKind, DivisionPhase,
    GameData, GameOutcome, GameResult, PromotionProgress, SeasonStats, SeasonSummary, Tier,
    UserDivisionStatus,
};
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::{mmr, placement, DivisionConfig, DivisionError, Ladder};

/// What a single recorded match did to a user
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    /// Change the game itself made, before any tier move
    pub mmr_delta: i32,
    /// MMR after the game and any tier move
    pub mmr: i32,
    pub events: Vec<DivisionEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DivisionEngine {
    config: DivisionConfig,
    ladder: Ladder,
}

fn validate(outcome: &GameOutcome) -> Result<(), DivisionError> {
    if !outcome.accuracy.is_finite() || !(0.0..=100.0).contains(&outcome.accuracy) {
        return Err(DivisionError::InvalidGameData {
            reason: format!("accuracy {} is not a percentage", outcome.accuracy),
        });
    }
    if !outcome.avg_reaction_ms.is_finite() || outcome.avg_reaction_ms < 0.0 {
        return Err(DivisionError::InvalidGameData {
            reason: format!("reaction time {} ms is invalid", outcome.avg_reaction_ms),
        });
    }
    Ok(())
}

impl DivisionEngine {
    pub fn new(config: DivisionConfig) -> Self {
        Self {
            config,
            ladder: Ladder::default(),
        }
    }

    pub fn with_ladder(config: DivisionConfig, ladder: Ladder) -> Self {
        Self { config, ladder }
    }

    pub fn config(&self) -> &DivisionConfig {
        &self.config
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    /// A fresh status at the start of placement
    pub fn new_status(&self, user_id: impl Into<String>, season: u32) -> UserDivisionStatus {
        UserDivisionStatus::new(user_id, self.config.starting_mmr, season)
    }

    /// Applies one match to the user's status.
    ///
    /// MMR moves on every game. During placement nothing else changes until the last placement
    /// game, which assigns the first tier. Ranked games then update promotion and demotion
    /// progress and may move the user one tier in either direction.
    pub fn record_match(
        &self,
        status: &mut UserDivisionStatus,
        outcome: &GameOutcome,
    ) -> Result<MatchReport, DivisionError> {
        validate(outcome)?;

        let game = GameData {
            accuracy: outcome.accuracy,
            avg_reaction_ms: outcome.avg_reaction_ms,
            current_streak: status.season.current_streak,
        };
        let change = mmr::mmr_change(
            &self.config,
            status.current_mmr,
            outcome.opponent_mmr,
            outcome.result,
            &game,
        );
        let before = status.current_mmr;
        status.current_mmr = (status.current_mmr + change).max(0);
        let applied = status.current_mmr - before;
        status
            .season
            .record(outcome.result, outcome.accuracy, outcome.avg_reaction_ms);

        let mut events = vec![];
        match status.phase {
            DivisionPhase::Placement { games_played } => {
                let games_played = games_played + 1;
                if games_played >= self.config.placement_games {
                    events.push(self.place(status, outcome.played_at));
                } else {
                    status.phase = DivisionPhase::Placement { games_played };
                }
            }
            DivisionPhase::Ranked => {
                events.extend(self.update_ranked(status, outcome.result, outcome.played_at));
            }
        }

        debug!(
            "{}: {:?} against {} moved mmr {} by {}",
            status.user_id, outcome.result, outcome.opponent_mmr, before, applied
        );

        Ok(MatchReport {
            mmr_delta: applied,
            mmr: status.current_mmr,
            events,
        })
    }

    /// Archives the running season and starts counting a new one. Tier and MMR carry over.
    pub fn start_season(&self, status: &mut UserDivisionStatus, season: u32) -> SeasonSummary {
        let summary = status.summarize_season();
        status.past_seasons.push(summary.clone());

        status.season = SeasonStats::new(season);
        if let Some(tier) = status.tier {
            status.season.note_tier(tier);
        }
        status.promotion = PromotionProgress::default();
        status.demotion = DemotionProgress::default();
        status.shield = DemotionShield::default();
        self.refresh_zones(status);

        summary
    }

    fn place(&self, status: &mut UserDivisionStatus, at: DateTime<Utc>) -> DivisionEvent {
        let skill = placement::skill_rating(&status.season);
        let tier = placement::tier_for_skill(skill);

        status.phase = DivisionPhase::Ranked;
        status.current_mmr = self.ladder.division(tier).midpoint();
        self.enter_tier(status, tier);

        info!(
            "{} placed in {} with skill rating {}",
            status.user_id,
            tier,
            skill.round_dp(2)
        );
        self.event(status, DivisionEventKind::Placement, None, at)
    }

    fn update_ranked(
        &self,
        status: &mut UserDivisionStatus,
        result: GameResult,
        at: DateTime<Utc>,
    ) -> Option<DivisionEvent> {
        let Some(tier) = status.tier else {
            return Some(self.place(status, at));
        };

        match result {
            GameResult::Win => {
                status.promotion.wins += 1;
                status.promotion.win_streak += 1;
                status.demotion.loss_streak = 0;
            }
            GameResult::Loss => {
                status.demotion.losses += 1;
                status.demotion.loss_streak += 1;
                status.promotion.win_streak = 0;
            }
            GameResult::Draw => {
                status.promotion.win_streak = 0;
                status.demotion.loss_streak = 0;
            }
        }
        self.refresh_zones(status);

        // The shield protects the game it is consumed on
        let shielded = status.shield.active;
        status.shield.consume();

        let division = self.ladder.division(tier);
        if !shielded && self.should_demote(status, division) {
            if let Some(lower) = tier.previous() {
                return Some(self.demote(status, tier, lower, at));
            }
        }
        if self.should_promote(status, division) {
            if let Some(higher) = tier.next() {
                return Some(self.promote(status, tier, higher, at));
            }
        }

        None
    }

    fn should_promote(&self, status: &UserDivisionStatus, division: &Division) -> bool {
        let Some(requirement) = &division.promotion else {
            return false;
        };

        status.promotion.wins >= requirement.wins_required
            && requirement
                .win_streak
                .map_or(true, |streak| status.promotion.win_streak >= streak)
            && requirement
                .min_accuracy
                .map_or(true, |accuracy| status.season.avg_accuracy >= accuracy)
            && status.division_mmr >= self.config.promotion_threshold
    }

    fn should_demote(&self, status: &UserDivisionStatus, division: &Division) -> bool {
        let Some(threshold) = &division.demotion else {
            return false;
        };

        let losses_met = status.demotion.losses >= threshold.max_losses
            || threshold
                .loss_streak
                .map_or(false, |streak| status.demotion.loss_streak >= streak);

        status.current_mmr < division.min_mmr
            || (status.division_mmr <= self.config.demotion_risk_threshold && losses_met)
    }

    fn promote(
        &self,
        status: &mut UserDivisionStatus,
        from: Tier,
        to: Tier,
        at: DateTime<Utc>,
    ) -> DivisionEvent {
        status.current_mmr = self.ladder.division(to).min_mmr;
        self.enter_tier(status, to);
        status.shield = DemotionShield::activate(self.config.shield_games);

        info!("{} promoted from {} to {}", status.user_id, from, to);
        self.event(status, DivisionEventKind::Promotion, Some(from), at)
    }

    fn demote(
        &self,
        status: &mut UserDivisionStatus,
        from: Tier,
        to: Tier,
        at: DateTime<Utc>,
    ) -> DivisionEvent {
        status.current_mmr = self.ladder.division(to).ceiling();
        self.enter_tier(status, to);
        status.shield = DemotionShield::default();

        info!("{} demoted from {} to {}", status.user_id, from, to);
        self.event(status, DivisionEventKind::Demotion, Some(from), at)
    }

    /// Resets per-division progress on arrival in `tier`
    fn enter_tier(&self, status: &mut UserDivisionStatus, tier: Tier) {
        status.tier = Some(tier);
        status.promotion = PromotionProgress::default();
        status.demotion = DemotionProgress::default();
        status.season.note_tier(tier);
        self.refresh_zones(status);
    }

    fn refresh_zones(&self, status: &mut UserDivisionStatus) {
        let Some(tier) = status.tier else {
            return;
        };

        status.division_mmr = self.ladder.division_mmr(tier, status.current_mmr);
        status.promotion.in_promotion =
            tier.next().is_some() && status.division_mmr >= self.config.promotion_threshold;
        status.demotion.at_risk = tier.previous().is_some()
            && (status.current_mmr < self.ladder.division(tier).min_mmr
                || status.division_mmr <= self.config.demotion_risk_threshold);
    }

    fn event(
        &self,
        status: &mut UserDivisionStatus,
        kind: DivisionEventKind,
        from: Option<Tier>,
        at: DateTime<Utc>,
    ) -> DivisionEvent {
        let event = DivisionEvent {
            kind,
            from,
            to: status.tier.unwrap_or(Tier::Bronze),
            mmr: status.current_mmr,
            season: status.season.season,
            at,
        };
        status.record_event(event.clone());
        event
    }
}
