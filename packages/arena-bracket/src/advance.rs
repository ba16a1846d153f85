use arena_interface::competition::{
    matches::{BracketSide, Match, MatchLink, MatchResult, MatchStatus, Slot},
    state::TournamentFormat,
};
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::{match_id, Bracket, BracketError};

impl Bracket {
    /// Records `winner_id` as the winner of `match_id` and moves both players along their links.
    ///
    /// Returns the decided match followed by every match it touched. Nothing is modified when an
    /// error is returned.
    pub fn advance_winner(
        &mut self,
        match_id: &str,
        winner_id: &str,
    ) -> Result<Vec<Match>, BracketError> {
        self.advance_winner_at(match_id, winner_id, Utc::now())
    }

    pub fn advance_winner_at(
        &mut self,
        match_id: &str,
        winner_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Vec<Match>, BracketError> {
        let idx = self.playable(match_id)?;
        let current = &self.matches[idx];

        let winner_slot =
            current
                .slot_of(winner_id)
                .ok_or_else(|| BracketError::ParticipantNotInMatch {
                    match_id: match_id.to_string(),
                    user_id: winner_id.to_string(),
                })?;
        let loser_id = current
            .slot(winner_slot.other())
            .cloned()
            .ok_or_else(|| BracketError::InvalidAdvancement {
                match_id: match_id.to_string(),
                status: current.status,
            })?;

        let winner_target = self.open_target(current.next_match_winner.as_ref())?;
        let loser_target = self.open_target(current.next_match_loser.as_ref())?;
        let reset = self.format == TournamentFormat::DoubleElimination
            && self.settings.grand_finals_reset
            && current.bracket == Some(BracketSide::GrandFinals)
            && current.round == 1
            && winner_slot == Slot::Second;

        let decided = &mut self.matches[idx];
        decided.transition(MatchStatus::Finished)?;
        decided.result = Some(MatchResult::Winner {
            user_id: winner_id.to_string(),
        });
        decided.completed_at = Some(at);

        let mut touched = vec![idx];
        if let Some((target, slot)) = winner_target {
            self.matches[target].fill(slot, winner_id)?;
            touched.push(target);
        }
        if let Some((target, slot)) = loser_target {
            self.matches[target].fill(slot, loser_id.clone())?;
            touched.push(target);
        }
        if reset {
            touched.push(self.open_reset(&loser_id, winner_id)?);
        }

        let eliminated = self.format.is_elimination() && loser_target.is_none() && !reset;
        if let Some(winner) = self.participant_mut(winner_id) {
            winner.wins += 1;
        }
        if let Some(loser) = self.participant_mut(&loser_id) {
            loser.losses += 1;
            loser.eliminated |= eliminated;
        }

        debug!(
            "{} won {} against {}{}",
            winner_id,
            match_id,
            loser_id,
            if eliminated { ", eliminated" } else { "" }
        );
        if self.is_complete() {
            info!("tournament {} is complete", self.tournament_id);
        }

        Ok(touched
            .into_iter()
            .map(|i| self.matches[i].clone())
            .collect())
    }

    /// Moves a pending match to active
    pub fn start_match(
        &mut self,
        match_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Match, BracketError> {
        let idx = self.index_of(match_id)?;
        let match_ = &mut self.matches[idx];
        match_.transition(MatchStatus::Active)?;
        match_.started_at = Some(at);
        Ok(match_.clone())
    }

    /// Counts one game of a series. Once a player reaches the wins needed for the series the
    /// match is advanced and the touched matches are returned.
    pub fn report_game(
        &mut self,
        match_id: &str,
        game_winner: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Vec<Match>>, BracketError> {
        let idx = self.playable(match_id)?;
        let match_ = &mut self.matches[idx];
        let slot =
            match_
                .slot_of(game_winner)
                .ok_or_else(|| BracketError::ParticipantNotInMatch {
                    match_id: match_id.to_string(),
                    user_id: game_winner.to_string(),
                })?;

        if match_.status == MatchStatus::Pending {
            match_.transition(MatchStatus::Active)?;
            match_.started_at = Some(at);
        }

        let wins_needed = match_.wins_needed();
        let games = match slot {
            Slot::First => &mut match_.score.participant_1,
            Slot::Second => &mut match_.score.participant_2,
        };
        *games += 1;

        if *games >= wins_needed {
            return self.advance_winner_at(match_id, game_winner, at).map(Some);
        }
        Ok(None)
    }

    /// Closes a round robin or Swiss match without a winner
    pub fn record_draw(
        &mut self,
        match_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Match, BracketError> {
        if !self.format.allows_draws() {
            return Err(BracketError::DrawNotAllowed {
                format: self.format,
            });
        }

        let idx = self.playable(match_id)?;
        let match_ = &mut self.matches[idx];
        match_.transition(MatchStatus::Finished)?;
        match_.result = Some(MatchResult::Draw);
        match_.completed_at = Some(at);

        let players: Vec<String> = [&match_.participant_1, &match_.participant_2]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let decided = match_.clone();

        for user_id in players {
            if let Some(participant) = self.participant_mut(&user_id) {
                participant.draws += 1;
            }
        }

        debug!("{} ended in a draw", match_id);
        Ok(decided)
    }

    /// Seats a participant who skipped a first-round bye
    pub(crate) fn apply_bye(
        &mut self,
        user_id: &str,
        link: &MatchLink,
    ) -> Result<(), BracketError> {
        let target = self.link_target(link)?;
        self.matches[target].fill(link.slot, user_id)?;
        Ok(())
    }

    /// A match that can be decided: both seats taken and not yet finished
    fn playable(&self, match_id: &str) -> Result<usize, BracketError> {
        let idx = self.index_of(match_id)?;
        let match_ = &self.matches[idx];
        if match_.is_finished() || !match_.is_ready() {
            return Err(BracketError::InvalidAdvancement {
                match_id: match_id.to_string(),
                status: match_.status,
            });
        }
        Ok(idx)
    }

    fn open_target(
        &self,
        link: Option<&MatchLink>,
    ) -> Result<Option<(usize, Slot)>, BracketError> {
        let Some(link) = link else {
            return Ok(None);
        };

        let target = self.link_target(link)?;
        if self.matches[target].slot(link.slot).is_some() {
            return Err(BracketError::BracketIntegrity {
                reason: format!("slot in {} is already taken", link.match_id),
            });
        }
        Ok(Some((target, link.slot)))
    }

    /// Creates the grand final replay after the losers champion takes the first one
    fn open_reset(
        &mut self,
        winners_champion: &str,
        losers_champion: &str,
    ) -> Result<usize, BracketError> {
        let side = Some(BracketSide::GrandFinals);
        let mut reset = Match::new(match_id(side, 2, 1), 2, 1, side, self.settings.best_of);
        reset.fill(Slot::First, winners_champion)?;
        reset.fill(Slot::Second, losers_champion)?;

        let idx = self.push_match(reset)?;
        self.refresh_schedule();
        info!(
            "bracket reset: {} forces a second grand final against {}",
            losers_champion, winners_champion
        );
        Ok(idx)
    }
}
