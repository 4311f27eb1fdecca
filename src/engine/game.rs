//! Cross-round game management: hanchan (East-South) or East-only.
//!
//! Only the tabletop survives between rounds — scores, honba, and the
//! riichi-stick pool — passed explicitly into each round.

use log::info;
use rand::Rng;

use crate::common::player::{Seat, Wind};
use crate::common::typedefs::GamePoints;
use crate::common::wall::Wall;
use crate::model::event::{Event, EventBus};
use crate::rules::Ruleset;

use super::errors::EngineError;
use super::round::{run_round, DecideFn, RoundResult, RoundState};

/// A full game in progress.
pub struct GameState {
    pub rules: Ruleset,
    pub scores: Vec<GamePoints>,
    pub round_wind: Wind,
    /// 0-based round number within the current wind (East 1 = 0).
    pub round_number: u8,
    pub honba: u8,
    pub riichi_sticks: u8,
    pub round_results: Vec<RoundResult>,
    finished: bool,
}

impl GameState {
    pub fn new(rules: Ruleset) -> Self {
        let n = rules.num_players as usize;
        let scores = vec![rules.starting_score; n];
        Self {
            rules,
            scores,
            round_wind: 0,
            round_number: 0,
            honba: 0,
            riichi_sticks: 0,
            round_results: vec![],
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn dealer_seat(&self) -> Seat {
        self.round_number % self.rules.num_players
    }

    /// Build the next round from the tabletop state, with a freshly
    /// shuffled wall from the caller's randomness source.
    pub fn setup_round(&self, rng: &mut impl Rng) -> RoundState {
        let wall = Wall::shuffled(self.rules.three_player(), rng);
        RoundState::new(
            self.rules.clone(),
            &self.scores,
            wall,
            self.dealer_seat(),
            self.round_wind,
            self.honba,
            self.riichi_sticks,
        )
    }

    /// Fold a finished round back into the tabletop.
    pub fn advance(&mut self, state: &RoundState, result: RoundResult) {
        for (seat, player) in state.players.iter().enumerate() {
            self.scores[seat] = player.score;
        }
        self.riichi_sticks = result.riichi_sticks_remaining;

        // Busting ends the game on the spot.
        if self.scores.iter().any(|&s| s < 0) {
            self.finished = true;
        } else if result.dealer_retains {
            self.honba += 1;
        } else {
            self.honba = if result.draw.is_some() { self.honba + 1 } else { 0 };
            self.advance_dealer();
        }
        self.round_results.push(result);

        if self.round_wind > self.last_wind() {
            self.finished = true;
        }
    }

    fn advance_dealer(&mut self) {
        self.round_number += 1;
        if self.round_number >= self.rules.num_players {
            self.round_number = 0;
            self.round_wind += 1;
        }
    }

    /// The wind of the all-last round: East for east-only, South for a
    /// full hanchan.
    fn last_wind(&self) -> Wind {
        if self.rules.east_only { 0 } else { 1 }
    }

    fn top_score(&self) -> GamePoints {
        self.scores.iter().copied().max().unwrap_or(0)
    }
}

/// Run a complete game against the decision callback.
pub fn run_game(
    rules: Ruleset,
    rng: &mut impl Rng,
    events: &mut EventBus,
    decide: &mut DecideFn<'_>,
) -> Result<GameState, EngineError> {
    let mut game = GameState::new(rules);

    while !game.finished {
        let mut state = game.setup_round(rng);
        info!(
            "starting round: wind {} number {} honba {}",
            game.round_wind, game.round_number, game.honba
        );
        let result = run_round(&mut state, events, decide)?;
        let was_all_last = game.round_wind == game.last_wind()
            && game.round_number == game.rules.num_players - 1;
        game.advance(&state, result);

        // At all-last, the game ends once the leader clears the target
        // score, dealer repeats included.
        if was_all_last && game.top_score() >= game.rules.target_score {
            game.finished = true;
        }
    }

    events.emit(Event::GameEnd { final_scores: game.scores.clone() });
    Ok(game)
}
