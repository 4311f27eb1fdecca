//! Core game logic: fu, scoring, furiten, action enumeration, and the
//! round/game state machines.

pub mod actions;
pub mod errors;
pub mod fu;
pub mod furiten;
pub mod game;
pub mod round;
pub mod scoring;

pub use actions::{draw_actions, response_actions, RIICHI_STAKE};
pub use errors::EngineError;
pub use fu::{calculate_fu, FuInput};
pub use game::{run_game, GameState};
pub use round::{run_round, DecideFn, DrawOutcome, PlayerState, RoundResult, RoundState};
pub use scoring::{base_points, calculate_score, ScoreInput, WinFlags};
