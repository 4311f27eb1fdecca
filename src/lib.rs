//! Rules and play-flow core of a Japanese Riichi Mahjong engine.
//!
//! The crate decides, for a given hand state, what actions are legal,
//! whether a hand is complete, how far from completion it is (shanten),
//! which yaku it realizes and how many points it scores, and drives a
//! full round through draws, discards, calls, wins, and draws-to-
//! exhaustion. Rendering, input handling, AI policies and log files are
//! external consumers of [`engine::run_round`]/[`engine::run_game`] and
//! the [`model::event`] stream.

pub mod analysis;
pub mod common;
pub mod engine;
pub mod interop;
pub mod model;
pub mod rules;
pub mod yaku;

pub mod prelude {
    //! Convenient re-exports of commonly imported items.
    pub use super::{
        common::*,
        engine::{run_game, run_round, EngineError, GameState, RoundResult, RoundState},
        model::*,
        rules::Ruleset,
        yaku::Yaku,
    };
}
