use thiserror::Error;

use crate::common::player::Seat;
use crate::model::action::{Action, AvailableActions};

/// Fatal engine errors. There are no transient or retried errors in the
/// core; benign terminations (exhaustive and abortive draws) are ordinary
/// events, not errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A bug-class violation of an internal invariant, surfaced with
    /// enough context for a test harness.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The decision callback returned an action that was not on the menu.
    /// A "win" that scores no yaku surfaces here too, originating from the
    /// claimed win decision.
    #[error("illegal action {action:?} from seat {seat}; legal: {available:?}")]
    IllegalAction {
        seat: Seat,
        action: Action,
        available: Box<AvailableActions>,
    },
}

impl EngineError {
    pub(crate) fn illegal(seat: Seat, action: Action, available: AvailableActions) -> Self {
        Self::IllegalAction { seat, action, available: Box::new(available) }
    }
}
