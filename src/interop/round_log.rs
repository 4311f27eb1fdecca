//! Round-log records assembled from the event stream.
//!
//! The core never writes files: a consumer subscribes a [`RoundLogger`] to
//! the round's events, takes the finished [`GameLog`], and serializes it
//! however it likes (the whole tree is serde data).

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::player::Seat;
use crate::common::tile::Tile;
use crate::common::typedefs::GamePoints;
use crate::model::event::{AbortKind, Event, EventBus};
use crate::model::score::ScoreResult;

/// One recorded move, in play order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum LoggedAction {
    Draw { seat: Seat, from_dead_wall: bool },
    Discard { seat: Seat, tile: Tile, is_tsumogiri: bool },
    Call { seat: Seat },
    Kan { seat: Seat },
    NorthDeclare { seat: Seat },
    Riichi { seat: Seat, double: bool },
    Win { seat: Seat, from: Seat },
}

/// How a logged round came out.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoggedResult {
    pub winners: Vec<(Seat, ScoreResult)>,
    pub exhaustive_tenpai: Option<Vec<Seat>>,
    pub abort: Option<AbortKind>,
    pub score_changes: Vec<GamePoints>,
}

/// One round of a game log.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundLog {
    pub round_wind: u8,
    pub honba: u8,
    /// Tile copy ids of the entire wall in deal order.
    pub wall: Vec<u8>,
    /// Initial 13-tile hands by seat, as copy ids.
    pub initial_hands: Vec<Vec<u8>>,
    pub actions: Vec<LoggedAction>,
    pub result: LoggedResult,
}

/// A whole session worth of rounds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameLog {
    pub session_id: String,
    pub rounds: Vec<RoundLog>,
    pub final_scores: Vec<GamePoints>,
}

/// Builds a [`GameLog`] from subscribed events. Clone the handle before
/// attaching; the shared interior lets the consumer read the log after
/// the bus is done with its listener.
#[derive(Clone, Default)]
pub struct RoundLogger {
    inner: Rc<RefCell<GameLog>>,
}

impl Default for GameLog {
    fn default() -> Self {
        Self { session_id: String::new(), rounds: vec![], final_scores: vec![] }
    }
}

impl RoundLogger {
    pub fn new(session_id: impl Into<String>) -> Self {
        let logger = Self { inner: Rc::new(RefCell::new(GameLog::default())) };
        logger.inner.borrow_mut().session_id = session_id.into();
        logger
    }

    /// Register the wall and initial hands for the round about to start;
    /// events carry neither, so the driver supplies them.
    pub fn begin_round(&self, wall: &[Tile], initial_hands: &[Vec<Tile>]) {
        let mut log = self.inner.borrow_mut();
        let mut round = RoundLog::default();
        round.wall = wall.iter().map(|t| t.id()).collect();
        round.initial_hands = initial_hands
            .iter()
            .map(|hand| hand.iter().map(|t| t.id()).collect())
            .collect();
        log.rounds.push(round);
    }

    /// Attach this logger to an event bus.
    pub fn subscribe(&self, events: &mut EventBus) {
        let inner = self.inner.clone();
        events.subscribe(move |event| {
            let mut log = inner.borrow_mut();
            let Some(round) = log.rounds.last_mut() else { return };
            match event {
                Event::RoundStart { round_wind, honba, .. } => {
                    round.round_wind = *round_wind;
                    round.honba = *honba;
                }
                Event::Draw { seat, from_dead_wall, .. } => {
                    round.actions.push(LoggedAction::Draw {
                        seat: *seat,
                        from_dead_wall: *from_dead_wall,
                    });
                }
                Event::Discard { seat, tile, is_tsumogiri } => {
                    round.actions.push(LoggedAction::Discard {
                        seat: *seat,
                        tile: *tile,
                        is_tsumogiri: *is_tsumogiri,
                    });
                }
                Event::Call { seat, .. } => {
                    round.actions.push(LoggedAction::Call { seat: *seat });
                }
                Event::Kan { seat, .. } => {
                    round.actions.push(LoggedAction::Kan { seat: *seat });
                }
                Event::NorthDeclare { seat } => {
                    round.actions.push(LoggedAction::NorthDeclare { seat: *seat });
                }
                Event::RiichiDeclared { seat, double } => {
                    round.actions.push(LoggedAction::Riichi { seat: *seat, double: *double });
                }
                Event::Win { seat, from, score } => {
                    round.actions.push(LoggedAction::Win { seat: *seat, from: *from });
                    round.result.winners.push((*seat, (**score).clone()));
                }
                Event::ExhaustiveDraw { tenpai_seats } => {
                    round.result.exhaustive_tenpai = Some(tenpai_seats.clone());
                }
                Event::AbortiveDraw { kind } => {
                    round.result.abort = Some(*kind);
                }
                Event::RoundEnd { score_changes } => {
                    round.result.score_changes = score_changes.clone();
                }
                Event::GameEnd { final_scores } => {
                    log.final_scores = final_scores.clone();
                }
                Event::IppatsuCancelled { .. } => {}
            }
        });
    }

    /// A snapshot of the log built so far.
    pub fn snapshot(&self) -> GameLog {
        self.inner.borrow().clone()
    }
}
