//! Append-only event stream emitted while a round runs.
//!
//! A single observer list carries events to subscribers in causal order;
//! the core retains nothing.

use crate::common::meld::Meld;
use crate::common::player::{Seat, Wind};
use crate::common::tile::Tile;
use crate::common::typedefs::GamePoints;

use super::score::ScoreResult;

/// Why a round ended without a winner.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AbortKind {
    FourWinds,
    FourRiichi,
    FourKans,
    NineTerminals,
    TripleRon,
}

/// One record in the round's event stream.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    RoundStart {
        round_wind: Wind,
        honba: u8,
        dora_indicators: Vec<Tile>,
    },
    Draw {
        seat: Seat,
        tile: Tile,
        from_dead_wall: bool,
    },
    Discard {
        seat: Seat,
        tile: Tile,
        is_tsumogiri: bool,
    },
    Call {
        seat: Seat,
        meld: Meld,
    },
    Kan {
        seat: Seat,
        meld: Meld,
        new_dora_indicator: Tile,
    },
    NorthDeclare {
        seat: Seat,
    },
    RiichiDeclared {
        seat: Seat,
        double: bool,
    },
    IppatsuCancelled {
        seat: Seat,
    },
    Win {
        seat: Seat,
        from: Seat,
        score: Box<ScoreResult>,
    },
    ExhaustiveDraw {
        tenpai_seats: Vec<Seat>,
    },
    AbortiveDraw {
        kind: AbortKind,
    },
    RoundEnd {
        score_changes: Vec<GamePoints>,
    },
    GameEnd {
        final_scores: Vec<GamePoints>,
    },
}

/// Single-writer observer list. Subscribers see every event of a round in
/// emission order; there is no fan-out buffering or replay.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn FnMut(&Event)>>,
}

impl EventBus {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: Event) {
        log::debug!("event: {:?}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn events_reach_subscribers_in_order() {
        let seen = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        let mut bus = EventBus::new();
        bus.subscribe(move |event| {
            if let Event::Draw { seat, .. } = event {
                sink.borrow_mut().push(*seat);
            }
        });
        for seat in [0u8, 1, 2] {
            bus.emit(Event::Draw { seat, tile: "1m".parse().unwrap(), from_dead_wall: false });
        }
        bus.emit(Event::AbortiveDraw { kind: AbortKind::FourWinds });
        check!(*seen.borrow() == vec![0, 1, 2]);
    }
}
