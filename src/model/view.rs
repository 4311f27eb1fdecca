//! Per-seat read-only projection of a running round.
//!
//! Each seat sees its own hand in full; every other seat is reduced to its
//! public fields. Deriving a view never fails and never mutates the round.

use crate::common::meld::Meld;
use crate::common::player::{Seat, Wind};
use crate::common::tile::Tile;
use crate::common::typedefs::GamePoints;

use super::discard::Discard;
use super::hand::Hand;

/// What one seat may know about another.
#[derive(Clone, Debug)]
pub struct OpponentView {
    pub seat: Seat,
    pub score: GamePoints,
    pub melds: Vec<Meld>,
    pub discards: Vec<Discard>,
    pub is_riichi: bool,
    pub closed_tile_count: u8,
}

/// Everything one seat may know about the round.
#[derive(Clone, Debug)]
pub struct GameView {
    pub seat: Seat,
    pub hand: Hand,
    pub score: GamePoints,
    pub seat_wind: Wind,
    pub round_wind: Wind,
    pub honba: u8,
    pub riichi_sticks: u8,
    pub dora_indicators: Vec<Tile>,
    pub wall_remaining: usize,
    pub opponents: Vec<OpponentView>,
}
