use std::fmt::{Display, Formatter};

use crate::common::tile::Tile;

/// One entry in a seat's discard pool.
///
/// Claimed tiles stay in the pool, explicitly marked, so the pool remains a
/// faithful record for furiten checks and replay.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Discard {
    pub tile: Tile,
    /// Discarded straight from the draw (ツモ切り) rather than hand-selected.
    pub is_tsumogiri: bool,
    /// Called away by another seat.
    pub claimed: bool,
}

impl Discard {
    pub fn new(tile: Tile, is_tsumogiri: bool) -> Self {
        Self { tile, is_tsumogiri, claimed: false }
    }
}

impl Display for Discard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.tile, if self.is_tsumogiri { "*" } else { "" })
    }
}
