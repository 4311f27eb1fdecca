//! Per-seat hand state for one round.

use crate::common::meld::Meld;
use crate::common::tile::Tile;
use crate::common::tile_set::TileSet34;

use super::discard::Discard;

/// A seat's hand: closed tiles, ordered melds, ordered discard pool, the
/// drawn tile (distinguished from the rest while present), and the riichi
/// flags.
///
/// `closed` includes the drawn tile whenever `drawn` is set. Invariant
/// between actions: `|closed| + 3·|melds|` (kans counting their extra tile
/// separately) totals 13 or 14 tiles.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    pub closed: Vec<Tile>,
    pub melds: Vec<Meld>,
    pub discards: Vec<Discard>,
    pub drawn: Option<Tile>,
    pub is_riichi: bool,
    pub is_double_riichi: bool,
    pub is_ippatsu: bool,
    /// Index into `discards` of the riichi-declaring discard.
    pub riichi_discard_index: Option<usize>,
}

impl Hand {
    /// Take a drawn tile into the hand.
    pub fn draw(&mut self, tile: Tile) {
        self.closed.push(tile);
        self.drawn = Some(tile);
    }

    /// Move `tile` from the closed tiles into the discard pool.
    /// Returns false if the tile is not held.
    pub fn discard(&mut self, tile: Tile, is_tsumogiri: bool) -> bool {
        let Some(pos) = self.closed.iter().position(|&t| t == tile) else {
            return false;
        };
        self.closed.remove(pos);
        self.discards.push(Discard::new(tile, is_tsumogiri));
        self.drawn = None;
        self.sort_closed();
        true
    }

    /// Remove `count` copies of `kind` from the closed tiles. Returns the
    /// removed tiles, or None if not enough copies are held.
    pub fn take_kind(&mut self, kind: u8, count: usize) -> Option<Vec<Tile>> {
        let held: Vec<usize> = self
            .closed
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind() == kind)
            .map(|(i, _)| i)
            .collect();
        if held.len() < count {
            return None;
        }
        let mut taken = vec![];
        for &i in held[..count].iter().rev() {
            taken.push(self.closed.remove(i));
        }
        taken.reverse();
        Some(taken)
    }

    pub fn add_meld(&mut self, meld: Meld) {
        self.melds.push(meld);
        self.drawn = None;
    }

    pub fn sort_closed(&mut self) {
        self.closed.sort();
    }

    /// Histogram of the closed tiles (including the drawn tile).
    pub fn counts(&self) -> TileSet34 {
        TileSet34::from_iter(self.closed.iter().copied())
    }

    /// Histogram of the closed tiles with the drawn tile removed — the
    /// 3N+1 shape the waiting set is computed on.
    pub fn counts_without_drawn(&self) -> TileSet34 {
        let mut h = self.counts();
        if let Some(drawn) = self.drawn {
            h[drawn] -= 1;
        }
        h
    }

    /// Closed + meld tiles, for dora counting.
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.closed.clone();
        for meld in &self.melds {
            tiles.extend_from_slice(meld.tiles());
        }
        tiles
    }

    /// Whether the hand is fully closed (門前); closed kans don't open it.
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| !m.is_open())
    }

    pub fn mark_last_discard_claimed(&mut self) {
        if let Some(last) = self.discards.last_mut() {
            last.claimed = true;
        }
    }
}
