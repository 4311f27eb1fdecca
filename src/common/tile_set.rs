//! Unordered multi-sets of tiles, represented as histograms over the 34 kinds.
//!
//! [`TileSet34`] counts copies per kind (red fives fold into normal fives);
//! [`TileMask34`] is its 1-bit-per-kind reduction, used for waiting sets and
//! furiten sets.

use std::ops::{Index, IndexMut};

use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Constructor, From, Into,
};

use super::tile::{Tile, NUM_KINDS};

/// Histogram over the 34 tile kinds. Indexed by kind (`u8`/`usize`) or by [`Tile`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Constructor, From, Into)]
pub struct TileSet34(pub [u8; NUM_KINDS]);

impl Default for TileSet34 {
    fn default() -> Self { TileSet34([0u8; NUM_KINDS]) }
}

impl Index<usize> for TileSet34 {
    type Output = u8;
    fn index(&self, kind: usize) -> &u8 { &self.0[kind] }
}

impl IndexMut<usize> for TileSet34 {
    fn index_mut(&mut self, kind: usize) -> &mut u8 { &mut self.0[kind] }
}

impl Index<Tile> for TileSet34 {
    type Output = u8;
    fn index(&self, tile: Tile) -> &u8 { &self.0[tile.kind() as usize] }
}

impl IndexMut<Tile> for TileSet34 {
    fn index_mut(&mut self, tile: Tile) -> &mut u8 { &mut self.0[tile.kind() as usize] }
}

impl FromIterator<Tile> for TileSet34 {
    fn from_iter<T: IntoIterator<Item = Tile>>(tiles: T) -> Self {
        let mut ts = Self::default();
        for tile in tiles {
            ts[tile] += 1;
        }
        ts
    }
}

impl TileSet34 {
    pub fn total(&self) -> u8 { self.0.iter().sum() }

    /// Number of kinds with at least `n` copies.
    pub fn kinds_with_at_least(&self, n: u8) -> u8 {
        self.0.iter().filter(|&&c| c >= n).count() as u8
    }

    /// Number of distinct terminal/honor kinds present.
    pub fn yaochu_kinds(&self) -> u8 {
        super::tile::YAOCHU_KINDS
            .iter()
            .filter(|&&k| self.0[k as usize] > 0)
            .count() as u8
    }
}

/// 1-bit-per-kind version of [`TileSet34`], i.e. a non-multi set.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq,
    Constructor, From, Into,
    BitAnd, BitOr, BitXor,
    BitAndAssign, BitOrAssign, BitXorAssign,
)]
pub struct TileMask34(pub u64);

impl TileMask34 {
    pub fn has(self, kind: u8) -> bool { (self.0 >> kind) & 1 == 1 }
    pub fn set(&mut self, kind: u8) { self.0 |= 1 << kind; }
    pub fn clear(&mut self, kind: u8) { self.0 &= !(1 << kind); }
    pub fn any(self) -> bool { self.0 != 0 }
    pub fn is_empty(self) -> bool { self.0 == 0 }

    pub fn kinds(self) -> impl Iterator<Item = u8> {
        (0..NUM_KINDS as u8).filter(move |&k| self.has(k))
    }
}

impl FromIterator<u8> for TileMask34 {
    fn from_iter<T: IntoIterator<Item = u8>>(kinds: T) -> Self {
        let mut mask = Self::default();
        for kind in kinds {
            mask.set(kind);
        }
        mask
    }
}

impl From<&TileSet34> for TileMask34 {
    fn from(ts: &TileSet34) -> Self {
        let mut mask = Self::default();
        for (kind, &count) in ts.0.iter().enumerate() {
            if count > 0 {
                mask.set(kind as u8);
            }
        }
        mask
    }
}
