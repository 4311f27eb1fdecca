//! The wall of tiles: live draw pile plus the 14-tile dead wall.
//!
//! ```ascii_art
//!  live wall (draw order -->)          dead wall (fixed slots)
//! +----+----+----+-- ... --+----+     +----+----+----+----+----+----+----+
//! | 0  | 1  | 2  |         |last|     | D0 | U0 | D1 | U1 | D2 | U2 | .. |
//! +----+----+----+-- ... --+----+     +----+----+----+----+----+----+----+
//!                                       0    1    2    3    4    5   ...
//!                                      slots 10..=13: replacement tiles,
//!                                      drawn in reverse order (13 first)
//! ```
//!
//! Even dead-wall slots `0,2,4,6,8` hold the dora indicators, odd slots
//! `1,3,5,7,9` the ura-dora indicators. One dora indicator starts revealed;
//! each kan (or north declare replacement) may reveal another, up to five.
//!
//! Four-player: 136 tiles. Three-player: 108 tiles (2m..8m removed).
//!
//! ## Ref
//! - <https://riichi.wiki/Yama>

use rand::seq::SliceRandom;
use rand::Rng;

use super::tile::{indicated_dora_kind, Tile, NUM_COPIES};

/// Number of tiles set aside as the dead wall.
pub const DEAD_WALL_SIZE: usize = 14;

/// Maximum number of replacement (rinshan) tiles.
pub const MAX_REPLACEMENTS: u8 = 4;

/// Maximum number of revealed dora indicators.
pub const MAX_DORA_INDICATORS: u8 = 5;

/// The wall for one round. Owns the full shuffled tile order; `live` draws
/// advance a cursor so the original order stays available for replay logs.
#[derive(Clone, Debug)]
pub struct Wall {
    live: Vec<Tile>,
    dead: [Tile; DEAD_WALL_SIZE],
    next: usize,
    dora_revealed: u8,
    replacements_drawn: u8,
    three_player: bool,
}

/// All tile copies of the configured universe, in id order.
pub fn full_tile_set(three_player: bool) -> Vec<Tile> {
    (0..NUM_COPIES as u8)
        .filter_map(Tile::from_id)
        .filter(|t| !three_player || !(1..=7).contains(&t.kind()))
        .collect()
}

impl Wall {
    /// Build a shuffled wall from an explicit randomness source.
    pub fn shuffled(three_player: bool, rng: &mut impl Rng) -> Self {
        let mut tiles = full_tile_set(three_player);
        tiles.shuffle(rng);
        Self::from_tiles(tiles, three_player)
    }

    /// Build a wall from a predetermined tile order (replay and tests).
    /// The last [`DEAD_WALL_SIZE`] tiles become the dead wall.
    pub fn from_tiles(mut tiles: Vec<Tile>, three_player: bool) -> Self {
        assert!(tiles.len() > DEAD_WALL_SIZE, "wall too small: {}", tiles.len());
        let dead_tiles = tiles.split_off(tiles.len() - DEAD_WALL_SIZE);
        let mut dead = [Tile::default(); DEAD_WALL_SIZE];
        dead.copy_from_slice(&dead_tiles);
        Self {
            live: tiles,
            dead,
            next: 0,
            dora_revealed: 1,
            replacements_drawn: 0,
            three_player,
        }
    }

    pub fn is_three_player(&self) -> bool { self.three_player }

    /// Number of drawable tiles remaining in the live wall.
    pub fn remaining(&self) -> usize { self.live.len() - self.next }

    pub fn is_empty(&self) -> bool { self.remaining() == 0 }

    /// Draw the next tile from the live wall.
    pub fn draw(&mut self) -> Option<Tile> {
        let tile = self.live.get(self.next).copied()?;
        self.next += 1;
        Some(tile)
    }

    /// Draw a replacement tile from the dead wall (after a kan or a north
    /// declare). Slot 13 is used first, then 12, 11, 10.
    pub fn draw_replacement(&mut self) -> Option<Tile> {
        if self.replacements_drawn >= MAX_REPLACEMENTS {
            return None;
        }
        let tile = self.dead[DEAD_WALL_SIZE - 1 - self.replacements_drawn as usize];
        self.replacements_drawn += 1;
        Some(tile)
    }

    /// Reveal a new dora indicator (after a kan). Saturates at five.
    pub fn reveal_dora(&mut self) {
        if self.dora_revealed < MAX_DORA_INDICATORS {
            self.dora_revealed += 1;
        }
    }

    pub fn num_dora_indicators(&self) -> u8 { self.dora_revealed }

    /// Currently revealed dora indicator tiles.
    pub fn dora_indicators(&self) -> Vec<Tile> {
        (0..self.dora_revealed as usize).map(|i| self.dead[i * 2]).collect()
    }

    /// Ura-dora indicator tiles, as many as there are revealed dora.
    pub fn ura_dora_indicators(&self) -> Vec<Tile> {
        (0..self.dora_revealed as usize).map(|i| self.dead[i * 2 + 1]).collect()
    }

    /// Kinds indicated as dora by the revealed indicators.
    pub fn dora_kinds(&self) -> Vec<u8> {
        self.dora_indicators()
            .iter()
            .map(|t| indicated_dora_kind(t.kind(), self.three_player))
            .collect()
    }

    /// Kinds indicated as ura-dora (counted only for riichi winners).
    pub fn ura_dora_kinds(&self) -> Vec<u8> {
        self.ura_dora_indicators()
            .iter()
            .map(|t| indicated_dora_kind(t.kind(), self.three_player))
            .collect()
    }

    /// The full tile order of this round in deal order (live then dead),
    /// for replay logging.
    pub fn tiles_in_deal_order(&self) -> Vec<Tile> {
        self.live.iter().chain(self.dead.iter()).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tile_set::TileSet34;
    use assert2::check;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn four_player_wall_is_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        let wall = Wall::shuffled(false, &mut rng);
        check!(wall.remaining() == 136 - DEAD_WALL_SIZE);
        let hist = TileSet34::from_iter(wall.tiles_in_deal_order());
        check!(hist.0.iter().all(|&n| n == 4));
    }

    #[test]
    fn three_player_wall_omits_middle_characters() {
        let mut rng = StdRng::seed_from_u64(7);
        let wall = Wall::shuffled(true, &mut rng);
        let tiles = wall.tiles_in_deal_order();
        check!(tiles.len() == 108);
        check!(wall.remaining() == 108 - DEAD_WALL_SIZE);
        let hist = TileSet34::from_iter(tiles);
        for kind in 1..=7usize {
            check!(hist[kind] == 0);
        }
        check!(hist[0usize] == 4);
        check!(hist[8usize] == 4);
    }

    #[test]
    fn replacements_come_from_the_tail_in_reverse() {
        let tiles = full_tile_set(false);
        let expected_first = tiles[tiles.len() - 1];
        let expected_second = tiles[tiles.len() - 2];
        let mut wall = Wall::from_tiles(tiles, false);
        check!(wall.draw_replacement() == Some(expected_first));
        check!(wall.draw_replacement() == Some(expected_second));
        check!(wall.draw_replacement().is_some());
        check!(wall.draw_replacement().is_some());
        check!(wall.draw_replacement() == None);
    }

    #[test]
    fn dora_indicators_live_in_even_slots() {
        let tiles = full_tile_set(false);
        let dead_start = tiles.len() - DEAD_WALL_SIZE;
        let d0 = tiles[dead_start];
        let u0 = tiles[dead_start + 1];
        let d1 = tiles[dead_start + 2];
        let mut wall = Wall::from_tiles(tiles, false);
        check!(wall.dora_indicators() == vec![d0]);
        check!(wall.ura_dora_indicators() == vec![u0]);
        wall.reveal_dora();
        check!(wall.dora_indicators() == vec![d0, d1]);
        for _ in 0..10 {
            wall.reveal_dora();
        }
        check!(wall.num_dora_indicators() == MAX_DORA_INDICATORS);
    }

    #[test]
    fn draws_do_not_disturb_deal_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut wall = Wall::shuffled(false, &mut rng);
        let order = wall.tiles_in_deal_order();
        let first = wall.draw().unwrap();
        check!(first == order[0]);
        check!(wall.tiles_in_deal_order() == order);
    }
}
