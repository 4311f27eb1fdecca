//! Agari (和了) detection and full standard-form decomposition.
//!
//! The decomposer is pure: it enumerates *every* way to split a histogram
//! into one pair plus groups, and leaves picking the best-scoring one to
//! the scoring layer.

use crate::common::hand_group::HandGroup;
use crate::common::tile::YAOCHU_KINDS;
use crate::common::tile_set::TileSet34;

/// One way to read a histogram as head + groups. `groups` is sorted, so
/// equal decompositions compare equal regardless of discovery order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decomposition {
    /// Kind of the pair (jantou).
    pub head: u8,
    /// The `(Σh - 2) / 3` completed groups.
    pub groups: Vec<HandGroup>,
}

/// Whether the histogram is a complete hand in any form.
pub fn is_agari(h: &TileSet34) -> bool {
    is_standard_agari(h) || is_seven_pairs(h) || is_thirteen_orphans(h)
}

/// Whether the histogram splits into one pair plus groups.
pub fn is_standard_agari(h: &TileSet34) -> bool {
    !decompose_standard(h).is_empty()
}

/// Seven pairs (七対子): exactly seven kinds with exactly two copies.
/// A four-of-a-kind never counts as two pairs.
pub fn is_seven_pairs(h: &TileSet34) -> bool {
    h.total() == 14 && h.0.iter().filter(|&&c| c == 2).count() == 7
}

/// Thirteen orphans (国士無双): every yaochu kind present, one of them
/// paired, nothing else.
pub fn is_thirteen_orphans(h: &TileSet34) -> bool {
    if h.total() != 14 {
        return false;
    }
    let mut has_pair = false;
    for &k in &YAOCHU_KINDS {
        match h[k as usize] {
            0 => return false,
            2 => has_pair = true,
            _ => {}
        }
    }
    let non_yaochu: u8 = (0..34)
        .filter(|k| !YAOCHU_KINDS.contains(&(*k as u8)))
        .map(|k| h[k])
        .sum();
    has_pair && non_yaochu == 0
}

/// Every standard decomposition of `h` (`Σh mod 3 == 2`), deduplicated.
pub fn decompose_standard(h: &TileSet34) -> Vec<Decomposition> {
    let total = h.total();
    if total % 3 != 2 {
        return vec![];
    }
    let groups_needed = (total - 2) / 3;

    let mut results = vec![];
    let mut tiles = *h;
    for head in 0..34u8 {
        if tiles[head as usize] < 2 {
            continue;
        }
        tiles[head as usize] -= 2;
        let mut current = Vec::with_capacity(groups_needed as usize);
        find_all_groups(&mut tiles, 0, groups_needed, &mut current, &mut |groups| {
            let mut groups = groups.to_vec();
            groups.sort();
            let d = Decomposition { head, groups };
            if !results.contains(&d) {
                results.push(d);
            }
        });
        tiles[head as usize] += 2;
    }
    results
}

/// Position-ordered backtracking over the remaining histogram; calls
/// `found` for every exact cover by `needed` groups.
fn find_all_groups(
    tiles: &mut TileSet34,
    start: usize,
    needed: u8,
    current: &mut Vec<HandGroup>,
    found: &mut impl FnMut(&[HandGroup]),
) {
    if needed == 0 {
        if tiles.0.iter().all(|&c| c == 0) {
            found(current);
        }
        return;
    }

    let mut idx = start;
    while idx < 34 && tiles[idx] == 0 {
        idx += 1;
    }
    if idx >= 34 {
        return;
    }

    if tiles[idx] >= 3 {
        tiles[idx] -= 3;
        current.push(HandGroup::Koutsu(idx as u8));
        find_all_groups(tiles, idx, needed - 1, current, found);
        current.pop();
        tiles[idx] += 3;
    }

    if idx < 27 && idx % 9 <= 6 && tiles[idx + 1] >= 1 && tiles[idx + 2] >= 1 {
        tiles[idx] -= 1;
        tiles[idx + 1] -= 1;
        tiles[idx + 2] -= 1;
        current.push(HandGroup::Shuntsu(idx as u8));
        find_all_groups(tiles, idx, needed - 1, current, found);
        current.pop();
        tiles[idx] += 1;
        tiles[idx + 1] += 1;
        tiles[idx + 2] += 1;
    }
}

/// Kinds whose addition completes the hand. `h` must satisfy
/// `Σh mod 3 == 1`; kinds already at four copies are skipped.
pub fn waiting_kinds(h: &TileSet34) -> Vec<u8> {
    if h.total() % 3 != 1 {
        return vec![];
    }
    let mut waits = vec![];
    let mut test = *h;
    for kind in 0..34u8 {
        if test[kind as usize] >= 4 {
            continue;
        }
        test[kind as usize] += 1;
        if is_agari(&test) {
            waits.push(kind);
        }
        test[kind as usize] -= 1;
    }
    waits
}
