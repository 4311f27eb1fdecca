//! Shanten (向聴数) — tiles away from tenpai.
//!
//! `-1` means the hand is complete; `0` means tenpai. The result is the
//! minimum over the standard form, seven pairs, and thirteen orphans.

use crate::common::tile::YAOCHU_KINDS;
use crate::common::tile_set::TileSet34;

const WORST: i8 = 8;

/// Minimum shanten across all hand forms.
///
/// `h` holds the closed tiles only; the number of called melds is implied
/// by the total (`Σh ∈ {14, 11, 8, 5, 2}` right after a draw).
pub fn shanten(h: &TileSet34) -> i8 {
    shanten_standard(h)
        .min(shanten_seven_pairs(h))
        .min(shanten_thirteen_orphans(h))
}

/// Shanten for the standard form (4 groups + 1 head, minus called melds).
pub fn shanten_standard(h: &TileSet34) -> i8 {
    let total = h.total();
    if !(2..=14).contains(&total) {
        return WORST;
    }
    // With M melds already called the closed tiles hold 14 - 3M, so the
    // closed part still owes 4 - M groups plus the head.
    let groups_needed = 4 - (14 - total) / 3;

    let mut best = WORST;
    let mut tiles = *h;

    // Try each kind as the head, then search the rest.
    for head in 0..34usize {
        if tiles[head] >= 2 {
            tiles[head] -= 2;
            let (mentsu, partial) = best_mentsu_partial(&mut tiles, groups_needed);
            best = best.min((groups_needed as i8 - mentsu) * 2 - 1 - partial);
            tiles[head] += 2;
        }
    }

    // A pass with no explicit head.
    let (mentsu, partial) = best_mentsu_partial(&mut tiles, groups_needed);
    best = best.min((groups_needed as i8 - mentsu) * 2 - partial);

    best.max(-1)
}

/// Backtracking search maximizing `2·mentsu + partial`.
fn best_mentsu_partial(tiles: &mut TileSet34, max_groups: u8) -> (i8, i8) {
    let mut best = (0i8, 0i8);
    backtrack(tiles, 0, 0, 0, max_groups, &mut best);
    best
}

fn backtrack(
    tiles: &mut TileSet34,
    idx: usize,
    mentsu: i8,
    partial: i8,
    max_groups: u8,
    best: &mut (i8, i8),
) {
    if idx >= 34 {
        if mentsu * 2 + partial > best.0 * 2 + best.1 {
            *best = (mentsu, partial);
        }
        return;
    }
    if tiles[idx] == 0 {
        backtrack(tiles, idx + 1, mentsu, partial, max_groups, best);
        return;
    }

    let can_add_mentsu = mentsu < max_groups as i8;
    // A partial group candidate may not raise mentsu + partial above the
    // needed group count.
    let can_add_partial = mentsu + partial < max_groups as i8;

    // Triplet
    if tiles[idx] >= 3 && can_add_mentsu {
        tiles[idx] -= 3;
        backtrack(tiles, idx, mentsu + 1, partial, max_groups, best);
        tiles[idx] += 3;
    }

    // Sequence
    if idx < 27 && idx % 9 <= 6 && can_add_mentsu
        && tiles[idx + 1] >= 1 && tiles[idx + 2] >= 1
    {
        tiles[idx] -= 1;
        tiles[idx + 1] -= 1;
        tiles[idx + 2] -= 1;
        backtrack(tiles, idx, mentsu + 1, partial, max_groups, best);
        tiles[idx] += 1;
        tiles[idx + 1] += 1;
        tiles[idx + 2] += 1;
    }

    // Pair taatsu
    if tiles[idx] >= 2 && can_add_partial {
        tiles[idx] -= 2;
        backtrack(tiles, idx, mentsu, partial + 1, max_groups, best);
        tiles[idx] += 2;
    }

    // Adjacent taatsu (e.g. 45m)
    if idx < 27 && idx % 9 <= 7 && can_add_partial && tiles[idx + 1] >= 1 {
        tiles[idx] -= 1;
        tiles[idx + 1] -= 1;
        backtrack(tiles, idx, mentsu, partial + 1, max_groups, best);
        tiles[idx] += 1;
        tiles[idx + 1] += 1;
    }

    // Gap taatsu (e.g. 46m)
    if idx < 27 && idx % 9 <= 6 && can_add_partial && tiles[idx + 2] >= 1 {
        tiles[idx] -= 1;
        tiles[idx + 2] -= 1;
        backtrack(tiles, idx, mentsu, partial + 1, max_groups, best);
        tiles[idx] += 1;
        tiles[idx + 2] += 1;
    }

    // Skip this kind entirely.
    backtrack(tiles, idx + 1, mentsu, partial, max_groups, best);
}

/// Shanten for seven pairs (七対子): `6 - pairs + max(0, 7 - kinds)`.
/// Only meaningful for a closed 13/14-tile hand.
pub fn shanten_seven_pairs(h: &TileSet34) -> i8 {
    let total = h.total();
    if !(total == 13 || total == 14) {
        return WORST;
    }
    let pairs = h.kinds_with_at_least(2) as i8;
    let kinds = h.kinds_with_at_least(1) as i8;
    6 - pairs + (7 - kinds).max(0)
}

/// Shanten for thirteen orphans (国士無双): `13 - yaochu kinds - pair bonus`.
/// Only meaningful for a closed 13/14-tile hand.
pub fn shanten_thirteen_orphans(h: &TileSet34) -> i8 {
    let total = h.total();
    if !(total == 13 || total == 14) {
        return WORST;
    }
    let kinds = h.yaochu_kinds() as i8;
    let has_pair = YAOCHU_KINDS.iter().any(|&k| h[k as usize] >= 2);
    13 - kinds - has_pair as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tile::tiles_from_str;
    use assert2::check;

    fn hist(s: &str) -> TileSet34 {
        TileSet34::from_iter(tiles_from_str(s))
    }

    #[test]
    fn complete_hand_is_minus_one() {
        check!(shanten(&hist("123m456p789s11122z")) == -1);
        check!(shanten(&hist("11223344556677m")) == -1);
        check!(shanten(&hist("19m19p19s12345677z")) == -1);
    }

    #[test]
    fn tenpai_is_zero() {
        // waiting on 3m/6m
        check!(shanten(&hist("45m456p789s111222z")) == 0);
        // tanki wait
        check!(shanten(&hist("123m456p789s111z2z")) == 0);
    }

    #[test]
    fn standard_counts_called_melds_implicitly() {
        // 2 melds called: 8 closed tiles forming 2 groups + pair = complete
        check!(shanten(&hist("123m456p11z")) == -1);
        // 3 melds called: one group done, 19p must pair up
        check!(shanten(&hist("123m19p")) == 0);
        check!(shanten(&hist("124m19p")) == 1);
        // 4 melds called, tanki pair
        check!(shanten(&hist("11z")) == -1);
        check!(shanten(&hist("19z")) == 0);
    }

    #[test]
    fn seven_pairs_formula() {
        check!(shanten_seven_pairs(&hist("1122334455667m")) == 0);
        check!(shanten_seven_pairs(&hist("112233445566m12z")) == 1);
        // four of a kind: the extra copies don't make extra pairs
        check!(shanten_seven_pairs(&hist("1111223344556m")) > 0);
    }

    #[test]
    fn thirteen_orphans_formula() {
        check!(shanten_thirteen_orphans(&hist("19m19p19s1234567z")) == 0);
        check!(shanten_thirteen_orphans(&hist("19m19p19s123456z2m")) == 1);
        check!(shanten_thirteen_orphans(&hist("119m19p19s123456z")) == 0);
    }

    #[test]
    fn ordinary_opening_hand() {
        // scattered tiles, several shanten away
        check!(shanten(&hist("139m258p47s12356z")) >= 3);
    }
}
