//! Fu (符) calculation.
//!
//! ## Ref
//! - <https://riichi.wiki/Fu>

use crate::common::hand_group::HandGroup;
use crate::common::meld::Meld;
use crate::common::tile::kind_is_yaochu;

/// Inputs beyond the decomposition itself.
#[derive(Copy, Clone, Debug)]
pub struct FuInput {
    pub win_kind: u8,
    pub is_tsumo: bool,
    pub is_menzen: bool,
    pub seat_wind_kind: u8,
    pub round_wind_kind: u8,
    pub is_pinfu: bool,
    pub is_seven_pairs: bool,
}

/// Compute fu for a hand read as `head` + `groups` (closed decomposition)
/// + `melds`, rounded up to the next 10.
pub fn calculate_fu(head: u8, groups: &[HandGroup], melds: &[Meld], input: &FuInput) -> u8 {
    // Seven pairs: flat 25, no adjustments of any kind.
    if input.is_seven_pairs {
        return 25;
    }

    let mut fu = 20u8;

    // Closed groups. A triplet completed by the winning tile on a ron is
    // counted open — unless the winning tile also fits a sequence of this
    // decomposition, in which case the triplet was complete all along.
    let win_in_shuntsu = groups
        .iter()
        .any(|g| g.is_shuntsu() && g.contains(input.win_kind));
    let mut ron_koutsu_seen = false;
    for group in groups {
        if let HandGroup::Koutsu(kind) = *group {
            let yaochu = kind_is_yaochu(kind);
            let completed_by_ron = !input.is_tsumo
                && !ron_koutsu_seen
                && kind == input.win_kind
                && !win_in_shuntsu;
            fu += if completed_by_ron {
                ron_koutsu_seen = true;
                if yaochu { 4 } else { 2 }
            } else {
                if yaochu { 8 } else { 4 }
            };
        }
    }

    // Melds.
    for meld in melds {
        let yaochu = kind_is_yaochu(meld.base_kind());
        fu += match meld {
            Meld::Ankan { .. } => if yaochu { 32 } else { 16 },
            Meld::Daiminkan { .. } | Meld::Kakan { .. } => if yaochu { 16 } else { 8 },
            Meld::Pon { .. } => if yaochu { 4 } else { 2 },
            Meld::Chii { .. } => 0,
        };
    }

    // Head bonuses stack: a double-wind pair is worth 4.
    if head == input.seat_wind_kind {
        fu += 2;
    }
    if head == input.round_wind_kind {
        fu += 2;
    }
    if head >= 31 {
        fu += 2;
    }

    fu += wait_fu(head, groups, input.win_kind);

    if input.is_tsumo {
        if !input.is_pinfu {
            fu += 2;
        }
    } else if input.is_menzen {
        fu += 10;
    }

    // Pinfu fixes the total outright.
    if input.is_pinfu && input.is_tsumo {
        return 20;
    }
    if input.is_pinfu && !input.is_tsumo && input.is_menzen {
        return 30;
    }

    // An open hand that would come out at the bare 20 is bumped to 30.
    if fu == 20 && !input.is_menzen {
        fu = 30;
    }

    round_up_10(fu)
}

/// Wait-shape bonus: closed (kanchan), edge (penchan), and pair (tanki)
/// waits are worth 2; two-sided and dual-pair waits nothing. Not stacked.
fn wait_fu(head: u8, groups: &[HandGroup], win_kind: u8) -> u8 {
    if win_kind == head {
        return 2;
    }
    for group in groups {
        let HandGroup::Shuntsu(base) = *group else { continue };
        if !group.contains(win_kind) {
            continue;
        }
        // middle of the run
        if win_kind == base + 1 {
            return 2;
        }
        // 1-2-3 waiting on the 3, or 7-8-9 waiting on the 7
        if base % 9 == 0 && win_kind == base + 2 {
            return 2;
        }
        if base % 9 == 6 && win_kind == base {
            return 2;
        }
    }
    0
}

fn round_up_10(fu: u8) -> u8 {
    (fu + 9) / 10 * 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tile::tiles_from_str;
    use assert2::check;

    fn input() -> FuInput {
        FuInput {
            win_kind: 0,
            is_tsumo: false,
            is_menzen: true,
            seat_wind_kind: 27,
            round_wind_kind: 27,
            is_pinfu: false,
            is_seven_pairs: false,
        }
    }

    #[test]
    fn pinfu_fixed_points() {
        let groups = [
            HandGroup::Shuntsu(0),
            HandGroup::Shuntsu(3),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
        ];
        let tsumo = FuInput { is_tsumo: true, is_pinfu: true, ..input() };
        check!(calculate_fu(5, &groups, &[], &tsumo) == 20);
        let ron = FuInput { is_pinfu: true, ..input() };
        check!(calculate_fu(5, &groups, &[], &ron) == 30);
    }

    #[test]
    fn seven_pairs_is_always_25() {
        let i = FuInput { is_seven_pairs: true, is_tsumo: true, ..input() };
        check!(calculate_fu(0, &[], &[], &i) == 25);
    }

    #[test]
    fn closed_terminal_triplet_is_8() {
        // 111m (closed) + three sequences, ron completing a sequence
        let groups = [
            HandGroup::Koutsu(0),
            HandGroup::Shuntsu(3),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
        ];
        let i = FuInput { win_kind: 3, ..input() };
        // 20 base + 8 triplet + 10 menzen ron = 38 -> 40
        check!(calculate_fu(5, &groups, &[], &i) == 40);
    }

    #[test]
    fn ron_completed_triplet_counts_open() {
        let groups = [
            HandGroup::Koutsu(0),
            HandGroup::Shuntsu(3),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
        ];
        // ron on 1m completing the triplet: 4 instead of 8
        let i = FuInput { win_kind: 0, ..input() };
        // 20 + 4 + 10 = 34 -> 40 (shanpon side, no wait fu)
        check!(calculate_fu(5, &groups, &[], &i) == 40);
        // the same hand by tsumo keeps the closed 8
        let i = FuInput { win_kind: 0, is_tsumo: true, ..input() };
        // 20 + 8 + 2 = 30
        check!(calculate_fu(5, &groups, &[], &i) == 30);
    }

    #[test]
    fn head_bonuses_stack_for_double_wind() {
        let groups = [
            HandGroup::Shuntsu(3),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
            HandGroup::Koutsu(1),
        ];
        // East head, seat and prevailing both East; tsumo, kanchan wait
        let i = FuInput {
            win_kind: 10,
            is_tsumo: true,
            seat_wind_kind: 27,
            round_wind_kind: 27,
            ..input()
        };
        // 20 + 4 (simple closed triplet) + 4 (double wind head) + 2 (kanchan)
        // + 2 (tsumo) = 32 -> 40
        check!(calculate_fu(27, &groups, &[], &i) == 40);
    }

    #[test]
    fn edge_and_pair_waits_score_two() {
        let groups2 = [
            HandGroup::Shuntsu(0),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
            HandGroup::Koutsu(4),
        ];
        // 20 + 4 (555m closed) + 2 (edge) + 10 (menzen ron) = 36 -> 40
        let i = FuInput { win_kind: 2, ..input() };
        check!(calculate_fu(6, &groups2, &[], &i) == 40);
        // pair wait on the head
        let i = FuInput { win_kind: 6, is_tsumo: true, ..input() };
        // 20 + 4 + 2 (tanki) + 2 (tsumo) = 28 -> 30
        check!(calculate_fu(6, &groups2, &[], &i) == 30);
    }

    #[test]
    fn open_hand_floor_is_30() {
        let run = tiles_from_str("567p");
        let melds = [Meld::Chii {
            tiles: [run[0], run[1], run[2]],
            called: run[0],
            from: 3,
        }];
        let groups = [
            HandGroup::Shuntsu(0),
            HandGroup::Shuntsu(3),
            HandGroup::Shuntsu(18),
        ];
        // all sequences, open, ryanmen ron: raw 20 -> bumped to 30
        let i = FuInput { win_kind: 0, is_menzen: false, ..input() };
        check!(calculate_fu(5, &groups, &melds, &i) == 30);
    }

    #[test]
    fn kan_fu_values() {
        let quad = tiles_from_str("1111z");
        let melds = [Meld::Ankan { tiles: [quad[0], quad[1], quad[2], quad[3]] }];
        let groups = [
            HandGroup::Shuntsu(0),
            HandGroup::Shuntsu(9),
            HandGroup::Shuntsu(18),
        ];
        // 20 + 32 (yaochu ankan) + 10 (menzen ron) = 62 -> 70
        let i = FuInput { win_kind: 0, ..input() };
        check!(calculate_fu(5, &groups, &melds, &i) == 70);

        let quad = tiles_from_str("5555p");
        let melds = [Meld::Daiminkan {
            tiles: [quad[0], quad[1], quad[2], quad[3]],
            called: quad[0],
            from: 1,
        }];
        // 20 + 8 (simple open kan) = 28 -> 30 (open ron, ryanmen)
        let i = FuInput { win_kind: 0, is_menzen: false, ..input() };
        check!(calculate_fu(5, &groups, &melds, &i) == 30);
    }
}
