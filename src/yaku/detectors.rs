//! The yaku predicates.
//!
//! Each checker takes the shared [`HandContext`] and yields the yaku with
//! its han value, or nothing. [`detect_all`] runs the yakuman block first
//! and short-circuits when any fires; the regular checkers only run on
//! non-yakuman hands. Dora counts are appended last — they never qualify a
//! hand by themselves.

use crate::common::hand_group::HandGroup;
use crate::common::tile::kind_is_yaochu;

use super::context::HandContext;
use super::Yaku;

type Check = Option<(Yaku, u8)>;

const YAKUMAN: u8 = 13;

/// Kinds allowed in an all-green hand: s2 s3 s4 s6 s8 + green dragon.
const GREEN_KINDS: [u8; 6] = [19, 20, 21, 23, 25, 32];

/// Run the full catalog against one context.
///
/// If any yakuman applies, the result is the yakuman list alone (multiple
/// yakuman stack). Otherwise every matching regular yaku plus the dora
/// pseudo-yaku.
pub fn detect_all(ctx: &HandContext) -> Vec<(Yaku, u8)> {
    let yakuman = detect_yakuman(ctx);
    if !yakuman.is_empty() {
        return yakuman;
    }

    let checkers: &[fn(&HandContext) -> Check] = &[
        check_riichi,
        check_ippatsu,
        check_menzen_tsumo,
        check_tanyao,
        check_pinfu,
        check_peikou,
        check_seat_wind,
        check_prevalent_wind,
        check_haku,
        check_hatsu,
        check_chun,
        check_haitei,
        check_houtei,
        check_rinshan,
        check_chankan,
        check_chanta,
        check_ittsu,
        check_sanshoku_doujun,
        check_sanshoku_doukou,
        check_toitoi,
        check_sanankou,
        check_honroutou,
        check_shousangen,
        check_chiitoitsu,
        check_flush,
    ];

    let mut results: Vec<(Yaku, u8)> = checkers.iter().filter_map(|check| check(ctx)).collect();

    if ctx.dora_count > 0 {
        results.push((Yaku::Dora, ctx.dora_count));
    }
    if ctx.ura_dora_count > 0 {
        results.push((Yaku::UraDora, ctx.ura_dora_count));
    }
    if ctx.red_dora_count > 0 {
        results.push((Yaku::AkaDora, ctx.red_dora_count));
    }
    results
}

fn detect_yakuman(ctx: &HandContext) -> Vec<(Yaku, u8)> {
    let checkers: &[fn(&HandContext) -> Check] = &[
        check_tenhou,
        check_chiihou,
        check_kokushi,
        check_suuankou,
        check_daisangen,
        check_winds_yakuman,
        check_tsuuiisou,
        check_chinroutou,
        check_ryuuiisou,
        check_chuuren,
        check_suukantsu,
    ];
    checkers.iter().filter_map(|check| check(ctx)).collect()
}

// ---- yakuman ----

fn check_tenhou(ctx: &HandContext) -> Check {
    (ctx.is_tenhou && ctx.is_tsumo).then_some((Yaku::Tenhou, YAKUMAN))
}

fn check_chiihou(ctx: &HandContext) -> Check {
    (ctx.is_chiihou && ctx.is_tsumo).then_some((Yaku::Chiihou, YAKUMAN))
}

fn check_kokushi(ctx: &HandContext) -> Check {
    ctx.is_thirteen_orphans.then_some((Yaku::Kokushi, YAKUMAN))
}

fn check_suuankou(ctx: &HandContext) -> Check {
    if ctx.is_seven_pairs || ctx.is_thirteen_orphans {
        return None;
    }
    (ctx.concealed_triplets() == 4).then_some((Yaku::Suuankou, YAKUMAN))
}

fn check_daisangen(ctx: &HandContext) -> Check {
    let h = &ctx.all_tiles.0;
    (h[31] >= 3 && h[32] >= 3 && h[33] >= 3).then_some((Yaku::Daisangen, YAKUMAN))
}

fn check_winds_yakuman(ctx: &HandContext) -> Check {
    let h = &ctx.all_tiles.0;
    let mut winds = [h[27], h[28], h[29], h[30]];
    winds.sort_unstable();
    if winds[0] >= 3 {
        Some((Yaku::Daisuushii, YAKUMAN))
    } else if winds[0] == 2 && winds[1] >= 3 {
        Some((Yaku::Shousuushii, YAKUMAN))
    } else {
        None
    }
}

fn check_tsuuiisou(ctx: &HandContext) -> Check {
    let (m, p, s, _) = ctx.suit_totals();
    (m + p + s == 0).then_some((Yaku::Tsuuiisou, YAKUMAN))
}

fn check_chinroutou(ctx: &HandContext) -> Check {
    let h = &ctx.all_tiles.0;
    let terminals = h[0] + h[8] + h[9] + h[17] + h[18] + h[26];
    (terminals == ctx.all_tiles.total()).then_some((Yaku::Chinroutou, YAKUMAN))
}

fn check_ryuuiisou(ctx: &HandContext) -> Check {
    let green: u8 = GREEN_KINDS.iter().map(|&k| ctx.all_tiles[k as usize]).sum();
    (green == ctx.all_tiles.total()).then_some((Yaku::Ryuuiisou, YAKUMAN))
}

fn check_chuuren(ctx: &HandContext) -> Check {
    if !ctx.melds.is_empty() || ctx.is_seven_pairs || ctx.is_thirteen_orphans {
        return None;
    }
    let (m, p, s, z) = ctx.suit_totals();
    if z > 0 {
        return None;
    }
    let suit = match (m > 0, p > 0, s > 0) {
        (true, false, false) => 0,
        (false, true, false) => 1,
        (false, false, true) => 2,
        _ => return None,
    };
    let h = &ctx.all_tiles.0[suit * 9..suit * 9 + 9];
    let nine_gates = h[0] >= 3 && h[8] >= 3 && h[1..8].iter().all(|&c| c >= 1);
    nine_gates.then_some((Yaku::Chuuren, YAKUMAN))
}

fn check_suukantsu(ctx: &HandContext) -> Check {
    let kans = ctx.melds.iter().filter(|m| m.is_kan()).count();
    (kans == 4).then_some((Yaku::Suukantsu, YAKUMAN))
}

// ---- regular ----

fn check_riichi(ctx: &HandContext) -> Check {
    if ctx.is_double_riichi {
        Some((Yaku::DoubleRiichi, 2))
    } else if ctx.is_riichi {
        Some((Yaku::Riichi, 1))
    } else {
        None
    }
}

fn check_ippatsu(ctx: &HandContext) -> Check {
    ((ctx.is_riichi || ctx.is_double_riichi) && ctx.is_ippatsu).then_some((Yaku::Ippatsu, 1))
}

fn check_menzen_tsumo(ctx: &HandContext) -> Check {
    (ctx.is_tsumo && ctx.is_menzen).then_some((Yaku::MenzenTsumo, 1))
}

fn check_tanyao(ctx: &HandContext) -> Check {
    let any_yaochu = (0..34u8).any(|k| kind_is_yaochu(k) && ctx.all_tiles[k as usize] > 0);
    (!any_yaochu).then_some((Yaku::Tanyao, 1))
}

fn check_pinfu(ctx: &HandContext) -> Check {
    if !ctx.is_menzen || !ctx.melds.is_empty() || ctx.groups.len() != 4 {
        return None;
    }
    let all_shuntsu = ctx.groups.iter().all(|g| g.is_shuntsu());
    (all_shuntsu && !ctx.head_is_yakuhai() && ctx.has_two_sided_wait())
        .then_some((Yaku::Pinfu, 1))
}

/// One or two duplicated-sequence pairs: iipeikou / ryanpeikou.
fn check_peikou(ctx: &HandContext) -> Check {
    if !ctx.is_menzen {
        return None;
    }
    let mut counts = [0u8; 27];
    for g in ctx.groups {
        if let HandGroup::Shuntsu(base) = *g {
            counts[base as usize] += 1;
        }
    }
    let pairs: u8 = counts.iter().map(|&c| c / 2).sum();
    match pairs {
        1 => Some((Yaku::Iipeikou, 1)),
        2 => Some((Yaku::Ryanpeikou, 3)),
        _ => None,
    }
}

fn check_seat_wind(ctx: &HandContext) -> Check {
    (ctx.all_tiles[ctx.seat_wind_kind as usize] >= 3).then_some((Yaku::SeatWind, 1))
}

fn check_prevalent_wind(ctx: &HandContext) -> Check {
    (ctx.all_tiles[ctx.round_wind_kind as usize] >= 3).then_some((Yaku::PrevalentWind, 1))
}

fn check_haku(ctx: &HandContext) -> Check {
    (ctx.all_tiles[31usize] >= 3).then_some((Yaku::Haku, 1))
}

fn check_hatsu(ctx: &HandContext) -> Check {
    (ctx.all_tiles[32usize] >= 3).then_some((Yaku::Hatsu, 1))
}

fn check_chun(ctx: &HandContext) -> Check {
    (ctx.all_tiles[33usize] >= 3).then_some((Yaku::Chun, 1))
}

fn check_haitei(ctx: &HandContext) -> Check {
    (ctx.is_haitei && ctx.is_tsumo).then_some((Yaku::Haitei, 1))
}

fn check_houtei(ctx: &HandContext) -> Check {
    (ctx.is_houtei && !ctx.is_tsumo).then_some((Yaku::Houtei, 1))
}

fn check_rinshan(ctx: &HandContext) -> Check {
    (ctx.is_rinshan && ctx.is_tsumo).then_some((Yaku::Rinshan, 1))
}

fn check_chankan(ctx: &HandContext) -> Check {
    (ctx.is_chankan && !ctx.is_tsumo).then_some((Yaku::Chankan, 1))
}

/// Mixed / pure outside hand (chanta / junchan).
fn check_chanta(ctx: &HandContext) -> Check {
    if ctx.is_seven_pairs || ctx.is_thirteen_orphans || ctx.groups.is_empty() && ctx.melds.is_empty() {
        return None;
    }
    let every_group = ctx.all_groups().all(|g| g.has_yaochu());
    let head_ok = kind_is_yaochu(ctx.head);
    let any_shuntsu = ctx.all_groups().any(|g| g.is_shuntsu());
    if !(every_group && head_ok && any_shuntsu) {
        return None;
    }
    let (_, _, _, honors) = ctx.suit_totals();
    if honors == 0 {
        Some((Yaku::Junchan, if ctx.is_menzen { 3 } else { 2 }))
    } else {
        Some((Yaku::Chanta, if ctx.is_menzen { 2 } else { 1 }))
    }
}

/// Straight 1-9 in one suit.
fn check_ittsu(ctx: &HandContext) -> Check {
    let mut bases = [false; 27];
    for g in ctx.all_groups() {
        if let HandGroup::Shuntsu(base) = g {
            bases[base as usize] = true;
        }
    }
    let straight = (0..3).any(|suit| {
        let o = suit * 9;
        bases[o] && bases[o + 3] && bases[o + 6]
    });
    straight.then_some((Yaku::Ittsu, if ctx.is_menzen { 2 } else { 1 }))
}

fn check_sanshoku_doujun(ctx: &HandContext) -> Check {
    let mut bases = [false; 27];
    for g in ctx.all_groups() {
        if let HandGroup::Shuntsu(base) = g {
            bases[base as usize] = true;
        }
    }
    let hit = (0..7).any(|n| bases[n] && bases[n + 9] && bases[n + 18]);
    hit.then_some((Yaku::SanshokuDoujun, if ctx.is_menzen { 2 } else { 1 }))
}

fn check_sanshoku_doukou(ctx: &HandContext) -> Check {
    let mut bases = [false; 27];
    for g in ctx.all_groups() {
        if let HandGroup::Koutsu(base) = g {
            if base < 27 {
                bases[base as usize] = true;
            }
        }
    }
    let hit = (0..9).any(|n| bases[n] && bases[n + 9] && bases[n + 18]);
    hit.then_some((Yaku::SanshokuDoukou, 2))
}

fn check_toitoi(ctx: &HandContext) -> Check {
    if ctx.is_seven_pairs || ctx.groups.is_empty() && ctx.melds.is_empty() {
        return None;
    }
    ctx.all_groups().all(|g| g.is_koutsu()).then_some((Yaku::Toitoi, 2))
}

fn check_sanankou(ctx: &HandContext) -> Check {
    if ctx.is_seven_pairs || ctx.is_thirteen_orphans {
        return None;
    }
    (ctx.concealed_triplets() == 3).then_some((Yaku::Sanankou, 2))
}

fn check_honroutou(ctx: &HandContext) -> Check {
    let every: bool = (0..34u8)
        .filter(|&k| ctx.all_tiles[k as usize] > 0)
        .all(kind_is_yaochu);
    every.then_some((Yaku::Honroutou, 2))
}

fn check_shousangen(ctx: &HandContext) -> Check {
    let h = &ctx.all_tiles.0;
    let mut dragons = [h[31], h[32], h[33]];
    dragons.sort_unstable();
    (dragons[0] == 2 && dragons[1] >= 3).then_some((Yaku::Shousangen, 2))
}

fn check_chiitoitsu(ctx: &HandContext) -> Check {
    ctx.is_seven_pairs.then_some((Yaku::Chiitoitsu, 2))
}

/// Half flush / full flush.
fn check_flush(ctx: &HandContext) -> Check {
    let (m, p, s, z) = ctx.suit_totals();
    let suits_used = [m, p, s].iter().filter(|&&c| c > 0).count();
    if suits_used != 1 {
        return None;
    }
    if z == 0 {
        Some((Yaku::Chinitsu, if ctx.is_menzen { 6 } else { 5 }))
    } else {
        Some((Yaku::Honitsu, if ctx.is_menzen { 3 } else { 2 }))
    }
}
