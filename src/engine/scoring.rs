//! Score calculation: from a winning hand to points.
//!
//! The decomposer stays pure and yields every reading of the hand; this
//! layer builds a [`HandContext`] per reading (plus the two special
//! shapes), runs the yaku catalog, and keeps the highest-paying candidate.

use crate::analysis::decomp::{decompose_standard, is_seven_pairs, is_thirteen_orphans};
use crate::common::player::{wind_kind, Wind};
use crate::common::tile::Tile;
use crate::common::tile_set::TileSet34;
use crate::common::typedefs::GamePoints;
use crate::model::hand::Hand;
use crate::model::score::ScoreResult;
use crate::rules::Ruleset;
use crate::yaku::{detect_all, has_real_yaku, total_han, HandContext};

use super::fu::{calculate_fu, FuInput};

/// Circumstantial flags of the win, gathered by the round controller.
#[derive(Copy, Clone, Debug, Default)]
pub struct WinFlags {
    pub is_tsumo: bool,
    pub is_riichi: bool,
    pub is_double_riichi: bool,
    pub is_ippatsu: bool,
    /// Winning tile was the last tile of the live wall (self-draw).
    pub is_haitei: bool,
    /// Winning tile was the last discard of the round.
    pub is_houtei: bool,
    /// Win on the replacement draw after a kan.
    pub is_rinshan: bool,
    /// Ron robbing an added kan.
    pub is_chankan: bool,
    /// Dealer win on the very first uninterrupted draw.
    pub is_tenhou: bool,
    /// Non-dealer win on the seat's first uninterrupted draw.
    pub is_chiihou: bool,
}

/// Everything scoring needs to know about the table.
#[derive(Clone, Debug)]
pub struct ScoreInput<'a> {
    pub seat_wind: Wind,
    pub round_wind: Wind,
    pub is_dealer: bool,
    pub dora_kinds: &'a [u8],
    pub ura_dora_kinds: &'a [u8],
    pub honba: u8,
    pub flags: WinFlags,
}

/// Score a complete hand (`hand.closed` already contains the winning
/// tile). Returns None when no reading of the hand carries a real yaku.
pub fn calculate_score(
    rules: &Ruleset,
    hand: &Hand,
    win_tile: Tile,
    input: &ScoreInput,
) -> Option<ScoreResult> {
    let all_tiles_list = hand.all_tiles();
    let all_tiles = TileSet34::from_iter(all_tiles_list.iter().copied());

    let dora_count: u8 = input
        .dora_kinds
        .iter()
        .map(|&d| all_tiles[d as usize])
        .sum();
    let ura_dora_count: u8 = if input.flags.is_riichi || input.flags.is_double_riichi {
        input
            .ura_dora_kinds
            .iter()
            .map(|&d| all_tiles[d as usize])
            .sum()
    } else {
        0
    };
    let red_dora_count: u8 = if rules.red_fives > 0 {
        all_tiles_list.iter().filter(|t| t.is_red()).count() as u8
    } else {
        0
    };

    let closed = hand.counts();
    const NO_GROUPS: &[crate::common::hand_group::HandGroup] = &[];
    let template = HandContext {
        head: 0,
        groups: NO_GROUPS,
        melds: &hand.melds,
        all_tiles: &all_tiles,
        win_kind: win_tile.kind(),
        is_tsumo: input.flags.is_tsumo,
        is_menzen: hand.is_menzen(),
        is_riichi: input.flags.is_riichi,
        is_double_riichi: input.flags.is_double_riichi,
        is_ippatsu: input.flags.is_ippatsu,
        seat_wind_kind: wind_kind(input.seat_wind),
        round_wind_kind: wind_kind(input.round_wind),
        is_haitei: input.flags.is_haitei,
        is_houtei: input.flags.is_houtei,
        is_rinshan: input.flags.is_rinshan,
        is_chankan: input.flags.is_chankan,
        is_tenhou: input.flags.is_tenhou,
        is_chiihou: input.flags.is_chiihou,
        is_seven_pairs: false,
        is_thirteen_orphans: false,
        dora_count,
        ura_dora_count,
        red_dora_count,
    };

    let mut best: Option<ScoreResult> = None;
    let mut consider = |result: Option<ScoreResult>| {
        if let Some(result) = result {
            let better = best
                .as_ref()
                .map_or(true, |b| result.total_points > b.total_points);
            if better {
                best = Some(result);
            }
        }
    };

    let decompositions = decompose_standard(&closed);
    for decomposition in &decompositions {
        let ctx = HandContext {
            head: decomposition.head,
            groups: &decomposition.groups,
            ..template.clone()
        };
        consider(evaluate(rules, &ctx, input));
    }

    if hand.melds.is_empty() && is_seven_pairs(&closed) {
        let ctx = HandContext { is_seven_pairs: true, ..template.clone() };
        consider(evaluate(rules, &ctx, input));
    }

    if hand.melds.is_empty() && is_thirteen_orphans(&closed) {
        let ctx = HandContext { is_thirteen_orphans: true, ..template.clone() };
        consider(evaluate(rules, &ctx, input));
    }

    best
}

fn evaluate(rules: &Ruleset, ctx: &HandContext, input: &ScoreInput) -> Option<ScoreResult> {
    let yaku = detect_all(ctx);
    if !has_real_yaku(&yaku) {
        return None;
    }
    let han = total_han(&yaku);

    let fu = if ctx.is_thirteen_orphans {
        30
    } else {
        calculate_fu(
            ctx.head,
            ctx.groups,
            ctx.melds,
            &FuInput {
                win_kind: ctx.win_kind,
                is_tsumo: ctx.is_tsumo,
                is_menzen: ctx.is_menzen,
                seat_wind_kind: ctx.seat_wind_kind,
                round_wind_kind: ctx.round_wind_kind,
                is_pinfu: yaku.iter().any(|&(y, _)| y == crate::yaku::Yaku::Pinfu),
                is_seven_pairs: ctx.is_seven_pairs,
            },
        )
    };

    let base_points = base_points(han, fu);
    Some(build_result(rules, yaku, han, fu, base_points, input))
}

/// Base points from (han, fu): the tier ladder, with the sub-mangan
/// formula capped at 2000 (which realizes the 4-han/40-fu and
/// 3-han/70-fu mangan thresholds).
pub fn base_points(han: u8, fu: u8) -> GamePoints {
    match han {
        h if h >= 13 => 8000,
        11 | 12 => 6000,
        8..=10 => 4000,
        6 | 7 => 3000,
        5 => 2000,
        _ => (fu as GamePoints * (1 << (2 + han as u32))).min(2000),
    }
}

fn round_up_100(points: GamePoints) -> GamePoints {
    (points + 99) / 100 * 100
}

fn build_result(
    rules: &Ruleset,
    yaku: Vec<(crate::yaku::Yaku, u8)>,
    han: u8,
    fu: u8,
    base: GamePoints,
    input: &ScoreInput,
) -> ScoreResult {
    let honba = input.honba as GamePoints;
    let mut result = ScoreResult {
        yaku,
        han,
        fu,
        base_points: base,
        total_points: 0,
        dealer_payment: 0,
        non_dealer_payment: 0,
        ron_payment: 0,
        is_dealer: input.is_dealer,
        is_tsumo: input.flags.is_tsumo,
        honba: input.honba,
    };

    if input.flags.is_tsumo {
        if input.is_dealer {
            let each = round_up_100(base * 2) + 100 * honba;
            let payers = if rules.three_player() { 2 } else { 3 };
            result.non_dealer_payment = each;
            result.total_points = each * payers;
        } else {
            let dealer = round_up_100(base * 2) + 100 * honba;
            let each = round_up_100(base) + 100 * honba;
            result.dealer_payment = dealer;
            result.non_dealer_payment = each;
            result.total_points = if rules.three_player() {
                dealer + each
            } else {
                dealer + each * 2
            };
        }
    } else {
        let multiplier = if input.is_dealer { 6 } else { 4 };
        let honba_bonus = if rules.three_player() { 200 } else { 300 };
        let payment = round_up_100(base * multiplier) + honba_bonus * honba;
        result.ron_payment = payment;
        result.total_points = payment;
    }
    result
}
