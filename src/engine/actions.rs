//! Legal-move enumeration.
//!
//! Two entry points: [`draw_actions`] for the seat that just gained a tile,
//! and [`response_actions`] for every other seat after a discard. The round
//! controller validates the decision callback's choice against the returned
//! menu; anything else is a fatal error.

use itertools::Itertools;

use crate::analysis::decomp::{is_agari, waiting_kinds};
use crate::common::meld::Meld;
use crate::common::player::{seat_succ, Seat};
use crate::common::tile::Tile;
use crate::common::tile_set::TileMask34;
use crate::common::typedefs::GamePoints;
use crate::model::action::AvailableActions;
use crate::model::hand::Hand;
use crate::rules::Ruleset;

/// Minimum score required to declare riichi (the stick itself).
pub const RIICHI_STAKE: GamePoints = 1000;

/// Moves available to the active seat after drawing (or after a call, when
/// the hand also holds an extra tile).
pub fn draw_actions(
    rules: &Ruleset,
    seat: Seat,
    hand: &Hand,
    score: GamePoints,
    wall_remaining: usize,
    first_uninterrupted_turn: bool,
) -> AvailableActions {
    let mut actions = AvailableActions::new(seat);
    let counts = hand.counts();

    if is_agari(&counts) {
        actions.can_tsumo = true;
    }

    // Riichi: closed hand, a stick to spare, enough wall left for everyone
    // to draw once, and some discard that leaves a waiting shape.
    if hand.is_menzen()
        && !hand.is_riichi
        && score >= RIICHI_STAKE
        && wall_remaining >= rules.num_players as usize
    {
        actions.riichi_candidates = distinct_tiles(hand)
            .into_iter()
            .filter(|tile| {
                let mut test = counts;
                test[*tile] -= 1;
                !waiting_kinds(&test).is_empty()
            })
            .collect();
    }

    // Closed kan on any four-of-a-kind; under riichi only when the waiting
    // set is untouched.
    for kind in 0..34u8 {
        if counts[kind as usize] != 4 {
            continue;
        }
        if hand.is_riichi {
            let waits_now = waiting_kinds(&hand.counts_without_drawn());
            let mut test = counts;
            test[kind as usize] -= 4;
            if waiting_kinds(&test) != waits_now {
                continue;
            }
        }
        actions.closed_kans.push(kind);
    }

    // Added kan on a held tile matching one of our pon melds.
    if !hand.is_riichi {
        for meld in &hand.melds {
            if let Meld::Pon { tiles, .. } = meld {
                let kind = tiles[0].kind();
                if let Some(&tile) = hand.closed.iter().find(|t| t.kind() == kind) {
                    actions.added_kans.push(tile);
                }
            }
        }
    }

    // North declare (three-player only).
    if rules.three_player() && hand.closed.iter().any(|t| t.kind() == 30) {
        actions.can_north = true;
    }

    // Nine-terminals abort on an uninterrupted first turn.
    if first_uninterrupted_turn && counts.yaochu_kinds() >= 9 {
        actions.can_nine_terminals = true;
    }

    // Discards: the drawn tile only under riichi, otherwise every distinct
    // held tile.
    actions.discards = if hand.is_riichi {
        hand.drawn.into_iter().collect()
    } else {
        distinct_tiles(hand)
    };

    actions
}

/// Claims available to `seat` in response to `discard` by `discarder`.
///
/// `ron_has_yaku` is consulted lazily once the shape and furiten gates
/// pass: a structurally complete hand with no real yaku is not offered ron.
pub fn response_actions(
    rules: &Ruleset,
    seat: Seat,
    hand: &Hand,
    discard: Tile,
    discarder: Seat,
    wall_remaining: usize,
    temp_furiten: TileMask34,
    riichi_furiten: TileMask34,
    ron_has_yaku: impl FnOnce() -> bool,
) -> AvailableActions {
    let mut actions = AvailableActions::new(seat);
    let counts = hand.counts();
    let kind = discard.kind();

    // Ron first: complete with the claimed tile, no furiten of any flavor,
    // and at least one real yaku.
    let mut test = counts;
    test[kind as usize] += 1;
    if is_agari(&test) {
        let waits = TileMask34::from_iter(waiting_kinds(&counts));
        let blocked = super::furiten::ron_blocked(hand, waits, temp_furiten, riichi_furiten);
        if !blocked && ron_has_yaku() {
            actions.can_ron = true;
        }
    }

    // A riichi hand claims nothing but the win.
    if hand.is_riichi {
        return actions;
    }
    // No open calls on the very last discard.
    if wall_remaining == 0 {
        return actions;
    }

    if counts[kind as usize] >= 2 {
        actions.triplets.push(pon_meld(hand, discard, discarder));
    }
    if counts[kind as usize] >= 3 {
        actions.open_kans.push(daiminkan_meld(hand, discard, discarder));
    }

    // Sequence calls: previous seat only, never in three-player.
    if !rules.three_player() && seat == seat_succ(discarder, rules.num_players) {
        actions.sequences = chii_melds(hand, discard, discarder);
    }

    actions
}

/// Held tiles deduplicated by kind and redness, in sorted order.
fn distinct_tiles(hand: &Hand) -> Vec<Tile> {
    hand.closed
        .iter()
        .copied()
        .sorted()
        .dedup_by(|a, b| a.kind() == b.kind() && a.is_red() == b.is_red())
        .collect()
}

fn pon_meld(hand: &Hand, discard: Tile, from: Seat) -> Meld {
    let own: Vec<Tile> = hand
        .closed
        .iter()
        .copied()
        .filter(|t| t.kind() == discard.kind())
        .take(2)
        .collect();
    Meld::Pon { tiles: [own[0], own[1], discard], called: discard, from }
}

fn daiminkan_meld(hand: &Hand, discard: Tile, from: Seat) -> Meld {
    let own: Vec<Tile> = hand
        .closed
        .iter()
        .copied()
        .filter(|t| t.kind() == discard.kind())
        .take(3)
        .collect();
    Meld::Daiminkan { tiles: [own[0], own[1], own[2], discard], called: discard, from }
}

/// The up-to-three sequence patterns around the discarded tile.
fn chii_melds(hand: &Hand, discard: Tile, from: Seat) -> Vec<Meld> {
    if discard.is_honor() {
        return vec![];
    }
    let kind = discard.kind();
    let num = kind % 9; // 0-based number within the suit
    let held = |k: u8| hand.closed.iter().copied().find(|t| t.kind() == k);

    let mut melds = vec![];
    let mut try_pattern = |a: u8, b: u8| {
        if let (Some(t1), Some(t2)) = (held(a), held(b)) {
            let mut tiles = [discard, t1, t2];
            tiles.sort_by_key(|t| t.kind());
            melds.push(Meld::Chii { tiles, called: discard, from });
        }
    };

    // [discard] X Y
    if num <= 6 {
        try_pattern(kind + 1, kind + 2);
    }
    // X [discard] Y
    if (1..=7).contains(&num) {
        try_pattern(kind - 1, kind + 1);
    }
    // X Y [discard]
    if num >= 2 {
        try_pattern(kind - 2, kind - 1);
    }
    melds
}
