//! Furiten (振聴) — the three flavors of blocked ron.
//!
//! - **Permanent**: a waiting kind sits in the seat's own discard pool.
//! - **Temporary**: another seat discarded a waiting kind that went
//!   unclaimed; cleared on the holder's next draw.
//! - **Riichi-locked**: a missed waiting kind while under riichi blocks
//!   ron for the rest of the round.
//!
//! Self-draw wins are never blocked.

use crate::common::tile_set::{TileMask34, TileSet34};
use crate::model::hand::Hand;

use crate::analysis::decomp::waiting_kinds;

/// The waiting set of a 3N+1 hand, as a mask.
pub fn waiting_mask(h: &TileSet34) -> TileMask34 {
    TileMask34::from_iter(waiting_kinds(h))
}

/// Permanent furiten: any waiting kind appears in the hand's own discard
/// pool.
pub fn is_discard_furiten(hand: &Hand) -> bool {
    let h = hand.counts_without_drawn();
    if h.total() % 3 != 1 {
        return false;
    }
    let waits = waiting_mask(&h);
    if waits.is_empty() {
        return false;
    }
    let river = TileMask34::from_iter(hand.discards.iter().map(|d| d.tile.kind()));
    (waits & river).any()
}

/// Temporary or riichi-locked furiten: any waiting kind is among the
/// missed kinds tracked by the round.
pub fn is_missed_furiten(waits: TileMask34, missed: TileMask34) -> bool {
    (waits & missed).any()
}

/// Whether ron on the given waits is blocked by any flavor.
pub fn ron_blocked(
    hand: &Hand,
    waits: TileMask34,
    temporary: TileMask34,
    riichi_locked: TileMask34,
) -> bool {
    is_discard_furiten(hand)
        || is_missed_furiten(waits, temporary)
        || is_missed_furiten(waits, riichi_locked)
}
