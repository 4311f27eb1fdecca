//! [`HandContext`] — everything the yaku predicates judge against.

use crate::common::hand_group::HandGroup;
use crate::common::meld::Meld;
use crate::common::tile_set::TileSet34;

/// A chosen decomposition plus every contextual flag of the win.
///
/// One context is built per candidate decomposition (and per special
/// shape); the scoring layer evaluates them all and keeps the best.
#[derive(Clone, Debug)]
pub struct HandContext<'a> {
    /// Kind of the pair; meaningless for the special shapes.
    pub head: u8,
    /// Closed groups of the chosen standard decomposition; empty for the
    /// special shapes.
    pub groups: &'a [HandGroup],
    pub melds: &'a [Meld],
    /// Closed + meld tiles.
    pub all_tiles: &'a TileSet34,

    pub win_kind: u8,
    pub is_tsumo: bool,
    pub is_menzen: bool,
    pub is_riichi: bool,
    pub is_double_riichi: bool,
    pub is_ippatsu: bool,

    /// Kind of the seat-wind tile.
    pub seat_wind_kind: u8,
    /// Kind of the prevailing-wind tile.
    pub round_wind_kind: u8,

    pub is_haitei: bool,
    pub is_houtei: bool,
    pub is_rinshan: bool,
    pub is_chankan: bool,
    pub is_tenhou: bool,
    pub is_chiihou: bool,

    pub is_seven_pairs: bool,
    pub is_thirteen_orphans: bool,

    pub dora_count: u8,
    pub ura_dora_count: u8,
    pub red_dora_count: u8,
}

impl<'a> HandContext<'a> {
    /// All groups of the hand: the closed decomposition plus each meld's
    /// equivalent group.
    pub fn all_groups(&self) -> impl Iterator<Item = HandGroup> + '_ {
        self.groups
            .iter()
            .copied()
            .chain(self.melds.iter().map(|m| m.to_equivalent_group()))
    }

    /// Whether the head is worth anything (dragon, seat wind, or
    /// prevailing wind) — disqualifies pinfu.
    pub fn head_is_yakuhai(&self) -> bool {
        self.head >= 31
            || self.head == self.seat_wind_kind
            || self.head == self.round_wind_kind
    }

    /// Concealed triplet count of this decomposition: closed koutsu plus
    /// closed kans, minus the one completed by a ron (a triplet finished
    /// from a discard is not concealed).
    pub fn concealed_triplets(&self) -> usize {
        let closed_koutsu = self.groups.iter().filter(|g| g.is_koutsu()).count();
        let ankan = self.melds.iter().filter(|m| !m.is_open()).count();
        let mut count = closed_koutsu + ankan;
        if !self.is_tsumo && self.ron_completes_koutsu() {
            count -= 1;
        }
        count
    }

    /// Whether the winning tile completes a triplet in this decomposition
    /// (it is not part of any sequence).
    pub fn ron_completes_koutsu(&self) -> bool {
        let in_shuntsu = self
            .groups
            .iter()
            .any(|g| g.is_shuntsu() && g.contains(self.win_kind));
        !in_shuntsu
            && self
                .groups
                .iter()
                .any(|g| g.is_koutsu() && g.base_kind() == self.win_kind)
    }

    /// Whether the winning tile sits as a two-sided (ryanmen) wait in some
    /// sequence of this decomposition.
    pub fn has_two_sided_wait(&self) -> bool {
        self.groups.iter().any(|g| {
            if let HandGroup::Shuntsu(base) = *g {
                (self.win_kind == base && base % 9 <= 5)
                    || (self.win_kind == base + 2 && base % 9 >= 1)
            } else {
                false
            }
        })
    }

    /// Tile counts per suit: (m, p, s, honors).
    pub fn suit_totals(&self) -> (u8, u8, u8, u8) {
        let h = &self.all_tiles.0;
        let m: u8 = h[0..9].iter().sum();
        let p: u8 = h[9..18].iter().sum();
        let s: u8 = h[18..27].iter().sum();
        let z: u8 = h[27..34].iter().sum();
        (m, p, s, z)
    }
}
