//! Player actions and the legal-move menu handed to the decision callback.

use crate::common::meld::Meld;
use crate::common::player::Seat;
use crate::common::tile::Tile;

/// A move chosen by the decision callback.
///
/// Returning an action that the accompanying [`AvailableActions`] does not
/// allow is a fatal engine error.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Discard a held tile (the drawn tile only, under riichi).
    Discard(Tile),
    /// Declare riichi and discard the given tile.
    Riichi(Tile),
    /// Closed kan on all four copies of a kind.
    ClosedKan(u8),
    /// Promote a held pon to a kan with this tile.
    AddedKan(Tile),
    /// Open kan on the last discard.
    OpenKan(Meld),
    /// Pon the last discard.
    Triplet(Meld),
    /// Chii the last discard (from the previous seat only).
    Sequence(Meld),
    /// Set aside a north tile (three-player only).
    NorthDeclare,
    /// Win — tsumo at a post-draw point, ron at a claim point.
    Win,
    /// Nine-terminals abortive draw on an uninterrupted first turn.
    NineTerminalsAbort,
    /// Decline to claim.
    Skip,
}

/// Every legal move for one seat at one decision point.
///
/// Post-draw points populate the first block; claim windows the second.
/// `discards` is empty at claim points (skipping is always allowed there).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableActions {
    pub seat: Seat,

    // After drawing.
    pub can_tsumo: bool,
    pub riichi_candidates: Vec<Tile>,
    pub closed_kans: Vec<u8>,
    pub added_kans: Vec<Tile>,
    pub can_north: bool,
    pub can_nine_terminals: bool,
    pub discards: Vec<Tile>,

    // In response to a discard (or an added kan, for ron).
    pub can_ron: bool,
    pub triplets: Vec<Meld>,
    pub open_kans: Vec<Meld>,
    pub sequences: Vec<Meld>,
}

impl AvailableActions {
    pub fn new(seat: Seat) -> Self {
        Self { seat, ..Self::default() }
    }

    /// Whether any claim (beyond skipping) is on offer.
    pub fn has_claim(&self) -> bool {
        self.can_ron
            || !self.triplets.is_empty()
            || !self.open_kans.is_empty()
            || !self.sequences.is_empty()
    }

    /// The legality oracle: is `action` one of the enumerated moves?
    pub fn allows(&self, action: &Action) -> bool {
        match action {
            Action::Discard(tile) => self.discards.contains(tile),
            Action::Riichi(tile) => self.riichi_candidates.contains(tile),
            Action::ClosedKan(kind) => self.closed_kans.contains(kind),
            Action::AddedKan(tile) => self.added_kans.contains(tile),
            Action::OpenKan(meld) => self.open_kans.contains(meld),
            Action::Triplet(meld) => self.triplets.contains(meld),
            Action::Sequence(meld) => self.sequences.contains(meld),
            Action::NorthDeclare => self.can_north,
            Action::Win => self.can_tsumo || self.can_ron,
            Action::NineTerminalsAbort => self.can_nine_terminals,
            // Skipping is only meaningful at claim points.
            Action::Skip => self.discards.is_empty(),
        }
    }
}
