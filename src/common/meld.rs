//! Meld 副露 — a frozen call record.
//!
//! ## Ref
//! - <https://riichi.wiki/Naki>

use std::fmt::{Display, Formatter};

use super::hand_group::HandGroup;
use super::player::Seat;
use super::tile::Tile;

/// A frozen meld: the call kind, its tiles, the called tile (absent for a
/// closed kan), and the seat the tile was taken from (absent for a closed
/// kan). "Open" means every variant except [`Meld::Ankan`].
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Meld {
    /// Called sequence 吃. `tiles` are sorted by kind; `called` is one of them.
    Chii { tiles: [Tile; 3], called: Tile, from: Seat },
    /// Called triplet 碰.
    Pon { tiles: [Tile; 3], called: Tile, from: Seat },
    /// Closed kan 暗槓.
    Ankan { tiles: [Tile; 4] },
    /// Open kan called from a discard 大明槓.
    Daiminkan { tiles: [Tile; 4], called: Tile, from: Seat },
    /// Added kan — a pon promoted with the fourth tile 加槓.
    Kakan { tiles: [Tile; 4], called: Tile, from: Seat },
}

impl Meld {
    pub fn tiles(&self) -> &[Tile] {
        match self {
            Meld::Chii { tiles, .. } | Meld::Pon { tiles, .. } => tiles,
            Meld::Ankan { tiles } | Meld::Daiminkan { tiles, .. } | Meld::Kakan { tiles, .. } => {
                tiles
            }
        }
    }

    /// The tile taken from another seat, absent for a closed kan.
    pub fn called_tile(&self) -> Option<Tile> {
        match self {
            Meld::Ankan { .. } => None,
            Meld::Chii { called, .. }
            | Meld::Pon { called, .. }
            | Meld::Daiminkan { called, .. }
            | Meld::Kakan { called, .. } => Some(*called),
        }
    }

    pub fn is_kan(&self) -> bool {
        matches!(self, Meld::Ankan { .. } | Meld::Daiminkan { .. } | Meld::Kakan { .. })
    }

    pub fn is_open(&self) -> bool { !matches!(self, Meld::Ankan { .. }) }

    /// The kind identifying a pon/kan, or the lowest kind of a chii.
    pub fn base_kind(&self) -> u8 {
        match self {
            Meld::Chii { tiles, .. } => tiles.iter().map(|t| t.kind()).min().unwrap_or(0),
            other => other.tiles()[0].kind(),
        }
    }

    /// The 3-tile group this meld is equivalent to for yaku purposes
    /// (a kan counts as its triplet).
    pub fn to_equivalent_group(&self) -> HandGroup {
        match self {
            Meld::Chii { .. } => HandGroup::Shuntsu(self.base_kind()),
            _ => HandGroup::Koutsu(self.base_kind()),
        }
    }
}

impl Display for Meld {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Meld::Chii { .. } => "chii",
            Meld::Pon { .. } => "pon",
            Meld::Ankan { .. } => "ankan",
            Meld::Daiminkan { .. } => "daiminkan",
            Meld::Kakan { .. } => "kakan",
        };
        write!(f, "{}(", tag)?;
        for tile in self.tiles() {
            write!(f, "{}", tile)?;
        }
        write!(f, ")")
    }
}
