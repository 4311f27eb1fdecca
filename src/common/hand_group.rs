//! [Hand group](HandGroup), a.k.a. mentsu 面子.
//!
//! ## Ref
//! - <https://riichi.wiki/Mentsu>

use std::fmt::{Display, Formatter};

/// A group of 3 tiles inside a decomposition, identified by kind only.
///
/// - `Koutsu(k)`: triplet of kind `k`; e.g. `222z`, `555m`
/// - `Shuntsu(k)`: sequence starting at kind `k` (`k` is the lowest tile);
///   only valid for `k < 27 && k % 9 <= 6`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "kind")]
pub enum HandGroup {
    Koutsu(u8),
    Shuntsu(u8),
}

impl HandGroup {
    /// The lowest kind in the group.
    pub fn base_kind(self) -> u8 {
        match self {
            HandGroup::Koutsu(k) | HandGroup::Shuntsu(k) => k,
        }
    }

    pub fn is_shuntsu(self) -> bool { matches!(self, HandGroup::Shuntsu(_)) }
    pub fn is_koutsu(self) -> bool { matches!(self, HandGroup::Koutsu(_)) }

    /// Whether the group contains the given kind.
    pub fn contains(self, kind: u8) -> bool {
        match self {
            HandGroup::Koutsu(k) => k == kind,
            HandGroup::Shuntsu(k) => k <= kind && kind <= k + 2,
        }
    }

    /// Whether the group touches a terminal or honor tile.
    pub fn has_yaochu(self) -> bool {
        match self {
            HandGroup::Koutsu(k) => crate::common::tile::kind_is_yaochu(k),
            HandGroup::Shuntsu(k) => k % 9 == 0 || k % 9 == 6,
        }
    }
}

impl Display for HandGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let suit = ['m', 'p', 's', 'z'][(self.base_kind() / 9).min(3) as usize];
        match self {
            HandGroup::Koutsu(k) => {
                let n = if *k < 27 { k % 9 + 1 } else { k - 27 + 1 };
                write!(f, "{}{}{}{}", n, n, n, suit)
            }
            HandGroup::Shuntsu(k) => {
                let n = k % 9 + 1;
                write!(f, "{}{}{}{}", n, n + 1, n + 2, suit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn group_membership_and_yaochu() {
        check!(HandGroup::Shuntsu(6).contains(8));
        check!(!HandGroup::Shuntsu(6).contains(5));
        check!(HandGroup::Shuntsu(6).has_yaochu()); // 789m
        check!(!HandGroup::Shuntsu(4).has_yaochu()); // 567m
        check!(HandGroup::Koutsu(27).has_yaochu()); // EEE
        check!(!HandGroup::Koutsu(4).has_yaochu()); // 555m
    }

    #[test]
    fn group_display() {
        check!(HandGroup::Shuntsu(18).to_string() == "123s");
        check!(HandGroup::Koutsu(33).to_string() == "777z");
    }
}
