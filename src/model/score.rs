//! Score result value types.

use crate::common::typedefs::GamePoints;
use crate::yaku::Yaku;

/// The outcome of scoring one winning hand.
///
/// Payment fields are all populated regardless of direction so consumers
/// can render them without recomputing: tsumo wins fill
/// `dealer_payment`/`non_dealer_payment`, ron wins fill `ron_payment`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreResult {
    /// Realized yaku with their han values, plus dora pseudo-yaku.
    pub yaku: Vec<(Yaku, u8)>,
    pub han: u8,
    pub fu: u8,
    pub base_points: GamePoints,
    /// Sum collected by the winner, excluding honba and riichi sticks.
    pub total_points: GamePoints,
    /// What the dealer pays on a non-dealer tsumo.
    pub dealer_payment: GamePoints,
    /// What each non-dealer pays on a tsumo.
    pub non_dealer_payment: GamePoints,
    /// What the discarder pays on a ron.
    pub ron_payment: GamePoints,
    pub is_dealer: bool,
    pub is_tsumo: bool,
    pub honba: u8,
}

impl ScoreResult {
    pub fn is_yakuman(&self) -> bool { self.han >= 13 }

    /// Score-tier name, used by consumers for display.
    pub fn rank(&self) -> Option<&'static str> {
        match self.han {
            h if h >= 13 => Some("yakuman"),
            11 | 12 => Some("sanbaiman"),
            8..=10 => Some("baiman"),
            6 | 7 => Some("haneman"),
            _ if self.base_points >= 2000 => Some("mangan"),
            _ => None,
        }
    }
}
