//! Tile 牌
//!
//! See [`Tile`].
//!
//! ## Ref
//! - <https://en.wikipedia.org/wiki/Mahjong_tiles>
//! - <https://riichi.wiki/Tiles>

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Number of tile kinds, disregarding copies and red flags.
pub const NUM_KINDS: usize = 34;

/// Total number of physical tiles in the four-player set.
pub const NUM_COPIES: usize = 136;

/// Copy ids of the three red fives (one copy each of 5m, 5p, 5s).
pub const RED_FIVE_IDS: [u8; 3] = [16, 52, 88];

/// Kinds that are terminals or honors (幺九牌).
pub const YAOCHU_KINDS: [u8; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Represents one physical tile (牌) out of the 136-tile set.
///
/// The `id` is the tile's *copy identity* in `0..=135`; `id / 4` is its
/// kind in `0..=33`:
///
/// | Kind       | Shorthand   | Category (EN) |
/// |------------|-------------|---------------|
/// | 0  ..= 8   | 1m ..= 9m   | characters    |
/// | 9  ..= 17  | 1p ..= 9p   | dots          |
/// | 18 ..= 26  | 1s ..= 9s   | bamboos       |
/// | 27 ..= 30  | E, S, W, N  | winds         |
/// | 31 ..= 33  | Wh, Gr, Rd  | dragons       |
///
/// Exactly one copy of each numeric 5 (ids 16, 52, 88) is flagged red.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Tile(u8);

impl Tile {
    pub const MIN_ID: u8 = 0;
    pub const MAX_ID: u8 = 135;

    pub const fn from_id(id: u8) -> Option<Self> {
        if id <= Self::MAX_ID { Some(Self(id)) } else { None }
    }

    /// First copy of the given kind; red for 5m/5p/5s only when `red` is set.
    pub const fn from_kind(kind: u8, red: bool) -> Option<Self> {
        if kind >= NUM_KINDS as u8 { return None; }
        if red {
            match kind {
                4 => Some(Self(RED_FIVE_IDS[0])),
                13 => Some(Self(RED_FIVE_IDS[1])),
                22 => Some(Self(RED_FIVE_IDS[2])),
                _ => None,
            }
        } else {
            // Copy 1 dodges the red flag on the fives; copy 0 elsewhere.
            match kind {
                4 | 13 | 22 => Some(Self(kind * 4 + 1)),
                _ => Some(Self(kind * 4)),
            }
        }
    }

    /// Copy identity in `0..=135`.
    pub const fn id(self) -> u8 { self.0 }

    /// Kind index in `0..=33`.
    pub const fn kind(self) -> u8 { self.0 / 4 }

    /// Red five 赤牌
    pub const fn is_red(self) -> bool {
        self.0 == RED_FIVE_IDS[0] || self.0 == RED_FIVE_IDS[1] || self.0 == RED_FIVE_IDS[2]
    }

    /// Winds + dragons 字牌
    pub const fn is_honor(self) -> bool { self.kind() >= 27 }

    /// Numbered suits 数牌
    pub const fn is_numbered(self) -> bool { self.kind() < 27 }

    /// 1 or 9 of a numbered suit 老頭牌
    pub const fn is_terminal(self) -> bool {
        self.is_numbered() && (self.kind() % 9 == 0 || self.kind() % 9 == 8)
    }

    /// Terminals + honors 幺九牌
    pub const fn is_yaochu(self) -> bool { self.is_terminal() || self.is_honor() }

    pub const fn is_wind(self) -> bool { 27 <= self.kind() && self.kind() <= 30 }
    pub const fn is_dragon(self) -> bool { self.kind() >= 31 }

    /// Suit: 0, 1, 2 for m, p, s; 3 for honors.
    pub const fn suit(self) -> u8 {
        if self.kind() < 27 { self.kind() / 9 } else { 3 }
    }

    /// Number 1..=9 within a numbered suit; 0 for honors.
    pub const fn num(self) -> u8 {
        if self.kind() < 27 { self.kind() % 9 + 1 } else { 0 }
    }

    /// Returns the standard shorthand string of this tile. Red fives read `0m`/`0p`/`0s`.
    pub const fn as_str(self) -> &'static str {
        if self.is_red() {
            return ["0m", "0p", "0s"][(self.kind() / 9) as usize];
        }
        kind_as_str(self.kind())
    }
}

/// Shorthand for a kind index (red-blind).
pub const fn kind_as_str(kind: u8) -> &'static str {
    [
        "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", //
        "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", //
        "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", //
        "1z", "2z", "3z", "4z", "5z", "6z", "7z", //
    ][kind as usize]
}

/// Whether the kind is a terminal or honor (幺九).
pub const fn kind_is_yaochu(kind: u8) -> bool {
    kind >= 27 || kind % 9 == 0 || kind % 9 == 8
}

/// Maps a dora-indicator kind to the indicated dora kind.
///
/// Wraps within each group: 9m→1m, 9p→1p, 9s→1s, N→E, Rd→Wh. In the
/// three-player configuration the m-suit has only 1m and 9m, so the wrap
/// becomes 1m→9m→1m.
pub const fn indicated_dora_kind(indicator: u8, three_player: bool) -> u8 {
    if indicator < 9 {
        if three_player {
            match indicator {
                0 => 8,
                8 => 0,
                k => (k + 1) % 9,
            }
        } else {
            (indicator + 1) % 9
        }
    } else if indicator < 18 {
        9 + (indicator - 9 + 1) % 9
    } else if indicator < 27 {
        18 + (indicator - 18 + 1) % 9
    } else if indicator < 31 {
        27 + (indicator - 27 + 1) % 4
    } else {
        31 + (indicator - 31 + 1) % 3
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({}#{})", self.as_str(), self.0 % 4)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) const fn suit_from_char(c: char) -> Option<u8> {
    match c {
        'm' => Some(0),
        'p' => Some(1),
        's' => Some(2),
        'z' => Some(3),
        _ => None,
    }
}

impl FromStr for Tile {
    type Err = ();
    /// Parses shorthand like `3p`, `7z`, `0m` (red five). Always yields the
    /// first non-red copy of the kind, or the red copy for `0m`/`0p`/`0s`.
    fn from_str(s: &str) -> Result<Self, ()> {
        let mut chars = s.chars();
        let (num_char, suit_char) = (chars.next().ok_or(())?, chars.next().ok_or(())?);
        if chars.next().is_some() { return Err(()); }
        let num = num_char.to_digit(10).ok_or(())? as u8;
        let suit = suit_from_char(suit_char).ok_or(())?;
        if num == 0 {
            if suit > 2 { return Err(()); }
            return Tile::from_kind(suit * 9 + 4, true).ok_or(());
        }
        if suit == 3 && !(1..=7).contains(&num) { return Err(()); }
        Tile::from_kind(suit * 9 + num - 1, false).ok_or(())
    }
}

/// Parse shorthand for a list of tiles.
/// Example: `"123m055p99s777z"` — `0` marks a red five. Unrecognized chars
/// are silently ignored. Repeated kinds reuse the same first copy, so the
/// result is meant for histogram building, not for copy-exact walls.
pub fn tiles_from_str(s: &str) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = vec![];
    let mut nums: Vec<u8> = vec![];
    for c in s.chars() {
        if let Some(num) = c.to_digit(10) {
            nums.push(num as u8);
        } else if let Some(suit) = suit_from_char(c) {
            for &num in &nums {
                let tile = if num == 0 && suit <= 2 {
                    Tile::from_kind(suit * 9 + 4, true)
                } else if num >= 1 {
                    Tile::from_kind(suit * 9 + num - 1, false)
                } else {
                    None
                };
                if let Some(tile) = tile {
                    tiles.push(tile);
                }
            }
            nums.clear();
        }
    }
    tiles
}
