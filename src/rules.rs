//! Configurable rules for a game, bundled as [`Ruleset`].

use derivative::Derivative;

/// The full configuration surface of the engine. Anything not listed here
/// is fixed behavior.
///
/// A [`Default::default()`] ruleset is a four-player East-South game with
/// 25000 starting points and three red fives.
#[derive(Derivative)]
#[derive(Clone, Debug)]
#[derivative(Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Ruleset {
    /// 4 for the standard game, 3 for sanma (108-tile wall, no sequence
    /// calls, north declares).
    #[derivative(Default(value = "4"))]
    pub num_players: u8,

    /// East-only game (東風戦) instead of East-South (半荘).
    #[derivative(Default(value = "false"))]
    pub east_only: bool,

    /// Points each seat starts with.
    #[derivative(Default(value = "25000"))]
    pub starting_score: crate::common::typedefs::GamePoints,

    /// Minimum top score required to end the game at the all-last round.
    #[derivative(Default(value = "30000"))]
    pub target_score: crate::common::typedefs::GamePoints,

    /// Number of red fives in the wall: 0 or 3 (one per numeric suit).
    #[derivative(Default(value = "3"))]
    pub red_fives: u8,
}

impl Ruleset {
    pub fn three_player(&self) -> bool {
        self.num_players == 3
    }
}
