//! Seat indices and relative turn order.
//!
//! A seat is a plain index: `0..4` in four-player, `0..3` in three-player.
//! Turn arithmetic therefore takes the table's seat count explicitly instead
//! of baking mod-4 into the type.

/// Seat index. Seat 0 holds the east wind in the first round of a game.
pub type Seat = u8;

/// Wind index — 0, 1, 2, 3 => east, south, west, north. Kind = `27 + wind`.
pub type Wind = u8;

/// The tile kind of a wind.
pub const fn wind_kind(wind: Wind) -> u8 { 27 + wind }

/// Returns the next seat after `seat` in turn order.
pub fn seat_succ(seat: Seat, num_players: u8) -> Seat {
    (seat + 1) % num_players
}

/// Returns all seats, starting from `seat`, in natural turn order.
pub fn seats_from(seat: Seat, num_players: u8) -> impl Iterator<Item = Seat> {
    (0..num_players).map(move |i| (seat + i) % num_players)
}

/// Returns the other seats after `seat`, in natural turn order.
pub fn other_seats_after(seat: Seat, num_players: u8) -> impl Iterator<Item = Seat> {
    (1..num_players).map(move |i| (seat + i) % num_players)
}
