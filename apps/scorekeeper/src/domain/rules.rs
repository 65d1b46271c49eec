use std::ops::RangeInclusive;

pub const PLAYERS: usize = 4;
/// 52 cards dealt over four hands.
pub const TRICKS_PER_DEAL: u8 = 13;

pub fn valid_trick_range() -> RangeInclusive<u8> {
    0..=TRICKS_PER_DEAL
}

/// Seat to the left of `seat` (clockwise, wrapping 3 → 0).
#[inline]
pub fn next_seat(seat: usize) -> usize {
    (seat + 1) % PLAYERS
}
