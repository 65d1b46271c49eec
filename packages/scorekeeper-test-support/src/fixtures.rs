//! Seating fixtures.

/// The default table: the four compass seats, in seating order.
pub const COMPASS: [&str; 4] = ["Noord", "Oost", "Zuid", "West"];

/// A table where some names need trimming or defaulting.
pub const MESSY: [&str; 4] = ["  Anna", "", "Bert  ", " "];

/// Seat indices of a team partnership sitting opposite each other.
pub const NORTH_SOUTH: [usize; 2] = [0, 2];
pub const EAST_WEST: [usize; 2] = [1, 3];
