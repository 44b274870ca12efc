//! The six directions leading out of a hex cell.

use std::cmp::Ordering;

use strum::VariantArray;

use crate::location::Location;

/// One of the six directions out of a cell. Which concrete `(level, index)` offset a
/// diagonal direction names depends on whether the cell sits above, on, or below the
/// board's equator row — see [`Direction::attempt_from`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, VariantArray)]
pub enum Direction {
    /// `(level, index + 1)`.
    East,
    /// `(level, index - 1)`.
    West,
    /// `(level + 1, index)`.
    South,
    /// `(level - 1, index)`.
    North,
    /// The lower diagonal; `(level + 1, index + 1)` above the equator, `(level + 1, index - 1)` otherwise.
    SouthDiagonal,
    /// The upper diagonal; `(level - 1, index - 1)` above or on the equator, `(level - 1, index + 1)` below.
    NorthDiagonal,
}

impl Direction {
    /// The three directions that, in the canonical edge order, lead to a
    /// higher-indexed cell: east, south, and the south diagonal.
    pub const FORWARD: [Direction; 3] = [Direction::East, Direction::South, Direction::SouthDiagonal];

    /// Compute the location this direction names from `at`, given how `at`'s own row
    /// compares to the equator row (`Less` above, `Equal` on, `Greater` below).
    pub(crate) fn attempt_from(self, at: Location, relative_to_equator: Ordering) -> Location {
        let delta = match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::SouthDiagonal => match relative_to_equator {
                Ordering::Less => (1, 1),
                Ordering::Equal | Ordering::Greater => (1, -1),
            },
            Direction::NorthDiagonal => match relative_to_equator {
                Ordering::Less | Ordering::Equal => (-1, -1),
                Ordering::Greater => (-1, 1),
            },
        };
        at.offset_by(delta)
    }
}
