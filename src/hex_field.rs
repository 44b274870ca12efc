//! Component A: the hexagonal grid underlying every instance.

use std::cmp::Ordering;

use strum::VariantArray;

use crate::direction::Direction;
use crate::error::HexlinkError;
use crate::location::Location;

/// A cell's stored value; `0` means empty.
pub type CellValue = u32;

/// The sentinel value for an empty cell.
pub const CELL_EMPTY: CellValue = 0;

/// A hexagonal board of odd side `s`: row `i` has `s - |i - s/2|` cells, so rows grow
/// by one down to the middle ("equator") row, then shrink back by one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HexField {
    rows: Vec<Vec<CellValue>>,
}

impl HexField {
    /// Build a field from already-numeric rows, failing if they do not form a
    /// ziggurat of odd side `>= 3`.
    pub fn new(rows: Vec<Vec<CellValue>>) -> Result<Self, HexlinkError> {
        Self::check_shape(&rows)?;
        Ok(Self { rows })
    }

    fn check_shape(rows: &[Vec<CellValue>]) -> Result<(), HexlinkError> {
        let side = rows.len();
        if side < 3 || side % 2 == 0 {
            return Err(HexlinkError::ShapeError {
                reason: format!("side must be odd and at least 3, got {side}"),
            });
        }

        let middle = side / 2;
        for (i, row) in rows.iter().enumerate() {
            let expected = side - i.abs_diff(middle);
            if row.len() != expected {
                return Err(HexlinkError::ShapeError {
                    reason: format!("row {i} has length {}, expected {expected}", row.len()),
                });
            }
        }

        Ok(())
    }

    /// The board's side length `s` (its row count, and its middle row's width).
    pub fn side(&self) -> usize {
        self.rows.len()
    }

    /// Read a cell's value.
    pub fn get(&self, at: Location) -> Result<CellValue, HexlinkError> {
        self.rows
            .get(at.level())
            .and_then(|row| row.get(at.index()))
            .copied()
            .ok_or(HexlinkError::OutOfBounds(at))
    }

    /// Write a cell's value.
    pub fn set(&mut self, at: Location, value: CellValue) -> Result<(), HexlinkError> {
        let cell = self
            .rows
            .get_mut(at.level())
            .and_then(|row| row.get_mut(at.index()))
            .ok_or(HexlinkError::OutOfBounds(at))?;
        *cell = value;
        Ok(())
    }

    /// Whether `at` names a real cell on this board.
    pub fn is_valid(&self, at: Location) -> bool {
        self.rows.get(at.level()).is_some_and(|row| at.index() < row.len())
    }

    /// The (up to) six candidate neighbours of `at`, without filtering for validity.
    /// Use [`Self::neighbours`] for the filtered, on-board set.
    pub fn environment(&self, at: Location) -> [Location; 6] {
        let middle = self.side() / 2;
        let relative = at.level().cmp(&middle);
        let mut out = [Location::default(); 6];
        for (slot, direction) in out.iter_mut().zip(Direction::VARIANTS) {
            *slot = direction.attempt_from(at, relative);
        }
        out
    }

    /// [`Self::environment`] filtered to valid, on-board coordinates.
    pub fn neighbours(&self, at: Location) -> Vec<Location> {
        self.environment(at).into_iter().filter(|&p| self.is_valid(p)).collect()
    }

    /// Every valid coordinate on the board, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Location> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| (0..row.len()).map(move |j| Location(i, j)))
    }

    /// A same-shaped field with every cell reset to empty.
    pub fn blank_like(&self) -> HexField {
        HexField {
            rows: self.rows.iter().map(|row| vec![CELL_EMPTY; row.len()]).collect(),
        }
    }

    /// Borrow the row data directly; used by the generator and the renderer.
    pub(crate) fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}
