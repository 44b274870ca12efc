//! Component C: a validated puzzle instance — a field plus its target pairs.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use unordered_pair::UnorderedPair;

use crate::error::HexlinkError;
use crate::graph::{Graph, GraphBuilder};
use crate::hex_field::{CellValue, HexField, CELL_EMPTY};
use crate::location::Location;

/// The maximum number value a player-facing instance may use.
pub const PLAYER_MAX_NUMBER: CellValue = 9;

/// The vertices and pairs a solution must connect.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Targets {
    /// Every cell that holds a non-zero number.
    pub vertices: HashSet<Location>,
    /// Each non-zero number's two cells, paired.
    pub pairs: HashSet<UnorderedPair<Location>>,
}

/// A field that has passed every check in spec.md §4.C: it is a ziggurat, every cell
/// parsed as a number, every non-zero number occurs exactly twice, no number exceeds
/// the configured maximum, and the non-zero numbers used form a dense run from 1.
#[derive(Clone, Debug)]
pub struct Instance {
    field: HexField,
    targets: Targets,
}

impl Instance {
    /// Parse a raw, textual field, validating against [`PLAYER_MAX_NUMBER`].
    pub fn parse(raw: Option<&[Vec<String>]>) -> Result<Self, HexlinkError> {
        Self::parse_with_max(raw, PLAYER_MAX_NUMBER)
    }

    /// Parse a raw, textual field, validating against a caller-supplied maximum.
    pub fn parse_with_max(raw: Option<&[Vec<String>]>, max: CellValue) -> Result<Self, HexlinkError> {
        let raw = raw.filter(|rows| !rows.is_empty()).ok_or(HexlinkError::NullOrEmpty)?;

        let mut numeric = Vec::with_capacity(raw.len());
        for (i, row) in raw.iter().enumerate() {
            let mut numeric_row = Vec::with_capacity(row.len());
            for (j, symbol) in row.iter().enumerate() {
                let value: CellValue = symbol.parse().map_err(|_| HexlinkError::BadCellSymbol {
                    location: Location(i, j),
                    symbol: symbol.clone(),
                })?;
                numeric_row.push(value);
            }
            numeric.push(numeric_row);
        }

        Self::from_numeric(numeric, max)
    }

    /// Build from already-numeric rows, validating against a caller-supplied maximum.
    /// Used directly by the generator, which constructs numeric rows without ever
    /// going through text.
    pub fn from_numeric(rows: Vec<Vec<CellValue>>, max: CellValue) -> Result<Self, HexlinkError> {
        Self::check_pairs(&rows)?;
        Self::check_range(&rows, max)?;
        Self::check_order(&rows)?;

        let field = HexField::new(rows)?;
        let targets = Self::compute_targets(&field);
        Ok(Self { field, targets })
    }

    fn check_pairs(rows: &[Vec<CellValue>]) -> Result<(), HexlinkError> {
        let mut counts: Vec<(CellValue, usize)> = Vec::new();
        for row in rows {
            for &value in row {
                if value == CELL_EMPTY {
                    continue;
                }
                match counts.iter_mut().find(|(n, _)| *n == value) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((value, 1)),
                }
            }
        }

        if counts.is_empty() {
            return Err(HexlinkError::NotPaired { offenders: Vec::new() });
        }

        let offenders: Vec<CellValue> = counts.iter().filter(|(_, count)| *count != 2).map(|(n, _)| *n).collect();
        if !offenders.is_empty() {
            return Err(HexlinkError::NotPaired { offenders });
        }

        Ok(())
    }

    fn check_range(rows: &[Vec<CellValue>], max: CellValue) -> Result<(), HexlinkError> {
        for row in rows {
            for &value in row {
                if value > max {
                    return Err(HexlinkError::OutOfRange { number: value, max });
                }
            }
        }
        Ok(())
    }

    fn check_order(rows: &[Vec<CellValue>]) -> Result<(), HexlinkError> {
        let mut present: HashSet<CellValue> = HashSet::new();
        for row in rows {
            present.extend(row.iter().copied());
        }

        let max_value = *present.iter().max().unwrap_or(&0);
        let missing: Vec<CellValue> = (0..=max_value).filter(|v| !present.contains(v)).collect();
        if !missing.is_empty() {
            return Err(HexlinkError::BrokenOrder { missing });
        }

        Ok(())
    }

    fn compute_targets(field: &HexField) -> Targets {
        let mut vertices = HashSet::new();
        let mut pairs = HashSet::new();
        let mut first_seen: HashMap<CellValue, Location> = HashMap::new();

        for (i, row) in field.rows().iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == CELL_EMPTY {
                    continue;
                }
                let here = Location(i, j);
                vertices.insert(here);
                match first_seen.entry(value) {
                    Entry::Occupied(seen) => {
                        pairs.insert(UnorderedPair::from((*seen.get(), here)));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(here);
                    }
                }
            }
        }

        Targets { vertices, pairs }
    }

    /// The underlying field.
    pub fn field(&self) -> &HexField {
        &self.field
    }

    /// The target vertices and pairs this instance's solutions must connect.
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Build component B's graph for this instance.
    pub fn make_graph(&self) -> Graph {
        GraphBuilder::build(&self.field)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

impl Eq for Instance {}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn rejects_null_field() {
        assert_eq!(Instance::parse(None), Err(HexlinkError::NullOrEmpty));
    }

    #[test]
    fn rejects_empty_field() {
        assert_eq!(Instance::parse(Some(&[])), Err(HexlinkError::NullOrEmpty));
    }

    #[test]
    fn rejects_non_numeric_symbol() {
        let rows = raw(&[&["1", "2"], &["x", "0", "0"], &["1", "2"]]);
        assert!(matches!(Instance::parse(Some(&rows)), Err(HexlinkError::BadCellSymbol { .. })));
    }

    #[test]
    fn rejects_unpaired_number() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["1", "1"]]);
        assert!(matches!(Instance::parse(Some(&rows)), Err(HexlinkError::NotPaired { .. })));
    }

    #[test]
    fn rejects_no_numbers_at_all() {
        let rows = raw(&[&["0", "0"], &["0", "0", "0"], &["0", "0"]]);
        assert_eq!(
            Instance::parse(Some(&rows)),
            Err(HexlinkError::NotPaired { offenders: Vec::new() })
        );
    }

    #[test]
    fn rejects_number_above_max() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["1", "2"]]);
        assert!(matches!(
            Instance::parse_with_max(Some(&rows), 1),
            Err(HexlinkError::OutOfRange { number: 2, max: 1 })
        ));
    }

    #[test]
    fn rejects_broken_order() {
        let rows = raw(&[&["1", "3"], &["0", "0", "0"], &["1", "3"]]);
        assert!(matches!(Instance::parse(Some(&rows)), Err(HexlinkError::BrokenOrder { .. })));
    }

    #[test]
    fn rejects_bad_shape() {
        let rows = raw(&[&["1", "2"], &["1", "2"]]);
        assert!(matches!(Instance::parse(Some(&rows)), Err(HexlinkError::ShapeError { .. })));
    }

    #[test]
    fn accepts_valid_instance_and_computes_targets() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["1", "2"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        assert_eq!(instance.targets().vertices.len(), 4);
        assert_eq!(instance.targets().pairs.len(), 2);
        assert!(instance
            .targets()
            .pairs
            .contains(&UnorderedPair::from((Location(0, 0), Location(2, 0)))));
    }

    #[test]
    fn equality_compares_field_only() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["1", "2"]]);
        let a = Instance::parse(Some(&rows)).unwrap();
        let b = Instance::parse(Some(&rows)).unwrap();
        assert_eq!(a, b);
    }
}
