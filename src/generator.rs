//! Component D: randomized, restart-on-failure generation of a solvable instance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hex_field::{CellValue, HexField, CELL_EMPTY};
use crate::instance::{Instance, PLAYER_MAX_NUMBER};
use crate::location::Location;

/// Lower bound (inclusive) for a randomly chosen board side.
pub const MIN_SIZE: usize = 3;
/// Upper bound (inclusive) for a randomly chosen board side.
pub const MAX_SIZE: usize = 5;

/// The generator's own cap on path ids while packing a candidate field. A candidate
/// using more than [`PLAYER_MAX_NUMBER`] numbers once painted is rejected and the
/// whole attempt restarts from a blank field — see spec.md §9.
const MAX_NUMBER: u32 = 100;

fn hexagonal_rows(side: usize) -> Vec<Vec<CellValue>> {
    let distance = side - side / 2;
    (distance..side)
        .chain((distance..=side).rev())
        .map(|len| vec![CELL_EMPTY; len])
        .collect()
}

fn centered_hex_number(n: usize) -> usize {
    3 * n * (n - 1) + 1
}

fn empty_cells(field: &HexField) -> Vec<Location> {
    field.cells().filter(|&loc| field.get(loc) == Ok(CELL_EMPTY)).collect()
}

/// One candidate board under construction: a ziggurat being packed with
/// vertex-disjoint paths until every cell belongs to exactly one.
struct PathPacker {
    field: HexField,
    covered: usize,
    target_cells: usize,
    paths: Vec<(Location, Location)>,
}

impl PathPacker {
    fn new(field: HexField) -> Self {
        let n = (field.side() + 1) / 2;
        let target_cells = centered_hex_number(n);
        Self {
            field,
            covered: 0,
            target_cells,
            paths: Vec::new(),
        }
    }

    fn number(&self) -> CellValue {
        self.paths.len() as CellValue + 1
    }

    fn count_added_neighbours_or_non_valid(&self, at: Location) -> usize {
        self.field
            .environment(at)
            .into_iter()
            .filter(|&p| !matches!(self.field.get(p), Ok(CELL_EMPTY)))
            .count()
    }

    fn count_numbered_neighbours(&self, at: Location, number: CellValue) -> usize {
        self.field.neighbours(at).into_iter().filter(|&p| self.field.get(p) == Ok(number)).count()
    }

    fn is_cycle(&self, at: Location, number: CellValue) -> bool {
        self.count_numbered_neighbours(at, number) > 1
    }

    fn is_isolated(&self, at: Location, number: CellValue, is_last: bool) -> bool {
        self.count_added_neighbours_or_non_valid(at) == 6 && (!is_last || self.is_cycle(at, number))
    }

    fn has_isolated_empty_cells(&self, at: Location, number: CellValue, is_last: bool) -> bool {
        self.field
            .neighbours(at)
            .into_iter()
            .filter(|&p| self.field.get(p) == Ok(CELL_EMPTY))
            .any(|p| self.is_isolated(p, number, is_last))
    }

    fn can_add_cell(&mut self, at: Location, number: CellValue) -> bool {
        self.field.set(at, number).expect("at comes from this field's own cell list");
        let isolated = self.has_isolated_empty_cells(at, number, true);
        self.field.set(at, CELL_EMPTY).expect("reverting the tentative write above");
        !isolated
    }

    fn get_path_extension_neighbour(&mut self, rng: &mut impl Rng, at: Location, number: CellValue) -> Option<Location> {
        let neighbours = self.field.neighbours(at);
        if neighbours.is_empty() || self.has_isolated_empty_cells(at, number, false) {
            return None;
        }

        let start = rng.gen_range(0..neighbours.len());
        let rotated = neighbours[start..].iter().chain(neighbours[..start].iter());
        for &candidate in rotated {
            if self.field.get(candidate) == Ok(CELL_EMPTY) && self.can_add_cell(candidate, number) {
                return Some(candidate);
            }
        }
        None
    }

    fn try_get_new_path_begin(&mut self, rng: &mut impl Rng) -> Option<(Location, Location)> {
        let empties = empty_cells(&self.field);
        if empties.is_empty() {
            return None;
        }

        let start = rng.gen_range(0..empties.len());
        let rotated: Vec<Location> = empties[start..].iter().chain(empties[..start].iter()).copied().collect();
        let number = self.number();

        for head in rotated {
            if self.can_add_cell(head, number) {
                if let Some(tail) = self.get_path_extension_neighbour(rng, head, number) {
                    return Some((head, tail));
                }
            }
        }
        None
    }

    fn add_new_path(&mut self, rng: &mut impl Rng, head: Location, tail: Location) {
        let number = self.number();
        self.field.set(head, number).expect("head comes from this field's own cell list");
        self.field.set(tail, number).expect("tail comes from this field's own cell list");
        self.covered += 2;

        let mut current = tail;
        loop {
            if self.covered >= self.target_cells {
                break;
            }
            match self.get_path_extension_neighbour(rng, current, number) {
                Some(next) => {
                    self.field.set(next, number).expect("next comes from this field's own cell list");
                    self.covered += 1;
                    current = next;
                }
                None => break,
            }
        }

        self.paths.push((head, current));
    }

    fn construct(&mut self, rng: &mut impl Rng) {
        loop {
            match self.try_get_new_path_begin(rng) {
                Some((head, tail)) => self.add_new_path(rng, head, tail),
                None => {
                    if self.covered == self.target_cells && self.number() <= MAX_NUMBER {
                        return;
                    }
                    *self = PathPacker::new(HexField::new(hexagonal_rows(self.field.side())).expect("ziggurat shape is always valid"));
                }
            }
        }
    }

    fn endpoint_rows(&self) -> Vec<Vec<CellValue>> {
        let mut rows = hexagonal_rows(self.field.side());
        for (i, &(head, tail)) in self.paths.iter().enumerate() {
            let number = i as CellValue + 1;
            rows[head.level()][head.index()] = number;
            rows[tail.level()][tail.index()] = number;
        }
        rows
    }
}

/// Component D: builds a random, solvable [`Instance`] by packing the board into
/// vertex-disjoint paths and keeping only each path's two endpoints.
pub struct Generator<R: Rng> {
    rng: R,
}

impl Generator<StdRng> {
    /// A generator seeded from a non-deterministic source.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// A generator with reproducible output, for tests and diagnostics.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Generator<R> {
    /// Generate an instance on a board of the given odd side (`>= 3`), or a random
    /// odd side in `[MIN_SIZE, MAX_SIZE]` if `side` is `None`.
    pub fn generate(&mut self, side: Option<usize>) -> Instance {
        let side = side.unwrap_or_else(|| {
            let candidates: Vec<usize> = (MIN_SIZE..=MAX_SIZE).step_by(2).collect();
            candidates[self.rng.gen_range(0..candidates.len())]
        });

        loop {
            let blank = HexField::new(hexagonal_rows(side)).expect("ziggurat shape is always valid");
            let mut packer = PathPacker::new(blank);
            packer.construct(&mut self.rng);

            match Instance::from_numeric(packer.endpoint_rows(), PLAYER_MAX_NUMBER) {
                Ok(instance) => return instance,
                Err(_) => continue,
            }
        }
    }
}

/// Convenience free function equivalent to `Generator::new().generate(side)`.
pub fn generate_field(side: Option<usize>) -> Instance {
    Generator::new().generate(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagonal_rows_match_expected_shape() {
        assert_eq!(
            hexagonal_rows(5).iter().map(Vec::len).collect::<Vec<_>>(),
            vec![3, 4, 5, 4, 3]
        );
    }

    #[test]
    fn centered_hex_numbers_match_reference_values() {
        assert_eq!(centered_hex_number(1), 1);
        assert_eq!(centered_hex_number(2), 7);
        assert_eq!(centered_hex_number(3), 19);
        assert_eq!(centered_hex_number(4), 37);
    }

    #[test]
    fn generated_instance_is_fully_covered_and_solvable() {
        let mut generator = Generator::from_seed(42);
        let instance = generator.generate(Some(3));
        assert_eq!(instance.field().side(), 3);

        let solver = crate::solver::Solver::new(&instance);
        assert!(solver.solutions().next().is_some());
    }

    #[test]
    fn generation_is_deterministic_given_a_seed() {
        let a = Generator::from_seed(7).generate(Some(3));
        let b = Generator::from_seed(7).generate(Some(3));
        assert_eq!(a, b);
    }
}
