//! Component E: frontier ZDD construction, solution enumeration, and painting.

use std::collections::HashSet;

use unordered_pair::UnorderedPair;

use crate::hex_field::{CellValue, HexField};
use crate::instance::Instance;
use crate::location::Location;
use crate::zdd::{slot_value, Child, Mate, MateSlot, MateValue, Node};

/// Tracks which vertices are still live on the construction frontier, and which have
/// already retired ("thrown") because every edge touching them has been processed.
struct Frontier {
    active: HashSet<Location>,
    thrown: HashSet<Location>,
}

impl Frontier {
    fn new(vertices: impl IntoIterator<Item = Location>) -> Self {
        Self {
            active: vertices.into_iter().collect(),
            thrown: HashSet::new(),
        }
    }

    fn throw(&mut self, v: Location) {
        self.active.remove(&v);
        self.thrown.insert(v);
    }

    fn is_active(&self, v: Location) -> bool {
        self.active.contains(&v)
    }

    fn is_thrown(&self, v: &Location) -> bool {
        self.thrown.contains(v)
    }
}

fn opposite(v: Location, edge: (Location, Location)) -> Location {
    if v == edge.0 {
        edge.1
    } else {
        edge.0
    }
}

fn restrict(mate: &Mate, frontier: &Frontier) -> Mate {
    mate.iter()
        .filter(|(&v, _)| frontier.is_active(v))
        .map(|(&v, &slot)| (v, slot))
        .collect()
}

/// Applies one taken edge to a mate function, over every vertex still tracked by it.
fn update_mate(mate: &Mate, edge: (Location, Location)) -> Mate {
    let mut next = Mate::with_capacity(mate.len());
    for (&v, &slot) in mate {
        let in_edge = v == edge.0 || v == edge.1;
        let new_slot = if in_edge && slot != MateSlot::SelfPaired {
            MateSlot::Saturated
        } else {
            match slot_value(slot, v) {
                MateValue::Loc(value) if value == edge.0 || value == edge.1 => {
                    let far = opposite(value, edge);
                    let far_slot = mate.get(&far).copied().unwrap_or(MateSlot::SelfPaired);
                    match slot_value(far_slot, far) {
                        MateValue::Zero => MateSlot::Saturated,
                        MateValue::Loc(loc) if loc == v => MateSlot::SelfPaired,
                        MateValue::Loc(loc) => MateSlot::PartnerOf(loc),
                    }
                }
                _ => slot,
            }
        };
        next.insert(v, new_slot);
    }
    next
}

/// Component E: builds the frontier ZDD for an [`Instance`] and enumerates its
/// solutions as vertex-disjoint path packings.
pub struct Solver {
    target_vertices: HashSet<Location>,
    target_pairs: HashSet<UnorderedPair<Location>>,
    nodes: Vec<Node>,
}

impl Solver {
    /// Build the frontier ZDD for `instance`.
    pub fn new(instance: &Instance) -> Self {
        let graph = instance.make_graph();
        let targets = instance.targets();
        let edges: Vec<(Location, Location)> = graph.edges().iter().map(|p| (p.0, p.1)).collect();
        let vertices: Vec<Location> = graph.vertices().collect();

        let mut solver = Self {
            target_vertices: targets.vertices.clone(),
            target_pairs: targets.pairs.clone(),
            nodes: Vec::new(),
        };
        solver.build(&vertices, &edges);
        solver
    }

    fn build(&mut self, vertices: &[Location], edges: &[(Location, Location)]) {
        if edges.is_empty() {
            return;
        }

        let initial_mate: Mate = vertices.iter().map(|&v| (v, MateSlot::SelfPaired)).collect();
        self.nodes.push(Node {
            edge: edges[0],
            mate: initial_mate,
            zero: Child::TerminalZero,
            one: Child::TerminalZero,
        });

        let mut frontier = Frontier::new(vertices.iter().copied());
        let mut queue: Vec<(Location, Location)> = edges.to_vec();
        let mut current_level = vec![0usize];

        while !queue.is_empty() {
            let edge = queue.remove(0);
            let next_edge = queue.first().copied();

            let remaining_vertices: HashSet<Location> = queue.iter().flat_map(|&(a, b)| [a, b]).collect();
            for v in [edge.0, edge.1] {
                if !remaining_vertices.contains(&v) {
                    frontier.throw(v);
                }
            }

            let mut next_level = Vec::new();
            for &idx in &current_level {
                let zero = self.compute_zero_child(idx, &frontier, next_edge);
                let one = self.compute_one_child(idx, &frontier, edge, next_edge);

                if let Child::Node(i) = zero {
                    next_level.push(i);
                }
                if let Child::Node(i) = one {
                    next_level.push(i);
                }

                self.nodes[idx].zero = zero;
                self.nodes[idx].one = one;
            }

            current_level = next_level;
        }
    }

    fn push_child(&mut self, mate: Mate, next_edge: Option<(Location, Location)>) -> Child {
        match next_edge {
            None => Child::TerminalOne,
            Some(edge) => {
                let idx = self.nodes.len();
                self.nodes.push(Node {
                    edge,
                    mate,
                    zero: Child::TerminalZero,
                    one: Child::TerminalZero,
                });
                Child::Node(idx)
            }
        }
    }

    fn compute_zero_child(&mut self, idx: usize, frontier: &Frontier, next_edge: Option<(Location, Location)>) -> Child {
        let edge = self.nodes[idx].edge;
        let mate = &self.nodes[idx].mate;

        let incompatible = [edge.0, edge.1].into_iter().any(|v| {
            if frontier.is_active(v) {
                return false;
            }
            let slot = mate.get(&v).copied().unwrap_or(MateSlot::SelfPaired);
            slot == MateSlot::SelfPaired || (!self.target_vertices.contains(&v) && slot != MateSlot::Saturated)
        });

        if incompatible {
            return Child::TerminalZero;
        }

        let new_mate = restrict(mate, frontier);
        self.push_child(new_mate, next_edge)
    }

    fn compute_one_child(
        &mut self,
        idx: usize,
        frontier: &Frontier,
        edge: (Location, Location),
        next_edge: Option<(Location, Location)>,
    ) -> Child {
        let mate = self.nodes[idx].mate.clone();

        let slot_u = mate.get(&edge.0).copied().unwrap_or(MateSlot::SelfPaired);
        let slot_w = mate.get(&edge.1).copied().unwrap_or(MateSlot::SelfPaired);

        let value_u = slot_value(slot_u, edge.0);
        let value_w = slot_value(slot_w, edge.1);

        let thrown_or_target = |v: &MateValue| match v {
            MateValue::Zero => false,
            MateValue::Loc(l) => self.target_vertices.contains(l) || frontier.is_thrown(l),
        };

        let pair_is_bad = thrown_or_target(&value_u)
            && thrown_or_target(&value_w)
            && match (value_u, value_w) {
                (MateValue::Loc(a), MateValue::Loc(b)) if a != b => {
                    !self.target_pairs.contains(&UnorderedPair::from((a, b)))
                }
                _ => true,
            };

        let per_vertex_bad = |v: Location, slot: MateSlot| {
            let is_target = self.target_vertices.contains(&v);
            let touched = slot != MateSlot::SelfPaired;
            let mate_is_zero_or_opposite = match slot {
                MateSlot::Saturated => true,
                MateSlot::PartnerOf(p) => p == opposite(v, edge),
                MateSlot::SelfPaired => v == opposite(v, edge),
            };
            (is_target && touched) || mate_is_zero_or_opposite
        };

        if pair_is_bad || per_vertex_bad(edge.0, slot_u) || per_vertex_bad(edge.1, slot_w) {
            return Child::TerminalZero;
        }

        let updated = update_mate(&mate, edge);
        let new_mate = restrict(&updated, frontier);
        self.push_child(new_mate, next_edge)
    }

    /// Enumerate every solution: a vertex-disjoint set of edges connecting each
    /// target pair, expressed as a list of taken edges.
    pub fn solutions(&self) -> Solutions<'_> {
        let stack = if self.nodes.is_empty() {
            Vec::new()
        } else {
            vec![Cmd::Visit(Child::Node(0))]
        };
        Solutions {
            nodes: &self.nodes,
            stack,
            path: Vec::new(),
        }
    }
}

enum Cmd {
    Visit(Child),
    PushEdge((Location, Location)),
    PopEdge,
}

/// A lazy, depth-first walk of the frontier ZDD's accepting paths.
pub struct Solutions<'a> {
    nodes: &'a [Node],
    stack: Vec<Cmd>,
    path: Vec<(Location, Location)>,
}

impl<'a> Iterator for Solutions<'a> {
    type Item = Vec<(Location, Location)>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(cmd) = self.stack.pop() {
            match cmd {
                Cmd::PopEdge => {
                    self.path.pop();
                }
                Cmd::PushEdge(edge) => {
                    self.path.push(edge);
                }
                Cmd::Visit(Child::TerminalZero) => {}
                Cmd::Visit(Child::TerminalOne) => return Some(self.path.clone()),
                Cmd::Visit(Child::Node(idx)) => {
                    let node = &self.nodes[idx];
                    self.stack.push(Cmd::PopEdge);
                    self.stack.push(Cmd::Visit(node.one));
                    self.stack.push(Cmd::PushEdge(node.edge));
                    self.stack.push(Cmd::Visit(node.zero));
                }
            }
        }
        None
    }
}

/// Paint one solution's paths back onto a blank copy of `instance`'s field, giving
/// every cell on a path its path's number.
pub fn paint(instance: &Instance, solution: &[(Location, Location)]) -> HexField {
    let mut field = instance.field().blank_like();

    for pair in &instance.targets().pairs {
        let (start, goal) = (pair.0, pair.1);
        let number: CellValue = instance.field().get(start).expect("target cell is on the field");

        field.set(start, number).expect("target cell is on the field");
        let mut remaining: Vec<(Location, Location)> = solution.to_vec();
        let mut current = start;
        while current != goal {
            let pos = remaining
                .iter()
                .position(|&(a, b)| a == current || b == current)
                .expect("a solution connects every target pair");
            let (a, b) = remaining.remove(pos);
            let next = if a == current { b } else { a };
            field.set(next, number).expect("solution edges stay on the field");
            current = next;
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    // p, q, r, s stand in for the four vertices of a small diamond graph
    // (p-q, p-r, r-q, q-s), matching the fixture graph `update_mate` is tested
    // against upstream.
    const P: Location = Location(0, 0);
    const Q: Location = Location(0, 1);
    const R: Location = Location(1, 0);
    const S: Location = Location(1, 1);

    fn mate_of(pairs: &[(Location, MateSlot)]) -> Mate {
        pairs.iter().copied().collect()
    }

    #[test]
    fn update_mate_joins_two_untouched_vertices() {
        let mate = mate_of(&[
            (P, MateSlot::SelfPaired),
            (Q, MateSlot::SelfPaired),
            (R, MateSlot::SelfPaired),
            (S, MateSlot::SelfPaired),
        ]);
        let updated = update_mate(&mate, (P, Q));
        assert_eq!(updated.get(&P), Some(&MateSlot::PartnerOf(Q)));
        assert_eq!(updated.get(&Q), Some(&MateSlot::PartnerOf(P)));
        assert_eq!(updated.get(&R), Some(&MateSlot::SelfPaired));
        assert_eq!(updated.get(&S), Some(&MateSlot::SelfPaired));
    }

    #[test]
    fn update_mate_extends_a_partial_path_through_an_untouched_vertex() {
        let mate = mate_of(&[
            (P, MateSlot::PartnerOf(Q)),
            (Q, MateSlot::PartnerOf(P)),
            (R, MateSlot::SelfPaired),
            (S, MateSlot::SelfPaired),
        ]);
        let updated = update_mate(&mate, (P, R));
        assert_eq!(updated.get(&P), Some(&MateSlot::Saturated));
        assert_eq!(updated.get(&Q), Some(&MateSlot::PartnerOf(R)));
        assert_eq!(updated.get(&R), Some(&MateSlot::PartnerOf(Q)));
        assert_eq!(updated.get(&S), Some(&MateSlot::SelfPaired));
    }

    #[test]
    fn update_mate_closes_a_path_into_an_interior_vertex() {
        let mate = mate_of(&[(Q, MateSlot::PartnerOf(P)), (R, MateSlot::SelfPaired), (S, MateSlot::SelfPaired)]);
        let updated = update_mate(&mate, (R, Q));
        assert_eq!(updated.get(&Q), Some(&MateSlot::Saturated));
        assert_eq!(updated.get(&S), Some(&MateSlot::SelfPaired));
    }

    #[test]
    fn single_pair_on_smallest_board_has_a_solution() {
        let rows = raw(&[&["1", "0"], &["0", "1", "0"], &["0", "0"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solutions: Vec<_> = solver.solutions().collect();
        assert!(!solutions.is_empty());
    }

    #[test]
    fn every_solution_respects_target_degree() {
        let rows = raw(&[&["1", "0"], &["0", "1", "0"], &["0", "0"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);

        for solution in solver.solutions() {
            let mut degree: std::collections::HashMap<Location, usize> = std::collections::HashMap::new();
            for &(a, b) in &solution {
                *degree.entry(a).or_insert(0) += 1;
                *degree.entry(b).or_insert(0) += 1;
            }
            for &target in &instance.targets().vertices {
                assert_eq!(degree.get(&target).copied().unwrap_or(0), 1, "target {target:?} not degree 1 in {solution:?}");
            }
            for (&vertex, &d) in &degree {
                if !instance.targets().vertices.contains(&vertex) {
                    assert_eq!(d, 2, "interior vertex {vertex:?} not degree 2 in {solution:?}");
                }
            }
        }
    }

    #[test]
    fn painting_labels_every_cell_on_the_path() {
        let rows = raw(&[&["1", "0"], &["0", "1", "0"], &["0", "0"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solution = solver.solutions().next().expect("has a solution");
        let painted = paint(&instance, &solution);
        assert_eq!(painted.get(Location(0, 0)), Ok(1));
        assert_eq!(painted.get(Location(1, 1)), Ok(1));
    }

    #[test]
    fn painting_labels_interior_cells_across_multiple_paths() {
        let rows = raw(&[&["1", "0"], &["0", "2", "1"], &["0", "2"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solution = solver.solutions().next().expect("has a solution");
        let painted = paint(&instance, &solution);

        assert_eq!(painted.get(Location(0, 0)), Ok(1));
        assert_eq!(painted.get(Location(0, 1)), Ok(1));
        assert_eq!(painted.get(Location(1, 2)), Ok(1));

        assert_eq!(painted.get(Location(1, 1)), Ok(2));
        assert_eq!(painted.get(Location(1, 0)), Ok(2));
        assert_eq!(painted.get(Location(2, 0)), Ok(2));
        assert_eq!(painted.get(Location(2, 1)), Ok(2));
    }

    fn edge_set(solution: &[(Location, Location)]) -> HashSet<UnorderedPair<Location>> {
        solution.iter().map(|&(a, b)| UnorderedPair::from((a, b))).collect()
    }

    #[test]
    fn exactly_one_solution_on_a_forced_board() {
        let rows = raw(&[&["1", "0"], &["0", "2", "1"], &["0", "2"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solutions: Vec<_> = solver.solutions().collect();
        assert_eq!(solutions.len(), 1);

        let expected: HashSet<UnorderedPair<Location>> = [
            (Location(0, 0), Location(0, 1)),
            (Location(0, 1), Location(1, 2)),
            (Location(1, 0), Location(1, 1)),
            (Location(1, 0), Location(2, 0)),
            (Location(2, 0), Location(2, 1)),
        ]
        .into_iter()
        .map(UnorderedPair::from)
        .collect();
        assert_eq!(edge_set(&solutions[0]), expected);
    }

    #[test]
    fn exactly_four_solutions_on_an_ambiguous_board() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["1", "2"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solutions: Vec<_> = solver.solutions().collect();
        assert_eq!(solutions.len(), 4);

        let mut seen = HashSet::new();
        for solution in &solutions {
            assert!(seen.insert(edge_set(solution)), "duplicate solution {solution:?}");
        }
    }

    #[test]
    fn no_solutions_when_pairs_would_force_a_crossing() {
        let rows = raw(&[&["1", "2"], &["0", "0", "0"], &["2", "1"]]);
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        assert_eq!(solver.solutions().count(), 0);
    }
}
