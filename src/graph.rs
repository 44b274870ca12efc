//! Component B: the undirected graph induced by a [`HexField`].

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::hex_field::HexField;
use crate::location::Location;

/// The graph induced by a field's cells and their hex adjacencies. [`Self::edges`]'s
/// order is load-bearing: the solver's frontier construction walks it in this order
/// and correctness depends on it matching the canonical order [`GraphBuilder`] builds.
pub struct Graph {
    graph: UnGraphMap<Location, Direction>,
    edges: Vec<UnorderedPair<Location>>,
}

impl Graph {
    /// Every vertex (cell) in the graph.
    pub fn vertices(&self) -> impl Iterator<Item = Location> + '_ {
        self.graph.nodes()
    }

    /// The edge list in canonical order: rows top to bottom, cells left to right,
    /// and from each cell east, then south, then the south diagonal — filtered to
    /// valid endpoints and de-duplicated.
    pub fn edges(&self) -> &[UnorderedPair<Location>] {
        &self.edges
    }

    /// Whether `a` and `b` are adjacent.
    pub fn contains_edge(&self, a: Location, b: Location) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// The number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }
}

/// Builds a [`Graph`] from a [`HexField`].
pub struct GraphBuilder;

impl GraphBuilder {
    /// Derive the graph, in canonical edge order.
    pub fn build(field: &HexField) -> Graph {
        let mut graph = UnGraphMap::new();
        for v in field.cells() {
            graph.add_node(v);
        }

        let middle = field.side() / 2;
        let mut edges = Vec::new();
        let mut seen = HashSet::new();

        for (cell, &direction) in field.cells().cartesian_product(Direction::FORWARD.iter()) {
            let relative = cell.level().cmp(&middle);
            let other = direction.attempt_from(cell, relative);
            if !field.is_valid(other) {
                continue;
            }
            let pair = UnorderedPair::from((cell, other));
            if seen.insert(pair) {
                graph.add_edge(cell, other, direction);
                edges.push(pair);
            }
        }

        Graph { graph, edges }
    }
}
