#![warn(missing_docs)]

//! # `hexlink`
//!
//! A solver and generator for the zero-slither variant of
//! [Numberlink](https://en.wikipedia.org/wiki/Numberlink) played on a hexagonal,
//! ziggurat-shaped board: rows grow by one cell down to an equator row, then shrink
//! back by one cell per row. Begin with an [`Instance`], built from a textual field
//! via [`Instance::parse`] or produced at random by [`Generator`]. Hand it to
//! [`Solver::new`] to enumerate every solution, or to [`render`] to print one.
//!
//! # Internals
//! Unlike a SAT-encoded solver, this crate builds a frontier-based Zero-Suppressed
//! Decision Diagram (the "Simpath" algorithm of Kawahara et al.) directly over the
//! board's edges in a fixed canonical order. Each node in the diagram tracks a
//! "mate" function over the current frontier of vertices: whether a frontier vertex
//! is untouched, saturated (done), or paired with another live frontier vertex as
//! the open end of a partial path. Walking the diagram's one-edges from root to a
//! `1`-terminal reconstructs one path packing that connects every numbered pair
//! exactly once and touches no cell twice — a solved board.
//!
//! The diagram here is a tree, not a reduced DAG: nodes are never merged by
//! equivalent mate, since the number of instances this crate solves in one run
//! does not justify the equivalence bookkeeping a full ZDD reduction would need.

pub use error::HexlinkError;
pub use generator::{generate_field, Generator};
pub use graph::{Graph, GraphBuilder};
pub use hex_field::{CellValue, HexField, CELL_EMPTY};
pub use instance::{Instance, Targets};
pub use location::Location;
pub use solver::{Solutions, Solver};

pub mod direction;
pub mod error;
pub mod generator;
pub mod graph;
pub mod hex_field;
pub mod instance;
pub mod location;
pub mod render;
pub mod solver;
pub(crate) mod zdd;
