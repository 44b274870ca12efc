//! Component E's data model: frontier ZDD nodes and the mate function they carry.

use std::collections::HashMap;

use crate::location::Location;

/// What a frontier vertex's mate function currently says about it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MateSlot {
    /// Untouched: no taken edge has reached this vertex yet.
    SelfPaired,
    /// Saturated: this vertex's required degree in the solution has already been met.
    Saturated,
    /// The open end of a partial path, whose other open end is the given vertex.
    PartnerOf(Location),
}

/// The mate value a slot resolves to, for membership tests against target pairs.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum MateValue {
    /// Saturated (`0` in the original mate-function encoding).
    Zero,
    /// Resolves to a concrete vertex (itself, if untouched; its partner, otherwise).
    Loc(Location),
}

pub(crate) fn slot_value(slot: MateSlot, at: Location) -> MateValue {
    match slot {
        MateSlot::SelfPaired => MateValue::Loc(at),
        MateSlot::PartnerOf(partner) => MateValue::Loc(partner),
        MateSlot::Saturated => MateValue::Zero,
    }
}

/// The mate function, restricted to the currently active frontier.
pub(crate) type Mate = HashMap<Location, MateSlot>;

/// A reference to one of a node's two children: a terminal, or another node in the
/// arena addressed by its index.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Child {
    /// The infeasible terminal: no assignment below here extends to a solution.
    TerminalZero,
    /// The accepting terminal: every edge decision made on the path here is a solution.
    TerminalOne,
    /// Another node, by its index in the arena.
    Node(usize),
}

/// One node of the frontier ZDD, labelled by the edge it branches on.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// The edge this node decides whether to take.
    pub(crate) edge: (Location, Location),
    /// The mate function as of this node, over the frontier active when it was built.
    pub(crate) mate: Mate,
    /// The child reached by excluding `edge`.
    pub(crate) zero: Child,
    /// The child reached by including `edge`.
    pub(crate) one: Child,
}
