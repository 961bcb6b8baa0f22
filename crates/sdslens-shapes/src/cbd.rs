//! Concise bounded description.

use crate::graph::QuadSet;
use ahash::AHashSet;
use sdslens_model::{Quad, Term};
use std::collections::VecDeque;

/// Every quad whose subject is `focus`, followed transitively through
/// blank-node objects.
///
/// Quads come out breadth-first: the focus node's own quads in input order,
/// then the quads of each blank node in the order it was reached. Each blank
/// node is expanded once, so cyclic blank-node structures terminate.
pub fn concise_bounded_description(focus: &Term, graph: &QuadSet) -> Vec<Quad> {
    let mut out = Vec::new();
    if matches!(focus, Term::Literal(_)) {
        return out;
    }

    let mut visited: AHashSet<&Term> = AHashSet::new();
    let mut queue: VecDeque<&Term> = VecDeque::new();
    visited.insert(focus);
    queue.push_back(focus);

    while let Some(node) = queue.pop_front() {
        for quad in graph.outgoing(node) {
            out.push(quad.clone());
            if quad.object.is_blank_node() && visited.insert(&quad.object) {
                queue.push_back(&quad.object);
            }
        }
    }
    out
}
