//! Path expressions and their evaluation over a [`QuadSet`].
//!
//! The closed set of forms:
//!
//! - `Identity`: length 0, yields the start terms.
//! - `Forward(p)`: objects of `(s, p, ?)` for every start `s`.
//! - `Inverse(p)`: subjects of `(?, p, o)` for every start `o`.
//! - `Sequence(steps)`: left-to-right fold; an empty intermediate set makes
//!   every later step empty.
//!
//! Results are [`TermSet`]s in discovery order: start terms in order, and for
//! each start term its matching quads in input order.

use crate::graph::{QuadSet, TermSet};
use sdslens_model::Term;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Forward(Term),
    Inverse(Term),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathExpr {
    Identity,
    Forward(Term),
    Inverse(Term),
    Sequence(Vec<PathStep>),
}

impl PathStep {
    pub fn apply(&self, start: &TermSet, graph: &QuadSet) -> TermSet {
        let mut out = TermSet::new();
        match self {
            PathStep::Forward(p) => {
                for s in start {
                    for o in graph.objects(s, p) {
                        out.insert(o.clone());
                    }
                }
            }
            PathStep::Inverse(p) => {
                for o in start {
                    for s in graph.subjects(p, o) {
                        out.insert(s.clone());
                    }
                }
            }
        }
        out
    }

    pub fn predicate(&self) -> &Term {
        match self {
            PathStep::Forward(p) | PathStep::Inverse(p) => p,
        }
    }
}

impl PathExpr {
    /// Build the canonical form of a step list: no steps is `Identity`, a single
    /// step is `Forward`/`Inverse`.
    pub fn from_steps(mut steps: Vec<PathStep>) -> Self {
        match steps.len() {
            0 => PathExpr::Identity,
            1 => match steps.remove(0) {
                PathStep::Forward(p) => PathExpr::Forward(p),
                PathStep::Inverse(p) => PathExpr::Inverse(p),
            },
            _ => PathExpr::Sequence(steps),
        }
    }

    /// The expression as an explicit step list (empty for `Identity`).
    pub fn steps(&self) -> Vec<PathStep> {
        match self {
            PathExpr::Identity => Vec::new(),
            PathExpr::Forward(p) => vec![PathStep::Forward(p.clone())],
            PathExpr::Inverse(p) => vec![PathStep::Inverse(p.clone())],
            PathExpr::Sequence(steps) => steps.clone(),
        }
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        match self {
            PathExpr::Identity => 0,
            PathExpr::Forward(_) | PathExpr::Inverse(_) => 1,
            PathExpr::Sequence(steps) => steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate two paths (`self` then `next`).
    pub fn then(&self, next: &PathExpr) -> PathExpr {
        let mut steps = self.steps();
        steps.extend(next.steps());
        PathExpr::from_steps(steps)
    }

    /// Terms reached from `start`, in first-reached order. Duplicate values
    /// collapse: a term reached through repeated quads appears once.
    pub fn resolve(&self, start: &TermSet, graph: &QuadSet) -> TermSet {
        match self {
            PathExpr::Identity => start.clone(),
            PathExpr::Forward(p) => PathStep::Forward(p.clone()).apply(start, graph),
            PathExpr::Inverse(p) => PathStep::Inverse(p.clone()).apply(start, graph),
            PathExpr::Sequence(steps) => {
                let mut current = start.clone();
                for step in steps {
                    if current.is_empty() {
                        break;
                    }
                    current = step.apply(&current, graph);
                }
                current
            }
        }
    }

    pub fn resolve_from(&self, start: &Term, graph: &QuadSet) -> TermSet {
        self.resolve(&TermSet::singleton(start.clone()), graph)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Forward(p) => write!(f, "{p}"),
            PathStep::Inverse(p) => write!(f, "^{p}"),
        }
    }
}

/// SPARQL property-path notation; `Identity` prints as `()`.
impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathExpr::Identity => f.write_str("()"),
            PathExpr::Forward(p) => write!(f, "{p}"),
            PathExpr::Inverse(p) => write!(f, "^{p}"),
            PathExpr::Sequence(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    write!(f, "{step}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdslens_model::Quad;

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://ex/{s}"))
    }

    fn graph() -> QuadSet {
        vec![
            Quad::triple(iri("origin"), iri("relation"), iri("r1")),
            Quad::triple(iri("origin"), iri("stream"), Term::literal("s1")),
            Quad::triple(iri("other"), iri("relation"), iri("r1")),
            Quad::triple(iri("r1"), iri("bucket"), Term::literal("b2")),
        ]
        .into()
    }

    #[test]
    fn repeated_values_collapse() {
        let g: QuadSet = vec![
            Quad::triple(iri("rec"), iri("bucket"), Term::literal("b1")),
            Quad::triple(iri("rec"), iri("bucket"), Term::literal("b2")),
            Quad::triple(iri("rec"), iri("bucket"), Term::literal("b1")),
        ]
        .into();
        let reached = PathExpr::Forward(iri("bucket")).resolve_from(&iri("rec"), &g);
        let values: Vec<&Term> = reached.iter().collect();
        assert_eq!(values, vec![&Term::literal("b1"), &Term::literal("b2")]);
    }

    #[test]
    fn identity_returns_start() {
        let start: TermSet = [iri("a"), iri("b")].into_iter().collect();
        assert_eq!(PathExpr::Identity.resolve(&start, &graph()), start);
    }

    #[test]
    fn inverse_walks_back_to_referrers() {
        let got = PathExpr::Inverse(iri("relation")).resolve_from(&iri("r1"), &graph());
        assert_eq!(got.as_slice(), &[iri("origin"), iri("other")]);
    }

    #[test]
    fn sequence_threads_through_steps() {
        let path = PathExpr::Sequence(vec![
            PathStep::Inverse(iri("relation")),
            PathStep::Forward(iri("stream")),
        ]);
        let got = path.resolve_from(&iri("r1"), &graph());
        assert_eq!(got.as_slice(), &[Term::literal("s1")]);
    }

    #[test]
    fn empty_intermediate_short_circuits() {
        let path = PathExpr::Sequence(vec![
            PathStep::Forward(iri("missing")),
            PathStep::Forward(iri("stream")),
        ]);
        assert!(path.resolve_from(&iri("origin"), &graph()).is_empty());
    }

    #[test]
    fn from_steps_canonicalizes() {
        assert_eq!(PathExpr::from_steps(Vec::new()), PathExpr::Identity);
        assert_eq!(
            PathExpr::from_steps(vec![PathStep::Inverse(iri("p"))]),
            PathExpr::Inverse(iri("p"))
        );
        let seq = PathExpr::Forward(iri("a")).then(&PathExpr::Inverse(iri("b")));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.to_string(), "<http://ex/a>/^<http://ex/b>");
        assert_eq!(PathExpr::Identity.then(&PathExpr::Identity), PathExpr::Identity);
    }
}
