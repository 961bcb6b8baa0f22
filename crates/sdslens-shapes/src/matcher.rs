//! Subject discovery by triple pattern.

use crate::graph::{QuadSet, TermSet};
use sdslens_model::{Quad, Term};

/// A triple template; `None` slots match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn new(subject: Option<Term>, predicate: Option<Term>, object: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// `(?, predicate, ?)`
    pub fn with_predicate(predicate: Term) -> Self {
        Self::new(None, Some(predicate), None)
    }

    /// `(?, rdf:type, class)` style templates.
    pub fn with_predicate_object(predicate: Term, object: Term) -> Self {
        Self::new(None, Some(predicate), Some(object))
    }

    pub fn matches(&self, quad: &Quad) -> bool {
        slot_matches(&self.subject, &quad.subject)
            && slot_matches(&self.predicate, &quad.predicate)
            && slot_matches(&self.object, &quad.object)
    }

    /// Distinct subjects of matching quads, first-seen order. No match is an
    /// empty set, not an error.
    pub fn match_subjects(&self, graph: &QuadSet) -> TermSet {
        let candidates: Box<dyn Iterator<Item = &Quad> + '_> = match (&self.subject, &self.object) {
            (Some(s), _) => Box::new(graph.outgoing(s)),
            (None, Some(o)) => Box::new(graph.incoming(o)),
            (None, None) => Box::new(graph.iter()),
        };
        candidates
            .filter(|q| self.matches(q))
            .map(|q| q.subject.clone())
            .collect()
    }
}

fn slot_matches(slot: &Option<Term>, term: &Term) -> bool {
    slot.as_ref().map_or(true, |want| want == term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://ex/{s}"))
    }

    fn graph() -> QuadSet {
        vec![
            Quad::triple(iri("b2"), iri("type"), iri("Bucket")),
            Quad::triple(iri("b1"), iri("type"), iri("Bucket")),
            Quad::triple(iri("b1"), iri("stream"), Term::literal("s1")),
            Quad::triple(iri("b2"), iri("type"), iri("Bucket")),
            Quad::triple(iri("r1"), iri("type"), iri("Relation")),
        ]
        .into()
    }

    #[test]
    fn finds_distinct_subjects_in_first_seen_order() {
        let pattern = TriplePattern::with_predicate_object(iri("type"), iri("Bucket"));
        let subjects = pattern.match_subjects(&graph());
        assert_eq!(subjects.as_slice(), &[iri("b2"), iri("b1")]);
    }

    #[test]
    fn wildcard_pattern_returns_every_subject() {
        let subjects = TriplePattern::default().match_subjects(&graph());
        assert_eq!(subjects.len(), 3);
    }

    #[test]
    fn bound_subject_narrows_matches() {
        let pattern = TriplePattern::new(Some(iri("b1")), Some(iri("stream")), None);
        assert_eq!(pattern.match_subjects(&graph()).as_slice(), &[iri("b1")]);
    }

    #[test]
    fn no_match_is_empty() {
        let pattern = TriplePattern::with_predicate(iri("payload"));
        assert!(pattern.match_subjects(&graph()).is_empty());
    }
}
