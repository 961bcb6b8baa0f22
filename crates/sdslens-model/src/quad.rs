use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject/predicate/object statement with an optional graph name.
///
/// `graph == None` is the default graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Term>,
}

impl Quad {
    pub fn new(subject: Term, predicate: Term, object: Term, graph: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// A statement in the default graph.
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Self::new(subject, predicate, object, None)
    }

    pub fn in_graph(subject: Term, predicate: Term, object: Term, graph: Term) -> Self {
        Self::new(subject, predicate, object, Some(graph))
    }

    pub fn is_in_graph(&self, graph: &Term) -> bool {
        self.graph.as_ref() == Some(graph)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(g) = &self.graph {
            write!(f, " {g}")?;
        }
        write!(f, " .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_nquads_line() {
        let q = Quad::in_graph(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Term::literal("o"),
            Term::iri("http://ex/g"),
        );
        assert_eq!(q.to_string(), "<http://ex/s> <http://ex/p> \"o\" <http://ex/g> .");

        let t = Quad::triple(Term::blank("b"), Term::iri("http://ex/p"), Term::blank("c"));
        assert_eq!(t.to_string(), "_:b <http://ex/p> _:c .");
        assert!(!t.is_in_graph(&Term::iri("http://ex/g")));
    }
}
