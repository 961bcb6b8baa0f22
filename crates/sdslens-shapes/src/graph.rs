//! Indexed, read-only quad collections.

use ahash::{AHashMap, AHashSet};
use sdslens_model::{Quad, Term};

// ============================================================================
// Term set (insertion ordered)
// ============================================================================

/// A set of terms that remembers first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    items: Vec<Term>,
    seen: AHashSet<Term>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(term: Term) -> Self {
        let mut set = Self::new();
        set.insert(term);
        set
    }

    /// Insert `term`; returns `false` when it was already present.
    pub fn insert(&mut self, term: Term) -> bool {
        if self.seen.contains(&term) {
            return false;
        }
        self.seen.insert(term.clone());
        self.items.push(term);
        true
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.seen.contains(term)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Term] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Term> {
        self.items
    }
}

impl PartialEq for TermSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for TermSet {}

impl FromIterator<Term> for TermSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut set = Self::new();
        for term in iter {
            set.insert(term);
        }
        set
    }
}

impl IntoIterator for TermSet {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Quad set
// ============================================================================

/// Quads in input order with subject and object indexes.
///
/// Index lists hold positions into `quads`, so every lookup yields quads in
/// input order.
#[derive(Debug, Clone, Default)]
pub struct QuadSet {
    quads: Vec<Quad>,
    by_subject: AHashMap<Term, Vec<usize>>,
    by_object: AHashMap<Term, Vec<usize>>,
}

impl QuadSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, quad: Quad) {
        let idx = self.quads.len();
        self.by_subject
            .entry(quad.subject.clone())
            .or_default()
            .push(idx);
        self.by_object.entry(quad.object.clone()).or_default().push(idx);
        self.quads.push(quad);
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quad> {
        self.quads.iter()
    }

    pub fn into_quads(self) -> Vec<Quad> {
        self.quads
    }

    /// Quads whose subject is `subject`.
    pub fn outgoing<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a Quad> + 'a {
        self.by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.quads[i])
    }

    /// Quads whose object is `object`.
    pub fn incoming<'a>(&'a self, object: &Term) -> impl Iterator<Item = &'a Quad> + 'a {
        self.by_object
            .get(object)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.quads[i])
    }

    /// Objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(
        &'a self,
        subject: &Term,
        predicate: &'a Term,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.outgoing(subject)
            .filter(move |q| &q.predicate == predicate)
            .map(|q| &q.object)
    }

    /// Objects of `(subject, <predicate_iri>, ?)`.
    pub fn objects_iri<'a>(
        &'a self,
        subject: &Term,
        predicate_iri: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.outgoing(subject)
            .filter(move |q| q.predicate.is_iri(predicate_iri))
            .map(|q| &q.object)
    }

    /// Subjects of `(?, predicate, object)`.
    pub fn subjects<'a>(
        &'a self,
        predicate: &'a Term,
        object: &Term,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.incoming(object)
            .filter(move |q| &q.predicate == predicate)
            .map(|q| &q.subject)
    }
}

impl FromIterator<Quad> for QuadSet {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        let mut set = Self::new();
        for quad in iter {
            set.push(quad);
        }
        set
    }
}

impl From<Vec<Quad>> for QuadSet {
    fn from(quads: Vec<Quad>) -> Self {
        quads.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://ex/{s}"))
    }

    #[test]
    fn term_set_keeps_first_seen_order() {
        let set: TermSet = [iri("b"), iri("a"), iri("b"), iri("c")].into_iter().collect();
        assert_eq!(set.as_slice(), &[iri("b"), iri("a"), iri("c")]);
        assert!(set.contains(&iri("a")));
        assert!(!set.contains(&iri("z")));
    }

    #[test]
    fn lookups_follow_input_order() {
        let p = iri("p");
        let set: QuadSet = vec![
            Quad::triple(iri("s"), p.clone(), iri("o2")),
            Quad::triple(iri("x"), p.clone(), iri("o1")),
            Quad::triple(iri("s"), iri("q"), iri("o1")),
            Quad::triple(iri("s"), p.clone(), iri("o1")),
        ]
        .into();

        let objs: Vec<&Term> = set.objects(&iri("s"), &p).collect();
        assert_eq!(objs, vec![&iri("o2"), &iri("o1")]);

        let subs: Vec<&Term> = set.subjects(&p, &iri("o1")).collect();
        assert_eq!(subs, vec![&iri("x"), &iri("s")]);

        assert_eq!(set.outgoing(&iri("missing")).count(), 0);
        assert_eq!(set.objects_iri(&iri("s"), "http://ex/q").count(), 1);
    }
}
