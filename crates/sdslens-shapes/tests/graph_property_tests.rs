//! Property tests for partitioning and path resolution.

use proptest::prelude::*;
use sdslens_model::{Quad, Term, Vocabulary};
use sdslens_shapes::{partition, PartitionMarkers, PathExpr, PathStep, QuadSet, TermSet};

fn node() -> impl Strategy<Value = Term> {
    prop_oneof![
        (0u8..6).prop_map(|i| Term::iri(format!("http://example.org/n{i}"))),
        (0u8..3).prop_map(|i| Term::blank(format!("b{i}"))),
    ]
}

fn predicate() -> impl Strategy<Value = Term> {
    (0u8..3).prop_map(|i| Term::iri(format!("http://example.org/p{i}")))
}

fn object() -> impl Strategy<Value = Term> {
    prop_oneof![node(), "[a-z]{0,4}".prop_map(Term::literal)]
}

fn graph_name() -> impl Strategy<Value = Option<Term>> {
    let vocab = Vocabulary::default();
    prop_oneof![
        Just(None),
        Just(Some(vocab.addition_graph())),
        Just(Some(vocab.removal_graph())),
        Just(Some(Term::iri("http://example.org/other-graph"))),
    ]
}

fn quad() -> impl Strategy<Value = Quad> {
    (node(), predicate(), object(), graph_name()).prop_map(|(s, p, o, g)| Quad {
        subject: s,
        predicate: p,
        object: o,
        graph: g,
    })
}

fn sorted(mut quads: Vec<Quad>) -> Vec<String> {
    let mut lines: Vec<String> = quads.drain(..).map(|q| q.to_string()).collect();
    lines.sort();
    lines
}

fn sorted_terms(set: &TermSet) -> Vec<String> {
    let mut v: Vec<String> = set.iter().map(Term::to_string).collect();
    v.sort();
    v
}

proptest! {
    #[test]
    fn partitions_are_disjoint_and_cover_the_input(quads in prop::collection::vec(quad(), 0..40)) {
        let markers = PartitionMarkers::default();
        let parts = partition(quads.clone(), &markers);

        prop_assert_eq!(parts.len(), quads.len());
        let mut union = parts.data.quads().to_vec();
        union.extend_from_slice(parts.addition.quads());
        union.extend_from_slice(parts.removal.quads());
        prop_assert_eq!(sorted(union), sorted(quads));

        let addition_only = parts.addition.iter().all(|q| q.graph == Some(markers.addition.clone()));
        let removal_only = parts.removal.iter().all(|q| q.graph == Some(markers.removal.clone()));
        let data_unmarked = parts.data.iter().all(|q| {
            q.graph != Some(markers.addition.clone()) && q.graph != Some(markers.removal.clone())
        });
        prop_assert!(addition_only);
        prop_assert!(removal_only);
        prop_assert!(data_unmarked);
    }

    #[test]
    fn identity_path_returns_its_start(
        quads in prop::collection::vec(quad(), 0..30),
        start in prop::collection::vec(node(), 0..5),
    ) {
        let graph = QuadSet::from(quads);
        let start: TermSet = start.into_iter().collect();
        prop_assert_eq!(PathExpr::Identity.resolve(&start, &graph), start);
    }

    #[test]
    fn inverse_undoes_forward_on_reached_nodes(
        quads in prop::collection::vec(quad(), 0..30),
        s in node(),
        p in predicate(),
    ) {
        let graph = QuadSet::from(quads);
        let forward = PathExpr::Forward(p.clone()).resolve_from(&s, &graph);
        for o in forward.iter() {
            let back = PathExpr::Inverse(p.clone()).resolve_from(o, &graph);
            prop_assert!(back.contains(&s));
        }
    }

    #[test]
    fn sequence_equals_stepwise_resolution(
        quads in prop::collection::vec(quad(), 0..30),
        s in node(),
        p in predicate(),
        q in predicate(),
    ) {
        let graph = QuadSet::from(quads);
        let seq = PathExpr::Sequence(vec![PathStep::Forward(p.clone()), PathStep::Inverse(q.clone())]);
        let first = PathExpr::Forward(p).resolve_from(&s, &graph);
        let stepwise = PathExpr::Inverse(q).resolve(&first, &graph);
        prop_assert_eq!(sorted_terms(&seq.resolve_from(&s, &graph)), sorted_terms(&stepwise));
    }
}
