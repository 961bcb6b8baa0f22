use proptest::prelude::*;
use sdslens_model::{Quad, Term};

fn iri() -> impl Strategy<Value = String> {
    proptest::string::string_regex("http://example\\.org/[a-z]{1,8}(#[A-Za-z]{1,6})?").unwrap()
}

fn term() -> impl Strategy<Value = Term> {
    prop_oneof![
        iri().prop_map(Term::iri),
        proptest::string::string_regex("[a-z][a-z0-9]{0,6}")
            .unwrap()
            .prop_map(Term::blank),
        // Arbitrary text including quotes, backslashes and newlines.
        any::<String>().prop_map(Term::literal),
        (any::<String>(), "[a-z]{2}").prop_map(|(s, lang)| Term::lang_literal(s, lang)),
        (any::<i64>()).prop_map(Term::integer),
        any::<bool>().prop_map(Term::boolean),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn display_form_parses_back(t in term()) {
        let text = t.to_string();
        let parsed = Term::parse_display(&text).expect("parse display form");
        prop_assert_eq!(parsed, t);
    }
}

#[test]
fn quads_serialize_to_tagged_json() {
    let q = Quad::triple(
        Term::iri("http://example.org/s"),
        Term::iri("http://example.org/p"),
        Term::literal("o"),
    );
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["subject"]["kind"], "iri");
    assert_eq!(json["object"]["value"]["lexical"], "o");
    assert!(json.get("graph").is_none());

    let back: Quad = serde_json::from_value(json).unwrap();
    assert_eq!(back, q);
}
