//! Vocabulary constants and the reserved marker terms.

use crate::term::Term;
use serde::{Deserialize, Serialize};

pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    /// Not a real XSD datatype; shape documents use it for "keep the raw term".
    pub const ANY: &str = "http://www.w3.org/2001/XMLSchema#any";
}

pub mod sh {
    pub const NS: &str = "http://www.w3.org/ns/shacl#";
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    pub const NAME: &str = "http://www.w3.org/ns/shacl#name";
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    pub const INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
}

/// rdf-lens ontology terms.
pub mod rdfl {
    pub const NS: &str = "https://w3id.org/rdf-lens/ontology#";
    /// Concise bounded description: `sh:class rdfl:CBD` captures a subgraph.
    pub const CBD: &str = "https://w3id.org/rdf-lens/ontology#CBD";
}

pub mod sds {
    pub const NS: &str = "https://w3id.org/sds#";
    pub const STREAM: &str = "https://w3id.org/sds#stream";
    pub const PAYLOAD: &str = "https://w3id.org/sds#payload";
    pub const BUCKET: &str = "https://w3id.org/sds#bucket";
    pub const DATALESS: &str = "https://w3id.org/sds#dataless";
    pub const IMMUTABLE: &str = "https://w3id.org/sds#immutable";
    pub const IS_ROOT: &str = "https://w3id.org/sds#isRoot";
    pub const EMPTY: &str = "https://w3id.org/sds#empty";
    pub const RELATION: &str = "https://w3id.org/sds#relation";
    pub const RELATION_TYPE: &str = "https://w3id.org/sds#relationType";
    pub const RELATION_BUCKET: &str = "https://w3id.org/sds#relationBucket";
    pub const RELATION_PATH: &str = "https://w3id.org/sds#relationPath";
    pub const RELATION_VALUE: &str = "https://w3id.org/sds#relationValue";
    pub const BUCKET_TYPE: &str = "https://w3id.org/sds#Bucket";
    pub const RELATION_CLASS: &str = "https://w3id.org/sds#Relation";
    pub const DATA_DESCRIPTION: &str = "https://w3id.org/sds#DataDescription";
    pub const REMOVE_DATA_DESCRIPTION: &str = "https://w3id.org/sds#RemoveDataDescription";
}

pub mod tree {
    pub const NS: &str = "https://w3id.org/tree#";
}

/// Local name of an IRI: the text after the last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Reserved marker terms the decoders key on.
///
/// Loaded once (defaults or a JSON override) and never re-read per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Graph name of the "data description" (additions) partition.
    pub addition_graph: String,
    /// Graph name of the "remove data description" partition.
    pub removal_graph: String,
    /// Predicate whose subjects are records.
    pub payload_predicate: String,
    pub type_predicate: String,
    pub bucket_type: String,
    pub relation_type: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            addition_graph: sds::DATA_DESCRIPTION.to_string(),
            removal_graph: sds::REMOVE_DATA_DESCRIPTION.to_string(),
            payload_predicate: sds::PAYLOAD.to_string(),
            type_predicate: rdf::TYPE.to_string(),
            bucket_type: sds::BUCKET_TYPE.to_string(),
            relation_type: sds::RELATION_CLASS.to_string(),
        }
    }
}

impl Vocabulary {
    pub fn addition_graph(&self) -> Term {
        Term::iri(&self.addition_graph)
    }

    pub fn removal_graph(&self) -> Term {
        Term::iri(&self.removal_graph)
    }

    pub fn payload_predicate(&self) -> Term {
        Term::iri(&self.payload_predicate)
    }

    pub fn type_predicate(&self) -> Term {
        Term::iri(&self.type_predicate)
    }

    pub fn bucket_type(&self) -> Term {
        Term::iri(&self.bucket_type)
    }

    pub fn relation_type(&self) -> Term {
        Term::iri(&self.relation_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_splits_on_hash_and_slash() {
        assert_eq!(local_name("https://w3id.org/sds#Bucket"), "Bucket");
        assert_eq!(local_name("http://example.org/shapes/Record"), "Record");
        assert_eq!(local_name("Record"), "Record");
    }

    #[test]
    fn partial_json_override_keeps_defaults() {
        let vocab: Vocabulary =
            serde_json::from_str(r#"{"payload_predicate": "http://ex/payload"}"#).unwrap();
        assert_eq!(vocab.payload_predicate, "http://ex/payload");
        assert_eq!(vocab.addition_graph, sds::DATA_DESCRIPTION);
        assert_eq!(vocab.bucket_type(), Term::iri(sds::BUCKET_TYPE));
    }
}
