//! Built-in shape document for SDS descriptions.

/// Shape names (local names of the target classes below).
pub const RECORD: &str = "Record";
pub const BUCKET: &str = "Bucket";
pub const RELATION: &str = "Relation";
pub const THING: &str = "RdfThing";

/// Shapes every extractor needs, whatever document it was configured with.
pub const REQUIRED_SHAPES: [&str; 4] = [RECORD, BUCKET, RELATION, THING];

/// Turtle shape document describing records, buckets, relations and
/// captured graph fragments.
pub const SHAPES: &str = r#"
@prefix rdfl: <https://w3id.org/rdf-lens/ontology#>.
@prefix xsd: <http://www.w3.org/2001/XMLSchema#>.
@prefix sh: <http://www.w3.org/ns/shacl#>.
@prefix sds: <https://w3id.org/sds#>.
@prefix lens: <https://w3id.org/sdslens/shapes#>.

[ ] a sh:NodeShape;
  sh:targetClass lens:Record;
  sh:property [
    sh:name "stream";
    sh:path sds:stream;
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "payload";
    sh:path sds:payload;
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "buckets";
    sh:path sds:bucket;
    sh:datatype xsd:string;
  ], [
    sh:name "dataless";
    sh:path sds:dataless;
    sh:datatype xsd:boolean;
    sh:minCount 0;
    sh:maxCount 1;
  ].

[ ] a sh:NodeShape;
  sh:targetClass lens:Bucket;
  sh:property [
    sh:name "id";
    sh:path ( );
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "streamId";
    sh:path sds:stream;
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "immutable";
    sh:path sds:immutable;
    sh:datatype xsd:boolean;
    sh:maxCount 1;
  ], [
    sh:name "root";
    sh:path sds:isRoot;
    sh:datatype xsd:boolean;
    sh:maxCount 1;
  ], [
    sh:name "empty";
    sh:path sds:empty;
    sh:datatype xsd:boolean;
    sh:maxCount 1;
  ].

[ ] a sh:NodeShape;
  sh:targetClass lens:Relation;
  sh:property [
    sh:name "type";
    sh:path sds:relationType;
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "stream";
    sh:path ( [ sh:inversePath sds:relation ] sds:stream );
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "origin";
    sh:path [ sh:inversePath sds:relation ];
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "bucket";
    sh:path sds:relationBucket;
    sh:datatype xsd:string;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "path";
    sh:path sds:relationPath;
    sh:class lens:RdfThing;
    sh:maxCount 1;
  ], [
    sh:name "value";
    sh:path sds:relationValue;
    sh:class lens:RdfThing;
    sh:maxCount 1;
  ].

[ ] a sh:NodeShape;
  sh:targetClass lens:RdfThing;
  sh:property [
    sh:name "id";
    sh:path ( );
    sh:datatype xsd:any;
    sh:minCount 1;
    sh:maxCount 1;
  ], [
    sh:name "quads";
    sh:path ( );
    sh:class rdfl:CBD;
    sh:minCount 1;
    sh:maxCount 1;
  ].
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use sdslens_shapes::{Cardinality, Datatype, PathExpr, PathStep, ShapeRegistry, ValueKind};
    use sdslens_model::vocab::sds;
    use sdslens_model::Term;

    #[test]
    fn built_in_document_compiles() {
        let registry = ShapeRegistry::from_turtle(SHAPES).unwrap();
        for name in REQUIRED_SHAPES {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn relation_stream_walks_back_through_the_origin() {
        let registry = ShapeRegistry::from_turtle(SHAPES).unwrap();
        let relation = registry.get(RELATION).unwrap();

        let stream = relation.property("stream").unwrap();
        assert_eq!(
            stream.path,
            PathExpr::Sequence(vec![
                PathStep::Inverse(Term::iri(sds::RELATION)),
                PathStep::Forward(Term::iri(sds::STREAM)),
            ])
        );
        assert_eq!(stream.cardinality, Cardinality::new(1, Some(1)));

        let value = relation.property("value").unwrap();
        assert_eq!(value.kind, ValueKind::Nested(THING.to_string()));
        assert!(!value.cardinality.is_required());
    }

    #[test]
    fn record_buckets_are_unbounded_strings() {
        let registry = ShapeRegistry::from_turtle(SHAPES).unwrap();
        let buckets = registry.get(RECORD).unwrap().property("buckets").unwrap();
        assert_eq!(buckets.kind, ValueKind::Scalar(Datatype::String));
        assert_eq!(buckets.cardinality, Cardinality::new(0, None));
    }
}
