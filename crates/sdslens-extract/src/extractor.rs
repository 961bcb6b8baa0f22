//! `Extractor` / `Extract`: partition once, then decode on demand.

use crate::records::{Bucket, Record, Relation};
use crate::shapes::{self, REQUIRED_SHAPES};
use rayon::prelude::*;
use sdslens_ingest::{IngestError, RdfFormat};
use sdslens_model::{Quad, Vocabulary};
use sdslens_shapes::{
    partition, CompileError, Extraction, ExtractionError, Lens, PartitionMarkers, Partitions,
    QuadSet, ShapeRecord, ShapeRegistry, TriplePattern,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("shape document does not declare the `{0}` shape")]
    MissingShape(String),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Compiled shapes plus the lenses for records, buckets and relations.
///
/// Immutable after construction; share it across threads freely.
#[derive(Debug, Clone)]
pub struct Extractor {
    registry: ShapeRegistry,
    vocab: Vocabulary,
    markers: PartitionMarkers,
    record_lens: Lens,
    bucket_lens: Lens,
    relation_lens: Lens,
}

impl Extractor {
    /// Built-in shapes, default SDS vocabulary.
    pub fn new() -> Result<Self, ExtractorError> {
        Self::with_config(shapes::SHAPES, Vocabulary::default())
    }

    pub fn with_config(shapes_ttl: &str, vocab: Vocabulary) -> Result<Self, ExtractorError> {
        let registry = ShapeRegistry::from_turtle(shapes_ttl)?;
        Self::from_parts(registry, vocab)
    }

    /// Use an already compiled registry.
    pub fn from_parts(registry: ShapeRegistry, vocab: Vocabulary) -> Result<Self, ExtractorError> {
        if let Some(missing) = REQUIRED_SHAPES.iter().find(|name| !registry.contains(name)) {
            return Err(ExtractorError::MissingShape(missing.to_string()));
        }

        let record_lens = Lens::new(
            TriplePattern::with_predicate(vocab.payload_predicate()),
            shapes::RECORD,
        );
        let bucket_lens = Lens::new(
            TriplePattern::with_predicate_object(vocab.type_predicate(), vocab.bucket_type()),
            shapes::BUCKET,
        );
        let relation_lens = Lens::new(
            TriplePattern::with_predicate_object(vocab.type_predicate(), vocab.relation_type()),
            shapes::RELATION,
        );

        tracing::debug!(shapes = registry.len(), "extractor ready");
        Ok(Self {
            markers: PartitionMarkers::from_vocabulary(&vocab),
            registry,
            vocab,
            record_lens,
            bucket_lens,
            relation_lens,
        })
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Partition already parsed quads.
    pub fn extract_quads(&self, quads: Vec<Quad>) -> Extract<'_> {
        Extract {
            extractor: self,
            partitions: partition(quads, &self.markers),
        }
    }

    /// Parse TriG text, then partition it.
    pub fn extract(&self, text: &str) -> Result<Extract<'_>, ExtractorError> {
        self.extract_with_format(text, RdfFormat::TriG)
    }

    pub fn extract_with_format(
        &self,
        text: &str,
        format: RdfFormat,
    ) -> Result<Extract<'_>, ExtractorError> {
        let quads = sdslens_ingest::parse_str(text, format)?;
        Ok(self.extract_quads(quads))
    }

    /// Partition independent batches in parallel.
    pub fn extract_batches(&self, batches: Vec<Vec<Quad>>) -> Vec<Extract<'_>> {
        batches
            .into_par_iter()
            .map(|quads| self.extract_quads(quads))
            .collect()
    }
}

/// One partitioned input, decoded lazily per accessor.
#[derive(Debug, Clone)]
pub struct Extract<'a> {
    extractor: &'a Extractor,
    partitions: Partitions,
}

impl Extract<'_> {
    pub fn partitions(&self) -> &Partitions {
        &self.partitions
    }

    /// Quads outside both description graphs, untouched.
    pub fn get_data(&self) -> &[Quad] {
        self.partitions.data.quads()
    }

    pub fn get_records(&self) -> Vec<Record> {
        self.get_records_report().records
    }

    pub fn get_buckets(&self) -> Vec<Bucket> {
        self.get_buckets_report().records
    }

    pub fn get_relations(&self) -> Vec<Relation> {
        self.get_relations_report().records
    }

    pub fn get_remove_relations(&self) -> Vec<Relation> {
        self.get_remove_relations_report().records
    }

    pub fn get_records_report(&self) -> Extraction<Record> {
        self.run(&self.extractor.record_lens, &self.partitions.addition)
    }

    pub fn get_buckets_report(&self) -> Extraction<Bucket> {
        self.run(&self.extractor.bucket_lens, &self.partitions.addition)
    }

    pub fn get_relations_report(&self) -> Extraction<Relation> {
        self.run(&self.extractor.relation_lens, &self.partitions.addition)
    }

    pub fn get_remove_relations_report(&self) -> Extraction<Relation> {
        self.run(&self.extractor.relation_lens, &self.partitions.removal)
    }

    fn run<T>(&self, lens: &Lens, graph: &QuadSet) -> Extraction<T>
    where
        T: for<'r> TryFrom<&'r ShapeRecord, Error = ExtractionError>,
    {
        lens.execute_with(&self.extractor.registry, graph, |record| T::try_from(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn extractor_is_shareable() {
        assert_send_sync::<Extractor>();
        assert_send_sync::<Extract<'static>>();
    }

    #[test]
    fn shape_document_without_required_shapes_is_rejected() {
        let shapes = r#"
            @prefix sh: <http://www.w3.org/ns/shacl#>.
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#>.
            [ ] a sh:NodeShape; sh:targetClass <http://example.org/Record>;
              sh:property [ sh:name "stream"; sh:path <http://example.org/s>; sh:datatype xsd:string ].
        "#;
        let err = Extractor::with_config(shapes, Vocabulary::default()).unwrap_err();
        assert!(matches!(err, ExtractorError::MissingShape(name) if name == "Bucket"));
    }

    #[test]
    fn malformed_shape_document_is_a_compile_error() {
        let err = Extractor::with_config("this is not turtle", Vocabulary::default()).unwrap_err();
        assert!(matches!(err, ExtractorError::Compile(CompileError::Syntax(_))));
    }

    #[test]
    fn unparseable_input_is_an_ingest_error() {
        let extractor = Extractor::new().unwrap();
        let err = extractor.extract("<a> <b> .").unwrap_err();
        assert!(matches!(err, ExtractorError::Ingest(_)));
    }
}
