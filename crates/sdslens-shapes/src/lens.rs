//! Extraction pipeline: pattern match → synthesize every candidate subject.
//!
//! A subject that fails synthesis (or the caller's typed decoding) is
//! recorded in [`Extraction::skipped`] and logged; the remaining subjects are
//! still decoded.

use crate::compile::ShapeRegistry;
use crate::error::ExtractionError;
use crate::graph::QuadSet;
use crate::matcher::TriplePattern;
use crate::synth::Synthesizer;
use crate::value::ShapeRecord;
use sdslens_model::Term;

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSubject {
    pub subject: Term,
    pub error: ExtractionError,
}

/// Decoded records plus the candidates that did not decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedSubject>,
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Extraction<T> {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// A (subject pattern, shape) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lens {
    pub pattern: TriplePattern,
    pub shape: String,
}

impl Lens {
    pub fn new(pattern: TriplePattern, shape: impl Into<String>) -> Self {
        Self {
            pattern,
            shape: shape.into(),
        }
    }

    pub fn execute(&self, registry: &ShapeRegistry, graph: &QuadSet) -> Extraction<ShapeRecord> {
        self.execute_with(registry, graph, Ok)
    }

    /// Run the lens and convert each synthesized record with `decode`.
    pub fn execute_with<T, F>(
        &self,
        registry: &ShapeRegistry,
        graph: &QuadSet,
        mut decode: F,
    ) -> Extraction<T>
    where
        F: FnMut(ShapeRecord) -> Result<T, ExtractionError>,
    {
        let mut out = Extraction::default();
        let subjects = self.pattern.match_subjects(graph);
        if subjects.is_empty() {
            return out;
        }

        let Some(shape) = registry.get(&self.shape) else {
            // Every candidate fails the same way; report each one.
            let error = ExtractionError::UnknownShape(self.shape.clone());
            tracing::warn!(shape = %self.shape, "lens refers to an unknown shape");
            out.skipped = subjects
                .into_iter()
                .map(|subject| SkippedSubject {
                    subject,
                    error: error.clone(),
                })
                .collect();
            return out;
        };

        let synth = Synthesizer::new(registry, graph);
        for subject in subjects {
            match synth.synthesize(&subject, shape).and_then(&mut decode) {
                Ok(record) => out.records.push(record),
                Err(error) => {
                    tracing::warn!(
                        shape = %self.shape,
                        subject = %subject,
                        error = %error,
                        "skipping subject that does not fit its shape"
                    );
                    out.skipped.push(SkippedSubject { subject, error });
                }
            }
        }

        tracing::debug!(
            shape = %self.shape,
            decoded = out.records.len(),
            skipped = out.skipped.len(),
            "lens executed"
        );
        out
    }
}
