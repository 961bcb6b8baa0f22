use crate::shape::Datatype;
use sdslens_model::Term;
use std::fmt;
use thiserror::Error;

/// The cardinality bound a subject violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min(u32),
    Max(u32),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min(n) => write!(f, "sh:minCount {n}"),
            Bound::Max(n) => write!(f, "sh:maxCount {n}"),
        }
    }
}

/// Failure to decode one subject. Scoped to that subject: extraction drivers
/// skip it and continue with the remaining candidates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("{shape}.{property}: required property is missing (sh:minCount {min})")]
    MissingRequiredProperty {
        shape: String,
        property: String,
        min: u32,
    },
    #[error("{shape}.{property}: {bound} violated, found {observed} value(s)")]
    Cardinality {
        shape: String,
        property: String,
        bound: Bound,
        observed: usize,
    },
    #[error("{shape}.{property}: expected {expected}, found {found}")]
    TypeMismatch {
        shape: String,
        property: String,
        expected: Datatype,
        found: Term,
    },
    #[error("{shape}.{property}: {source}")]
    Nested {
        shape: String,
        property: String,
        source: Box<ExtractionError>,
    },
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("shape `{shape}`: nested deeper than {limit} levels")]
    DepthExceeded { shape: String, limit: usize },
    #[error("{shape}.{property}: expected a {expected} field")]
    FieldKind {
        shape: String,
        property: String,
        expected: &'static str,
    },
}

impl ExtractionError {
    /// Missing required values count as a cardinality violation too.
    pub fn is_cardinality(&self) -> bool {
        match self {
            ExtractionError::MissingRequiredProperty { .. }
            | ExtractionError::Cardinality { .. } => true,
            ExtractionError::Nested { source, .. } => source.is_cardinality(),
            _ => false,
        }
    }

    /// The innermost error of a nested chain.
    pub fn root_cause(&self) -> &ExtractionError {
        match self {
            ExtractionError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
