//! Compiled shape descriptions.

use crate::path::PathExpr;
use sdslens_model::vocab::xsd;
use std::fmt;

/// Scalar datatypes a property value can be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    String,
    Boolean,
    Integer,
    /// Keep the term as-is (`xsd:any`).
    Term,
}

impl Datatype {
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            xsd::STRING => Some(Datatype::String),
            xsd::BOOLEAN => Some(Datatype::Boolean),
            xsd::INTEGER => Some(Datatype::Integer),
            xsd::ANY => Some(Datatype::Term),
            _ => None,
        }
    }

    pub fn iri(self) -> &'static str {
        match self {
            Datatype::String => xsd::STRING,
            Datatype::Boolean => xsd::BOOLEAN,
            Datatype::Integer => xsd::INTEGER,
            Datatype::Term => xsd::ANY,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Datatype::String => "xsd:string",
            Datatype::Boolean => "xsd:boolean",
            Datatype::Integer => "xsd:integer",
            Datatype::Term => "xsd:any",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar(Datatype),
    /// Values are subjects of another shape (by shape name).
    Nested(String),
    /// Values are captured as their concise bounded description.
    RawSubgraph,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar(dt) => write!(f, "{dt}"),
            ValueKind::Nested(shape) => write!(f, "shape {shape}"),
            ValueKind::RawSubgraph => f.write_str("subgraph"),
        }
    }
}

/// `min <= count <= max`; `max == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cardinality {
    pub min: u32,
    pub max: Option<u32>,
}

impl Cardinality {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// At most one value: the field holds an optional scalar instead of a list.
    pub fn is_single(&self) -> bool {
        self.max == Some(1)
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..*]", self.min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub path: PathExpr,
    pub kind: ValueKind,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Local name of the target class; the registry key.
    pub name: String,
    pub target_class: String,
    /// Declaration order.
    pub properties: Vec<PropertyDescriptor>,
}

impl Shape {
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}
