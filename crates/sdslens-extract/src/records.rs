//! Typed SDS description records.
//!
//! Each type is decoded from a generic [`ShapeRecord`] produced by the
//! matching built-in shape; a field of the wrong kind surfaces as
//! [`ExtractionError::FieldKind`].

use sdslens_model::vocab::tree;
use sdslens_model::{Quad, Term};
use sdslens_shapes::{ExtractionError, ShapeRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A member announcement: which stream it belongs to, its payload and the
/// buckets it was placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub stream: String,
    pub payload: String,
    pub buckets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataless: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: String,
    pub stream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

/// A node identifier together with its concise bounded description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub id: Term,
    pub quads: Vec<Quad>,
}

/// A bucket-to-bucket link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub stream: String,
    pub origin: String,
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Thing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Thing>,
}

// ============================================================================
// Relation kinds
// ============================================================================

/// TREE relation kinds. Unrecognised values are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationType {
    Relation,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    EqualTo,
    NotEqualTo,
    Substring,
    Prefix,
    Suffix,
    GeospatiallyContains,
    InBetween,
    Custom(String),
}

const KNOWN_RELATIONS: [RelationType; 12] = [
    RelationType::Relation,
    RelationType::GreaterThan,
    RelationType::GreaterThanOrEqualTo,
    RelationType::LessThan,
    RelationType::LessThanOrEqualTo,
    RelationType::EqualTo,
    RelationType::NotEqualTo,
    RelationType::Substring,
    RelationType::Prefix,
    RelationType::Suffix,
    RelationType::GeospatiallyContains,
    RelationType::InBetween,
];

impl RelationType {
    /// Accepts the full TREE IRI, the `tree:`-prefixed name or the bare
    /// local name (with or without the `Relation` suffix).
    pub fn parse(value: &str) -> Self {
        let local = value
            .strip_prefix(tree::NS)
            .or_else(|| value.strip_prefix("tree:"))
            .unwrap_or(value);
        KNOWN_RELATIONS
            .iter()
            .find(|kind| {
                kind.local_name().is_some_and(|name| {
                    name == local
                        || (!local.is_empty() && name.strip_suffix("Relation") == Some(local))
                })
            })
            .cloned()
            .unwrap_or_else(|| RelationType::Custom(value.to_string()))
    }

    /// Local name in the TREE namespace, `None` for custom kinds.
    pub fn local_name(&self) -> Option<&'static str> {
        Some(match self {
            RelationType::Relation => "Relation",
            RelationType::GreaterThan => "GreaterThanRelation",
            RelationType::GreaterThanOrEqualTo => "GreaterThanOrEqualToRelation",
            RelationType::LessThan => "LessThanRelation",
            RelationType::LessThanOrEqualTo => "LessThanOrEqualToRelation",
            RelationType::EqualTo => "EqualToRelation",
            RelationType::NotEqualTo => "NotEqualToRelation",
            RelationType::Substring => "SubstringRelation",
            RelationType::Prefix => "PrefixRelation",
            RelationType::Suffix => "SuffixRelation",
            RelationType::GeospatiallyContains => "GeospatiallyContainsRelation",
            RelationType::InBetween => "InBetweenRelation",
            RelationType::Custom(_) => return None,
        })
    }

    /// Full IRI for TREE kinds, the raw text for custom ones.
    pub fn as_string(&self) -> String {
        match self {
            RelationType::Custom(raw) => raw.clone(),
            known => format!("{}{}", tree::NS, known.local_name().unwrap_or_default()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RelationType::Custom(_))
    }
}

impl From<String> for RelationType {
    fn from(value: String) -> Self {
        RelationType::parse(&value)
    }
}

impl From<RelationType> for String {
    fn from(kind: RelationType) -> Self {
        kind.as_string()
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

// ============================================================================
// Decoding from shape records
// ============================================================================

impl TryFrom<&ShapeRecord> for Record {
    type Error = ExtractionError;

    fn try_from(record: &ShapeRecord) -> Result<Self, Self::Error> {
        Ok(Record {
            stream: record.required_string("stream")?,
            payload: record.required_string("payload")?,
            buckets: record.strings("buckets")?,
            dataless: record.optional_bool("dataless")?,
        })
    }
}

impl TryFrom<&ShapeRecord> for Bucket {
    type Error = ExtractionError;

    fn try_from(record: &ShapeRecord) -> Result<Self, Self::Error> {
        Ok(Bucket {
            id: record.required_string("id")?,
            stream_id: record.required_string("streamId")?,
            immutable: record.optional_bool("immutable")?,
            root: record.optional_bool("root")?,
            empty: record.optional_bool("empty")?,
        })
    }
}

impl TryFrom<&ShapeRecord> for Thing {
    type Error = ExtractionError;

    fn try_from(record: &ShapeRecord) -> Result<Self, Self::Error> {
        Ok(Thing {
            id: record.required_term("id")?,
            quads: record.required_quads("quads")?,
        })
    }
}

impl TryFrom<&ShapeRecord> for Relation {
    type Error = ExtractionError;

    fn try_from(record: &ShapeRecord) -> Result<Self, Self::Error> {
        let thing = |name: &str| -> Result<Option<Thing>, ExtractionError> {
            record.optional_record(name)?.map(Thing::try_from).transpose()
        };
        Ok(Relation {
            relation_type: RelationType::parse(&record.required_string("type")?),
            stream: record.required_string("stream")?,
            origin: record.required_string("origin")?,
            bucket: record.required_string("bucket")?,
            path: thing("path")?,
            value: thing("value")?,
        })
    }
}
