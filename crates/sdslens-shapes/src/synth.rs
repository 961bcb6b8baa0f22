//! Record synthesis: one subject + one shape → one [`ShapeRecord`].
//!
//! Per property, in declaration order:
//!
//! 1. resolve the path from the subject,
//! 2. turn every reached term into a [`Value`] (scalar coercion, nested
//!    synthesis, or concise bounded description),
//! 3. check `minCount <= count <= maxCount`,
//! 4. store a single optional value (`maxCount = 1`) or an ordered list.

use crate::cbd::concise_bounded_description;
use crate::compile::ShapeRegistry;
use crate::error::{Bound, ExtractionError};
use crate::graph::QuadSet;
use crate::shape::{Datatype, PropertyDescriptor, Shape, ValueKind};
use crate::value::{Field, ShapeRecord, Value};
use sdslens_model::vocab::{rdf, xsd};
use sdslens_model::Term;

/// Maximum nesting of shape-in-shape synthesis.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Decodes subjects of one partition against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    registry: &'a ShapeRegistry,
    graph: &'a QuadSet,
}

impl<'a> Synthesizer<'a> {
    pub fn new(registry: &'a ShapeRegistry, graph: &'a QuadSet) -> Self {
        Self { registry, graph }
    }

    pub fn registry(&self) -> &'a ShapeRegistry {
        self.registry
    }

    pub fn graph(&self) -> &'a QuadSet {
        self.graph
    }

    /// Synthesize `subject` through the shape named `shape`.
    pub fn synthesize_named(&self, subject: &Term, shape: &str) -> Result<ShapeRecord, ExtractionError> {
        let shape = self
            .registry
            .get(shape)
            .ok_or_else(|| ExtractionError::UnknownShape(shape.to_string()))?;
        self.synthesize(subject, shape)
    }

    pub fn synthesize(&self, subject: &Term, shape: &Shape) -> Result<ShapeRecord, ExtractionError> {
        self.synthesize_at(subject, shape, 0)
    }

    fn synthesize_at(
        &self,
        subject: &Term,
        shape: &Shape,
        depth: usize,
    ) -> Result<ShapeRecord, ExtractionError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ExtractionError::DepthExceeded {
                shape: shape.name.clone(),
                limit: MAX_NESTING_DEPTH,
            });
        }

        let mut fields = Vec::with_capacity(shape.properties.len());
        for property in &shape.properties {
            let field = self.property_field(subject, shape, property, depth)?;
            fields.push((property.name.clone(), field));
        }

        Ok(ShapeRecord {
            shape: shape.name.clone(),
            subject: subject.clone(),
            fields,
        })
    }

    fn property_field(
        &self,
        subject: &Term,
        shape: &Shape,
        property: &PropertyDescriptor,
        depth: usize,
    ) -> Result<Field, ExtractionError> {
        let terms = property.path.resolve_from(subject, self.graph);

        let mut values = Vec::with_capacity(terms.len());
        for term in &terms {
            let value = match &property.kind {
                ValueKind::Scalar(datatype) => {
                    coerce(term, *datatype).ok_or_else(|| ExtractionError::TypeMismatch {
                        shape: shape.name.clone(),
                        property: property.name.clone(),
                        expected: *datatype,
                        found: term.clone(),
                    })?
                }
                ValueKind::Nested(name) => {
                    let nested = self
                        .registry
                        .get(name)
                        .ok_or_else(|| ExtractionError::UnknownShape(name.clone()))?;
                    let record = self.synthesize_at(term, nested, depth + 1).map_err(|e| {
                        ExtractionError::Nested {
                            shape: shape.name.clone(),
                            property: property.name.clone(),
                            source: Box::new(e),
                        }
                    })?;
                    Value::Record(record)
                }
                ValueKind::RawSubgraph => {
                    Value::Quads(concise_bounded_description(term, self.graph))
                }
            };
            values.push(value);
        }

        check_cardinality(shape, property, values.len())?;

        Ok(if property.cardinality.is_single() {
            Field::One(values.into_iter().next())
        } else {
            Field::Many(values)
        })
    }
}

/// Free-function form of [`Synthesizer::synthesize`].
pub fn synthesize(
    subject: &Term,
    shape: &Shape,
    registry: &ShapeRegistry,
    graph: &QuadSet,
) -> Result<ShapeRecord, ExtractionError> {
    Synthesizer::new(registry, graph).synthesize(subject, shape)
}

fn check_cardinality(
    shape: &Shape,
    property: &PropertyDescriptor,
    observed: usize,
) -> Result<(), ExtractionError> {
    let card = property.cardinality;
    if (observed as u64) < u64::from(card.min) {
        if observed == 0 {
            return Err(ExtractionError::MissingRequiredProperty {
                shape: shape.name.clone(),
                property: property.name.clone(),
                min: card.min,
            });
        }
        return Err(ExtractionError::Cardinality {
            shape: shape.name.clone(),
            property: property.name.clone(),
            bound: Bound::Min(card.min),
            observed,
        });
    }
    if let Some(max) = card.max {
        if (observed as u64) > u64::from(max) {
            return Err(ExtractionError::Cardinality {
                shape: shape.name.clone(),
                property: property.name.clone(),
                bound: Bound::Max(max),
                observed,
            });
        }
    }
    Ok(())
}

const STRING_DATATYPES: &[&str] = &[xsd::STRING, rdf::LANG_STRING, xsd::ANY_URI];
const INTEGER_DATATYPES: &[&str] = &[
    xsd::INTEGER,
    xsd::INT,
    xsd::LONG,
    xsd::SHORT,
    xsd::NON_NEGATIVE_INTEGER,
];

/// Coerce a term to `datatype`; `None` on a mismatch.
///
/// Strings accept IRIs and blank nodes (their identifier text) as well as
/// string-like literals.
pub fn coerce(term: &Term, datatype: Datatype) -> Option<Value> {
    match datatype {
        Datatype::Term => Some(Value::Term(term.clone())),
        Datatype::String => match term {
            Term::Iri(iri) => Some(Value::String(iri.clone())),
            Term::BlankNode(label) => Some(Value::String(label.clone())),
            Term::Literal(lit) if STRING_DATATYPES.contains(&lit.datatype.as_str()) => {
                Some(Value::String(lit.lexical.clone()))
            }
            Term::Literal(_) => None,
        },
        Datatype::Boolean => match term {
            Term::Literal(lit) if lit.datatype == xsd::BOOLEAN => match lit.lexical.trim() {
                "true" | "1" => Some(Value::Boolean(true)),
                "false" | "0" => Some(Value::Boolean(false)),
                _ => None,
            },
            _ => None,
        },
        Datatype::Integer => match term {
            Term::Literal(lit) if INTEGER_DATATYPES.contains(&lit.datatype.as_str()) => lit
                .lexical
                .trim()
                .trim_start_matches('+')
                .parse::<i64>()
                .ok()
                .map(Value::Integer),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coercion_accepts_nodes_and_string_literals() {
        assert_eq!(
            coerce(&Term::iri("http://ex/a"), Datatype::String),
            Some(Value::String("http://ex/a".to_string()))
        );
        assert_eq!(
            coerce(&Term::lang_literal("hi", "en"), Datatype::String),
            Some(Value::String("hi".to_string()))
        );
        assert_eq!(coerce(&Term::boolean(true), Datatype::String), None);
    }

    #[test]
    fn boolean_and_integer_coercion_check_datatype_and_lexical() {
        assert_eq!(coerce(&Term::boolean(false), Datatype::Boolean), Some(Value::Boolean(false)));
        assert_eq!(
            coerce(&Term::typed_literal("1", xsd::BOOLEAN), Datatype::Boolean),
            Some(Value::Boolean(true))
        );
        assert_eq!(coerce(&Term::literal("true"), Datatype::Boolean), None);
        assert_eq!(coerce(&Term::typed_literal("maybe", xsd::BOOLEAN), Datatype::Boolean), None);

        assert_eq!(coerce(&Term::integer(-7), Datatype::Integer), Some(Value::Integer(-7)));
        assert_eq!(
            coerce(&Term::typed_literal("+12", xsd::INT), Datatype::Integer),
            Some(Value::Integer(12))
        );
        assert_eq!(coerce(&Term::literal("12"), Datatype::Integer), None);
    }

    #[test]
    fn term_datatype_keeps_anything() {
        let t = Term::blank("b0");
        assert_eq!(coerce(&t, Datatype::Term), Some(Value::Term(t.clone())));
    }
}
