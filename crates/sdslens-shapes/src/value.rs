//! Generic synthesized values.

use crate::error::ExtractionError;
use sdslens_model::{Quad, Term};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Integer(i64),
    Term(Term),
    Record(ShapeRecord),
    Quads(Vec<Quad>),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Term(_) => "term",
            Value::Record(_) => "record",
            Value::Quads(_) => "quads",
        }
    }
}

/// A property's contribution to a record: one optional value when
/// `maxCount = 1`, otherwise an ordered list.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    One(Option<Value>),
    Many(Vec<Value>),
}

impl Field {
    pub fn values(&self) -> &[Value] {
        match self {
            Field::One(Some(v)) => std::slice::from_ref(v),
            Field::One(None) => &[],
            Field::Many(vs) => vs,
        }
    }
}

/// One subject decoded through one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub shape: String,
    pub subject: Term,
    /// Declaration order of the shape's properties.
    pub fields: Vec<(String, Field)>,
}

impl ShapeRecord {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// The values of `name`, empty when the field is absent.
    pub fn values(&self, name: &str) -> &[Value] {
        self.field(name).map(Field::values).unwrap_or(&[])
    }

    fn kind_error(&self, property: &str, expected: &'static str) -> ExtractionError {
        ExtractionError::FieldKind {
            shape: self.shape.clone(),
            property: property.to_string(),
            expected,
        }
    }

    fn single(&self, property: &str, expected: &'static str) -> Result<Option<&Value>, ExtractionError> {
        match self.field(property) {
            Some(Field::One(v)) => Ok(v.as_ref()),
            _ => Err(self.kind_error(property, expected)),
        }
    }

    fn require<T>(&self, property: &str, value: Option<T>, expected: &'static str) -> Result<T, ExtractionError> {
        value.ok_or_else(|| self.kind_error(property, expected))
    }

    pub fn optional_string(&self, property: &str) -> Result<Option<String>, ExtractionError> {
        match self.single(property, "single string")? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.kind_error(property, "single string")),
        }
    }

    pub fn required_string(&self, property: &str) -> Result<String, ExtractionError> {
        let value = self.optional_string(property)?;
        self.require(property, value, "required string")
    }

    pub fn optional_bool(&self, property: &str) -> Result<Option<bool>, ExtractionError> {
        match self.single(property, "single boolean")? {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(self.kind_error(property, "single boolean")),
        }
    }

    pub fn required_term(&self, property: &str) -> Result<Term, ExtractionError> {
        match self.single(property, "required term")? {
            Some(Value::Term(t)) => Ok(t.clone()),
            _ => Err(self.kind_error(property, "required term")),
        }
    }

    pub fn required_quads(&self, property: &str) -> Result<Vec<Quad>, ExtractionError> {
        match self.single(property, "required subgraph")? {
            Some(Value::Quads(qs)) => Ok(qs.clone()),
            _ => Err(self.kind_error(property, "required subgraph")),
        }
    }

    pub fn optional_record(&self, property: &str) -> Result<Option<&ShapeRecord>, ExtractionError> {
        match self.single(property, "single record")? {
            None => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r)),
            Some(_) => Err(self.kind_error(property, "single record")),
        }
    }

    pub fn strings(&self, property: &str) -> Result<Vec<String>, ExtractionError> {
        match self.field(property) {
            Some(Field::Many(vs)) => vs
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(self.kind_error(property, "list of strings")),
                })
                .collect(),
            _ => Err(self.kind_error(property, "list of strings")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ShapeRecord {
        ShapeRecord {
            shape: "Record".to_string(),
            subject: Term::iri("http://ex/r"),
            fields: vec![
                ("stream".to_string(), Field::One(Some(Value::String("s".into())))),
                ("dataless".to_string(), Field::One(None)),
                (
                    "buckets".to_string(),
                    Field::Many(vec![Value::String("b1".into()), Value::String("b2".into())]),
                ),
            ],
        }
    }

    #[test]
    fn typed_accessors_read_matching_fields() {
        let r = record();
        assert_eq!(r.required_string("stream").unwrap(), "s");
        assert_eq!(r.optional_bool("dataless").unwrap(), None);
        assert_eq!(r.strings("buckets").unwrap(), vec!["b1", "b2"]);
        assert_eq!(r.values("buckets").len(), 2);
        assert!(r.values("missing").is_empty());
    }

    #[test]
    fn wrong_field_kind_is_reported() {
        let r = record();
        let err = r.optional_bool("stream").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::FieldKind { ref property, expected: "single boolean", .. } if property == "stream"
        ));
        assert!(r.required_string("dataless").is_err());
        assert!(r.strings("stream").is_err());
    }
}
