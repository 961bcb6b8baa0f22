//! RDF terms.
//!
//! A [`Term`] is the atomic graph value. Literals always carry a datatype
//! (RDF 1.1): plain literals are `xsd:string`, language-tagged literals are
//! `rdf:langString`.

use crate::vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Term model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermParseError {
    #[error("invalid literal term (missing closing quote): {0}")]
    UnterminatedLiteral(String),
    #[error("expected IRI/blank node, got literal: {0}")]
    ExpectedNode(String),
    #[error("unsupported RDF term form: {0}")]
    Unsupported(String),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    /// Plain literal (`xsd:string`).
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::typed_literal(lexical, xsd::STRING)
    }

    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        })
    }

    pub fn lang_literal(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: rdf::LANG_STRING.to_string(),
            language: Some(language.into()),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed_literal(if value { "true" } else { "false" }, xsd::BOOLEAN)
    }

    pub fn integer(value: i64) -> Self {
        Self::typed_literal(value.to_string(), xsd::INTEGER)
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_iri(&self, iri: &str) -> bool {
        matches!(self, Term::Iri(own) if own == iri)
    }

    /// The bare textual value: IRI text, blank node label, or literal lexical form.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(label) => label,
            Term::Literal(lit) => &lit.lexical,
        }
    }

    /// Parse the N-Triples display form of a single term.
    ///
    /// Accepts `<iri>`, `_:label` and `"lexical"` with an optional `@lang` or
    /// `^^<datatype>` suffix.
    pub fn parse_display(text: &str) -> Result<Term, TermParseError> {
        let s = text.trim();

        if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Ok(Term::Iri(rest.to_string()));
        }

        if let Some(rest) = s.strip_prefix("_:") {
            return Ok(Term::BlankNode(rest.to_string()));
        }

        if s.starts_with('"') {
            let mut end_quote = None;
            let mut escaped = false;
            for (i, ch) in s.char_indices().skip(1) {
                if escaped {
                    escaped = false;
                    continue;
                }
                match ch {
                    '\\' => escaped = true,
                    '"' => {
                        end_quote = Some(i);
                        break;
                    }
                    _ => {}
                }
            }
            let Some(end) = end_quote else {
                return Err(TermParseError::UnterminatedLiteral(s.to_string()));
            };

            let lexical = unescape_literal(&s[1..end]);
            let rest = s[end + 1..].trim();

            if let Some(lang) = rest.strip_prefix('@') {
                return Ok(Term::lang_literal(lexical, lang));
            }
            if let Some(dt) = rest.strip_prefix("^^") {
                let dt = dt.trim();
                let dt = dt
                    .strip_prefix('<')
                    .and_then(|t| t.strip_suffix('>'))
                    .unwrap_or(dt);
                if dt.is_empty() {
                    return Err(TermParseError::Unsupported(s.to_string()));
                }
                return Ok(Term::typed_literal(lexical, dt));
            }
            if !rest.is_empty() {
                return Err(TermParseError::Unsupported(s.to_string()));
            }
            return Ok(Term::literal(lexical));
        }

        Err(TermParseError::Unsupported(s.to_string()))
    }

    /// Like [`Term::parse_display`] but rejects literals.
    pub fn parse_node_display(text: &str) -> Result<Term, TermParseError> {
        match Self::parse_display(text)? {
            Term::Literal(_) => Err(TermParseError::ExpectedNode(text.trim().to_string())),
            node => Ok(node),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.lexical))?;
        match &self.language {
            Some(lang) => write!(f, "@{lang}"),
            None if self.datatype == xsd::STRING => Ok(()),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse N-Triples string escapes (`ECHAR` and `UCHAR`). Malformed
/// escapes are kept as written.
fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos + 1..];
        let (decoded, used) = match escape.chars().next() {
            Some('n') => (Some('\n'), 1),
            Some('r') => (Some('\r'), 1),
            Some('t') => (Some('\t'), 1),
            Some('b') => (Some('\u{8}'), 1),
            Some('f') => (Some('\u{c}'), 1),
            Some(c @ ('"' | '\'' | '\\')) => (Some(c), 1),
            Some('u') => (hex_char(escape.get(1..5)), 5),
            Some('U') => (hex_char(escape.get(1..9)), 9),
            _ => (None, 0),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &escape[used..];
            }
            None => {
                out.push('\\');
                rest = escape;
            }
        }
    }
    out.push_str(rest);
    out
}

fn hex_char(digits: Option<&str>) -> Option<char> {
    let digits = digits.filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))?;
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}
