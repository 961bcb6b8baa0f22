//! RDF text ingestion for sdslens (boundary adapter).
//!
//! Parses serialized RDF (untrusted) into the owned [`Quad`] model using
//! **Sophia**:
//! - N-Triples (`.nt`)
//! - Turtle (`.ttl`)
//! - N-Quads (`.nq`)
//! - TriG (`.trig`)
//! - RDF/XML (`.rdf`, `.owl`, `.xml`)
//!
//! Terms cross the boundary in their N-Triples display form and are re-read
//! with [`Term::parse_display`], so nothing downstream depends on Sophia's
//! term types. Statements whose predicate is not an IRI are dropped.

use sdslens_model::{Quad, Term, TermParseError};
use sophia::api::prelude::*;
use sophia::api::quad::Quad as _;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    NQuads,
    TriG,
    RdfXml,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse {format}: {message}")]
    Parse { format: RdfFormat, message: String },
    #[error("unsupported RDF format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RdfFormat {
    pub fn from_extension(ext: &str) -> Result<Self, IngestError> {
        match ext.to_lowercase().as_str() {
            "nt" | "ntriples" => Ok(RdfFormat::NTriples),
            "ttl" | "turtle" => Ok(RdfFormat::Turtle),
            "nq" | "nquads" => Ok(RdfFormat::NQuads),
            "trig" => Ok(RdfFormat::TriG),
            "rdf" | "owl" | "xml" => Ok(RdfFormat::RdfXml),
            other => Err(IngestError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "ntriples",
            RdfFormat::Turtle => "turtle",
            RdfFormat::NQuads => "nquads",
            RdfFormat::TriG => "trig",
            RdfFormat::RdfXml => "rdfxml",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfFormat::NTriples => "N-Triples",
            RdfFormat::Turtle => "Turtle",
            RdfFormat::NQuads => "N-Quads",
            RdfFormat::TriG => "TriG",
            RdfFormat::RdfXml => "RDF/XML",
        })
    }
}

impl FromStr for RdfFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rdfxml" | "rdf-xml" => Ok(RdfFormat::RdfXml),
            other => Self::from_extension(other),
        }
    }
}

/// Build an owned quad from the display forms of its parts.
///
/// Returns `Ok(None)` when the predicate is not an IRI.
fn quad_from_display(
    s: &str,
    p: &str,
    o: &str,
    g: Option<String>,
) -> Result<Option<Quad>, TermParseError> {
    let subject = Term::parse_node_display(s)?;
    let predicate = Term::parse_node_display(p)?;
    if !matches!(predicate, Term::Iri(_)) {
        return Ok(None);
    }
    let object = Term::parse_display(o)?;
    let graph = g.map(|g| Term::parse_node_display(&g)).transpose()?;
    Ok(Some(Quad::new(subject, predicate, object, graph)))
}

/// Parse serialized RDF into quads, preserving document order.
pub fn parse_quads(bytes: &[u8], format: RdfFormat) -> Result<Vec<Quad>, IngestError> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut out: Vec<Quad> = Vec::new();

    let parse_error = |e: &dyn fmt::Display| IngestError::Parse {
        format,
        message: e.to_string(),
    };

    match format {
        RdfFormat::NTriples => {
            let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), TermParseError> {
                    let quad = quad_from_display(
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                        None,
                    )?;
                    out.extend(quad);
                    Ok(())
                })
                .map_err(|e| parse_error(&e))?;
        }
        RdfFormat::Turtle => {
            let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), TermParseError> {
                    let quad = quad_from_display(
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                        None,
                    )?;
                    out.extend(quad);
                    Ok(())
                })
                .map_err(|e| parse_error(&e))?;
        }
        RdfFormat::NQuads => {
            let mut parser = sophia::turtle::parser::nq::parse_bufread(reader);
            parser
                .try_for_each_quad(|q| -> Result<(), TermParseError> {
                    let quad = quad_from_display(
                        &q.s().to_string(),
                        &q.p().to_string(),
                        &q.o().to_string(),
                        q.g().map(|g| g.to_string()),
                    )?;
                    out.extend(quad);
                    Ok(())
                })
                .map_err(|e| parse_error(&e))?;
        }
        RdfFormat::TriG => {
            let mut parser = sophia::turtle::parser::trig::parse_bufread(reader);
            parser
                .try_for_each_quad(|q| -> Result<(), TermParseError> {
                    let quad = quad_from_display(
                        &q.s().to_string(),
                        &q.p().to_string(),
                        &q.o().to_string(),
                        q.g().map(|g| g.to_string()),
                    )?;
                    out.extend(quad);
                    Ok(())
                })
                .map_err(|e| parse_error(&e))?;
        }
        RdfFormat::RdfXml => {
            let mut parser = sophia::xml::parser::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), TermParseError> {
                    let quad = quad_from_display(
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                        None,
                    )?;
                    out.extend(quad);
                    Ok(())
                })
                .map_err(|e| parse_error(&e))?;
        }
    }

    tracing::debug!(format = format.name(), quads = out.len(), "parsed RDF input");
    Ok(out)
}

pub fn parse_str(text: &str, format: RdfFormat) -> Result<Vec<Quad>, IngestError> {
    parse_quads(text.as_bytes(), format)
}

/// Read and parse a file, inferring the format from its extension unless given.
pub fn parse_file(path: &Path, format: Option<RdfFormat>) -> Result<Vec<Quad>, IngestError> {
    let format = match format {
        Some(f) => f,
        None => RdfFormat::from_path(path)?,
    };
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_quads(&bytes, format)
}
