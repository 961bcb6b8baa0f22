//! Shape document compiler.
//!
//! A shape document is SHACL-flavoured RDF. Compilation reads it once into
//! [`Shape`] values; the resulting [`ShapeRegistry`] is immutable and can be
//! shared across any number of extractions (it is `Send + Sync`).
//!
//! Accepted vocabulary:
//!
//! - `?s a sh:NodeShape; sh:targetClass <C>` declares shape `localname(C)`.
//! - `sh:property [...]` nodes, in document order, each with `sh:name`,
//!   `sh:path`, one of `sh:datatype` / `sh:class`, and optional
//!   `sh:minCount` / `sh:maxCount`.
//! - Paths: `rdf:nil` (the empty list), a predicate IRI,
//!   `[ sh:inversePath <p> ]`, or an RDF list of those (nested lists are
//!   flattened).
//! - `sh:class rdfl:CBD` captures the value's concise bounded description.

use crate::graph::QuadSet;
use crate::matcher::TriplePattern;
use crate::path::{PathExpr, PathStep};
use crate::shape::{Cardinality, Datatype, PropertyDescriptor, Shape, ValueKind};
use ahash::AHashSet;
use sdslens_ingest::RdfFormat;
use sdslens_model::vocab::{rdf, rdfl, sh};
use sdslens_model::{local_name, Quad, Term};
use std::collections::BTreeMap;
use thiserror::Error;

/// Guard against pathological nesting of path lists.
const MAX_PATH_NESTING: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("shape document is not valid RDF: {0}")]
    Syntax(String),
    #[error("node shape {node} must declare exactly one sh:targetClass IRI (found {found})")]
    MissingTargetClass { node: String, found: usize },
    #[error("shape `{shape}` is declared more than once")]
    DuplicateShape { shape: String },
    #[error("shape `{shape}`: property `{property}` is declared more than once")]
    DuplicateProperty { shape: String, property: String },
    #[error("shape `{shape}`: property node {node} needs exactly one sh:name literal")]
    MissingName { shape: String, node: String },
    #[error("shape `{shape}`: property `{property}` has an invalid path: {reason}")]
    InvalidPath {
        shape: String,
        property: String,
        reason: String,
    },
    #[error("shape `{shape}`: property `{property}` has an invalid value kind: {reason}")]
    InvalidValueKind {
        shape: String,
        property: String,
        reason: String,
    },
    #[error("shape `{shape}`: property `{property}` references undeclared shape `{target}`")]
    UnknownShape {
        shape: String,
        property: String,
        target: String,
    },
    #[error("shape `{shape}`: property `{property}` has an invalid {bound}: {reason}")]
    InvalidCount {
        shape: String,
        property: String,
        bound: &'static str,
        reason: String,
    },
    #[error("shape `{shape}`: property `{property}` has sh:minCount {min} > sh:maxCount {max}")]
    InvertedBounds {
        shape: String,
        property: String,
        min: u32,
        max: u32,
    },
}

/// Compiled shapes keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeRegistry {
    shapes: BTreeMap<String, Shape>,
}

impl ShapeRegistry {
    /// Parse a Turtle shape document and compile it.
    pub fn from_turtle(text: &str) -> Result<Self, CompileError> {
        let quads = sdslens_ingest::parse_str(text, RdfFormat::Turtle)
            .map_err(|e| CompileError::Syntax(e.to_string()))?;
        Self::compile(quads)
    }

    /// Compile every `sh:NodeShape` found in `quads`.
    pub fn compile(quads: Vec<Quad>) -> Result<Self, CompileError> {
        let graph = QuadSet::from(quads);
        let shape_nodes = TriplePattern::with_predicate_object(
            Term::iri(rdf::TYPE),
            Term::iri(sh::NODE_SHAPE),
        )
        .match_subjects(&graph);

        // Pass 1: names, so nested references can point forward.
        let mut declared: Vec<(Term, String, String)> = Vec::new();
        let mut names: AHashSet<String> = AHashSet::new();
        for node in shape_nodes {
            let targets: Vec<&Term> = graph.objects_iri(&node, sh::TARGET_CLASS).collect();
            let target_class = match targets.as_slice() {
                [Term::Iri(iri)] => iri.clone(),
                _ => {
                    return Err(CompileError::MissingTargetClass {
                        node: node.to_string(),
                        found: targets.len(),
                    })
                }
            };
            let name = local_name(&target_class).to_string();
            if !names.insert(name.clone()) {
                return Err(CompileError::DuplicateShape { shape: name });
            }
            declared.push((node, name, target_class));
        }

        // Pass 2: properties.
        let mut shapes = BTreeMap::new();
        for (node, name, target_class) in declared {
            let mut properties: Vec<PropertyDescriptor> = Vec::new();
            for prop_node in graph.objects_iri(&node, sh::PROPERTY) {
                let descriptor = compile_property(&graph, &name, prop_node, &names)?;
                if properties.iter().any(|p| p.name == descriptor.name) {
                    return Err(CompileError::DuplicateProperty {
                        shape: name,
                        property: descriptor.name,
                    });
                }
                properties.push(descriptor);
            }
            shapes.insert(
                name.clone(),
                Shape {
                    name,
                    target_class,
                    properties,
                },
            );
        }

        tracing::debug!(shapes = shapes.len(), "compiled shape registry");
        Ok(Self { shapes })
    }

    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }
}

fn compile_property(
    graph: &QuadSet,
    shape: &str,
    node: &Term,
    shape_names: &AHashSet<String>,
) -> Result<PropertyDescriptor, CompileError> {
    let names: Vec<&Term> = graph.objects_iri(node, sh::NAME).collect();
    let name = match names.as_slice() {
        [Term::Literal(lit)] => lit.lexical.clone(),
        _ => {
            return Err(CompileError::MissingName {
                shape: shape.to_string(),
                node: node.to_string(),
            })
        }
    };

    let invalid_path = |reason: String| CompileError::InvalidPath {
        shape: shape.to_string(),
        property: name.clone(),
        reason,
    };
    let paths: Vec<&Term> = graph.objects_iri(node, sh::PATH).collect();
    let path = match paths.as_slice() {
        [path_node] => parse_path(graph, path_node, 0).map_err(invalid_path)?,
        _ => {
            return Err(invalid_path(format!(
                "expected exactly one sh:path, found {}",
                paths.len()
            )))
        }
    };

    let kind = compile_value_kind(graph, shape, &name, node, shape_names)?;

    let min = read_count(graph, shape, &name, node, sh::MIN_COUNT, "sh:minCount")?.unwrap_or(0);
    let max = read_count(graph, shape, &name, node, sh::MAX_COUNT, "sh:maxCount")?;
    if let Some(max) = max {
        if min > max {
            return Err(CompileError::InvertedBounds {
                shape: shape.to_string(),
                property: name,
                min,
                max,
            });
        }
    }

    Ok(PropertyDescriptor {
        name,
        path,
        kind,
        cardinality: Cardinality::new(min, max),
    })
}

fn compile_value_kind(
    graph: &QuadSet,
    shape: &str,
    property: &str,
    node: &Term,
    shape_names: &AHashSet<String>,
) -> Result<ValueKind, CompileError> {
    let invalid = |reason: String| CompileError::InvalidValueKind {
        shape: shape.to_string(),
        property: property.to_string(),
        reason,
    };

    let datatypes: Vec<&Term> = graph.objects_iri(node, sh::DATATYPE).collect();
    let classes: Vec<&Term> = graph.objects_iri(node, sh::CLASS).collect();

    match (datatypes.as_slice(), classes.as_slice()) {
        ([Term::Iri(dt)], []) => Datatype::from_iri(dt)
            .map(ValueKind::Scalar)
            .ok_or_else(|| invalid(format!("unsupported datatype <{dt}>"))),
        ([], [Term::Iri(class)]) if class == rdfl::CBD => Ok(ValueKind::RawSubgraph),
        ([], [Term::Iri(class)]) => {
            let target = local_name(class).to_string();
            if shape_names.contains(&target) {
                Ok(ValueKind::Nested(target))
            } else {
                Err(CompileError::UnknownShape {
                    shape: shape.to_string(),
                    property: property.to_string(),
                    target,
                })
            }
        }
        ([], []) => Err(invalid("missing sh:datatype or sh:class".to_string())),
        _ => Err(invalid(format!(
            "expected exactly one sh:datatype or sh:class IRI (found {} datatype(s), {} class(es))",
            datatypes.len(),
            classes.len()
        ))),
    }
}

fn read_count(
    graph: &QuadSet,
    shape: &str,
    property: &str,
    node: &Term,
    predicate: &str,
    bound: &'static str,
) -> Result<Option<u32>, CompileError> {
    let invalid = |reason: String| CompileError::InvalidCount {
        shape: shape.to_string(),
        property: property.to_string(),
        bound,
        reason,
    };
    let values: Vec<&Term> = graph.objects_iri(node, predicate).collect();
    match values.as_slice() {
        [] => Ok(None),
        [Term::Literal(lit)] => lit
            .lexical
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| invalid(format!("`{}` is not a non-negative integer", lit.lexical))),
        [other] => Err(invalid(format!("{other} is not a literal"))),
        _ => Err(invalid(format!("declared {} times", values.len()))),
    }
}

/// Parse a SHACL path node; errors are plain reasons, wrapped by the caller.
fn parse_path(graph: &QuadSet, node: &Term, depth: usize) -> Result<PathExpr, String> {
    if depth > MAX_PATH_NESTING {
        return Err(format!("path lists nested deeper than {MAX_PATH_NESTING}"));
    }

    match node {
        Term::Literal(lit) => Err(format!("literal \"{}\" is not a path", lit.lexical)),
        Term::Iri(iri) if iri == rdf::NIL => Ok(PathExpr::Identity),
        Term::Iri(iri) if !has_list_structure(graph, node) && !has_inverse(graph, node) => {
            Ok(PathExpr::Forward(Term::iri(iri)))
        }
        _ => {
            let inverses: Vec<&Term> = graph.objects_iri(node, sh::INVERSE_PATH).collect();
            if !inverses.is_empty() {
                return match inverses.as_slice() {
                    [Term::Iri(p)] => Ok(PathExpr::Inverse(Term::iri(p))),
                    [other] => Err(format!("sh:inversePath of {other} must be a predicate IRI")),
                    _ => Err("more than one sh:inversePath".to_string()),
                };
            }

            if has_list_structure(graph, node) {
                let mut steps: Vec<PathStep> = Vec::new();
                for item in list_items(graph, node)? {
                    steps.extend(parse_path(graph, &item, depth + 1)?.steps());
                }
                return Ok(PathExpr::from_steps(steps));
            }

            if let Some(q) = graph
                .outgoing(node)
                .find(|q| q.predicate.as_iri().is_some_and(|p| p.starts_with(sh::NS)))
            {
                return Err(format!("unsupported path form {}", q.predicate));
            }
            Err(format!("{node} is neither a predicate, an inverse path nor a list"))
        }
    }
}

fn has_inverse(graph: &QuadSet, node: &Term) -> bool {
    graph.objects_iri(node, sh::INVERSE_PATH).next().is_some()
}

fn has_list_structure(graph: &QuadSet, node: &Term) -> bool {
    graph.objects_iri(node, rdf::FIRST).next().is_some()
}

/// Items of an RDF list starting at `head`.
fn list_items(graph: &QuadSet, head: &Term) -> Result<Vec<Term>, String> {
    let mut items = Vec::new();
    let mut seen: AHashSet<Term> = AHashSet::new();
    let mut node = head.clone();

    while !node.is_iri(rdf::NIL) {
        if !seen.insert(node.clone()) {
            return Err(format!("RDF list at {head} is cyclic"));
        }
        let firsts: Vec<&Term> = graph.objects_iri(&node, rdf::FIRST).collect();
        let rests: Vec<&Term> = graph.objects_iri(&node, rdf::REST).collect();
        match (firsts.as_slice(), rests.as_slice()) {
            ([first], [rest]) => {
                items.push((*first).clone());
                node = (*rest).clone();
            }
            _ => return Err(format!("malformed RDF list node {node}")),
        }
    }
    Ok(items)
}
