//! sdslens data model
//!
//! Immutable RDF values shared by every sdslens crate:
//!
//! - [`Term`]: IRI, blank node or literal, compared structurally.
//! - [`Quad`]: subject/predicate/object plus an optional graph name
//!   (`None` = default graph).
//! - [`vocab`]: namespace constants and the configurable [`Vocabulary`] of
//!   reserved marker terms (description graphs, payload predicate, type markers).
//!
//! Terms and quads print in N-Triples / N-Quads form and parse back from it,
//! which is also the boundary format used by the ingest adapter.

pub mod quad;
pub mod term;
pub mod vocab;

pub use quad::Quad;
pub use term::{Literal, Term, TermParseError};
pub use vocab::{local_name, Vocabulary};
