//! Shape-driven graph decoding.
//!
//! Generic machinery that turns an unordered set of quads into records,
//! guided by compiled shape descriptions:
//!
//! ```text
//! quads ──► partition ──► TriplePattern::match_subjects ──► Synthesizer ──► records
//!                              (per lens)                 (per subject)
//! ```
//!
//! - [`partition`]: split quads by graph name (data / addition / removal).
//! - [`matcher`]: distinct subjects of a triple template.
//! - [`path`]: identity, forward, inverse and sequence paths.
//! - [`compile`]: SHACL-flavoured shape document → [`ShapeRegistry`].
//! - [`synth`]: per-subject synthesis with cardinality checks and coercion.
//! - [`lens`]: the extraction driver with skip-and-continue semantics.
//!
//! Nothing here mutates its input or holds shared mutable state; a compiled
//! registry can be shared across threads.

pub mod cbd;
pub mod compile;
pub mod error;
pub mod graph;
pub mod lens;
pub mod matcher;
pub mod partition;
pub mod path;
pub mod shape;
pub mod synth;
pub mod value;

pub use cbd::concise_bounded_description;
pub use compile::{CompileError, ShapeRegistry};
pub use error::{Bound, ExtractionError};
pub use graph::{QuadSet, TermSet};
pub use lens::{Extraction, Lens, SkippedSubject};
pub use matcher::TriplePattern;
pub use partition::{classify, partition, PartitionKind, PartitionMarkers, Partitions};
pub use path::{PathExpr, PathStep};
pub use shape::{Cardinality, Datatype, PropertyDescriptor, Shape, ValueKind};
pub use synth::{coerce, synthesize, Synthesizer};
pub use value::{Field, ShapeRecord, Value};
