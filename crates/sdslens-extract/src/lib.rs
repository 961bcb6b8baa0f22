//! Decoders for Smart Data Specification (SDS) stream descriptions.
//!
//! An input batch mixes member data with two description graphs: one
//! announcing records, buckets and relations to add, one listing relations
//! to remove. [`Extractor`] splits the batch by graph name and decodes each
//! description with the built-in [`shapes::SHAPES`] document:
//!
//! ```no_run
//! use sdslens_extract::Extractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new()?;
//! let extract = extractor.extract(r#"
//!     @prefix sds: <https://w3id.org/sds#>.
//!     sds:DataDescription {
//!         <http://example.org/b1> a sds:Bucket; sds:stream "s1".
//!     }
//! "#)?;
//! for bucket in extract.get_buckets() {
//!     println!("{} in {}", bucket.id, bucket.stream_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod records;
pub mod shapes;

pub use extractor::{Extract, Extractor, ExtractorError};
pub use records::{Bucket, Record, Relation, RelationType, Thing};
pub use sdslens_shapes::{Extraction, SkippedSubject};
