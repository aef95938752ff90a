//! Tuple descriptors
//!
//! A [`TupleDesc`] is the ordered list of typed, optionally named fields
//! that make up a row.
//!
//! # Design Principles
//!
//! - Immutable after construction
//! - At least one field; malformed input is rejected, never half-built
//! - Equality and hashing follow the type sequence, never the names
//! - Name lookup returns the first match; duplicate names are allowed

mod desc;
mod errors;
mod types;

pub use desc::TupleDesc;
pub use errors::{DescError, DescResult};
pub use types::{Field, Type};
