//! tupledesc - row schema descriptors for a teaching database engine

pub mod config;
pub mod observability;
pub mod schema;

pub use config::TypeLayout;
pub use schema::{DescError, DescResult, Field, TupleDesc, Type};
