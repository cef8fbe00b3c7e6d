//! Public library API for walking the fields of schema-typed record values.

/// Schemas, value trees, indirection resolution, and the recursive field walker.
pub mod reflect;
