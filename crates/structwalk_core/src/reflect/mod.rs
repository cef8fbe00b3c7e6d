mod compression;
mod decl;
mod document;
mod error;
mod flatten;
mod resolve;
mod schema;
mod value;
mod walk;

/// Compression detection result.
pub use compression::Compression;
/// JSON document loading and options.
pub use document::{Document, LoadOptions};
/// Error and result aliases.
pub use error::{ReflectError, Result};
/// Flattening projections built on the walker.
pub use flatten::{FlatField, LeafPolicy, flatten, flatten_names, flatten_values, render_assignments};
/// Indirection resolver entry points.
pub use resolve::{Resolved, resolve, resolve_field};
/// Type descriptor tables.
pub use schema::{FieldDef, Schema, SchemaBuilder, TypeDef, TypeKind, Visibility};
/// Dynamic value tree types.
pub use value::{DynValue, FieldValue, RecordValue, Value};
/// Recursive field walker.
pub use walk::{Descend, Field, traverse, traverse_resolved};
