use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Errors produced while building schemas and loading documents.
///
/// Traversal itself never produces these; walker failures are whatever the
/// caller's callback returns.
#[derive(Debug, Error)]
pub enum ReflectError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Document text is not valid JSON or does not match the document layout.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Unknown leading file magic.
	#[error("unsupported compression or not a JSON document (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressed stream did not look like a JSON object.
	#[error("decompressed data is not a JSON object")]
	NotJsonAfterDecompress,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// A type expression named a type the schema does not declare.
	#[error("unknown type: {name}")]
	UnknownType {
		/// Unresolved type name.
		name: String,
	},
	/// A type name was declared twice.
	#[error("duplicate type: {name}")]
	DuplicateType {
		/// Repeated type name.
		name: String,
	},
	/// A record declared the same field name twice.
	#[error("duplicate field {field} on {record}")]
	DuplicateField {
		/// Record type name.
		record: String,
		/// Repeated field name.
		field: String,
	},
	/// Field declaration text could not be parsed.
	#[error("invalid field declaration: {decl}")]
	InvalidFieldDecl {
		/// Original declaration text.
		decl: String,
	},
	/// Type expression text could not be parsed.
	#[error("invalid type expression: {expr}")]
	InvalidTypeExpr {
		/// Original expression text.
		expr: String,
	},
	/// A record contains itself by value.
	#[error("record {name} contains itself by value")]
	RecursiveRecord {
		/// Record type name that closes the cycle.
		name: String,
	},
	/// JSON value kind does not fit the schema type at this position.
	#[error("decode type mismatch at {path}: expected {expected}, got {got}")]
	DecodeTypeMismatch {
		/// Value path inside the document.
		path: String,
		/// Schema type name expected at this position.
		expected: String,
		/// JSON kind actually found.
		got: &'static str,
	},
	/// JSON object carried a key the record does not declare.
	#[error("decode unknown field {field} at {path}")]
	DecodeUnknownField {
		/// Value path of the enclosing record.
		path: String,
		/// Undeclared key.
		field: String,
	},
	/// Polymorphic value was tagged with a non-concrete type.
	#[error("decode at {path}: {type_name} is not a concrete type")]
	DecodeNotConcrete {
		/// Value path inside the document.
		path: String,
		/// Offending runtime type name.
		type_name: String,
	},
	/// Byte array element outside `0..=255`.
	#[error("decode byte out of range at {path}")]
	DecodeByteOutOfRange {
		/// Value path of the element.
		path: String,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}
