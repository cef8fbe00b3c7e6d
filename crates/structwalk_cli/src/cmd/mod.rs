/// Flattened field names command.
pub mod names;
/// Single-line leaf rendering command.
pub mod render;
/// Root resolution command.
pub mod resolve;
/// Schema listing command.
pub mod types;
/// Flattened field values command.
pub mod values;
/// Full field walk command.
pub mod walk;

mod util;
