//! Purpose: Define the public Rust API boundary for oneshape.
//! Exports: Decoder, registry, variant and document types, reports, and errors.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only public path to core types.

mod validation;

pub use crate::core::compare::{Difference, value_differences};
pub use crate::core::decode::{DecodeOptions, Decoder, MatchPolicy};
pub use crate::core::document::Document;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind, MismatchCategory, ShapeMismatch};
pub use crate::core::registry::{Construct, Registry, Shape};
pub use crate::core::variant::{SelectorSpec, Slot, StaticSpec, Variant, VariantKind};
pub use validation::{ValidationIssue, ValidationReport, ValidationStatus};

/// Decodes a document with the standard registry and default options.
pub fn decode(input: &str) -> Result<Document, Error> {
    Decoder::default().decode_document_str(input)
}

/// Encodes a document to compact JSON text.
pub fn encode(document: &Document) -> Result<String, Error> {
    document.to_json_string()
}

/// Parses JSON text, mapping failures to `MalformedInput` with a categorized hint.
pub fn parse_value(input: &[u8], context: &str) -> Result<serde_json::Value, Error> {
    crate::json::value_from_slice(input, context)
}
