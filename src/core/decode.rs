//! Purpose: Resolve one raw entry to exactly one registered variant.
//! Exports: `Decoder`, `DecodeOptions`, `MatchPolicy`.
//! Role: Generic discriminating decoder; has no variant-specific logic.
//! Invariants: Non-object input fails as malformed before any shape is tried.
//! Invariants: Under `Exclusive`, every shape is tried and more than one match is an error.
//! Invariants: Decoding is pure; the only side effects are tracing events.
use serde_json::Value;

use super::error::{Error, ErrorKind, MismatchCategory, ShapeMismatch};
use super::registry::Registry;
use super::variant::Variant;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchPolicy {
    /// Try every shape; reject entries accepted by more than one.
    #[default]
    Exclusive,
    /// Stop at the first accepting shape in registry order.
    FirstMatch,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DecodeOptions {
    pub policy: MatchPolicy,
    /// Reject unknown fields on the outer document as well.
    pub strict_document: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strict_document(mut self, strict: bool) -> Self {
        self.strict_document = strict;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Decoder {
    registry: Registry,
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(registry: Registry, options: DecodeOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes a single entry. Errors carry no entry index; document-level
    /// callers attach one.
    pub fn decode_entry(&self, raw: &Value) -> Result<Variant, Error> {
        if !raw.is_object() {
            return Err(Error::new(ErrorKind::MalformedInput)
                .with_message(format!("entry must be an object, found {}", json_type(raw)))
                .with_mismatches(vec![ShapeMismatch {
                    shape: "*",
                    category: MismatchCategory::NotAnObject,
                    message: format!("expected object, found {}", json_type(raw)),
                }]));
        }

        let mut found: Option<Variant> = None;
        let mut matched = Vec::new();
        let mut mismatches = Vec::new();
        let mut last_err = None;

        for shape in self.registry.shapes() {
            tracing::trace!(shape = shape.name(), "trying shape");
            match shape.attempt(raw) {
                Ok(variant) => {
                    tracing::debug!(shape = shape.name(), "shape accepted entry");
                    matched.push(shape.name());
                    if found.is_none() {
                        found = Some(variant);
                    }
                    if self.options.policy == MatchPolicy::FirstMatch {
                        break;
                    }
                }
                Err(err) => {
                    tracing::debug!(shape = shape.name(), error = %err, "shape rejected entry");
                    mismatches.push(ShapeMismatch {
                        shape: shape.name(),
                        category: MismatchCategory::classify(&err),
                        message: err.to_string(),
                    });
                    last_err = Some(err);
                }
            }
        }

        if matched.len() > 1 {
            tracing::debug!(shapes = ?matched, "entry is ambiguous");
            return Err(Error::new(ErrorKind::AmbiguousVariant)
                .with_message(format!(
                    "entry matches {} shapes: {}",
                    matched.len(),
                    matched.join(", ")
                ))
                .with_hint("Registered shapes must be mutually exclusive; check the registry.")
                .with_matched(matched));
        }

        if let Some(variant) = found {
            return Ok(variant);
        }

        let mut err = Error::new(ErrorKind::NoMatchingVariant)
            .with_message(no_match_message(&self.registry, raw))
            .with_hint(format!(
                "Each entry needs exactly one of: {}.",
                self.registry.names().join(", ")
            ))
            .with_mismatches(mismatches);
        if let Some(source) = last_err {
            err = err.with_source(source);
        }
        Err(err)
    }

    /// Parses text and decodes it as a single entry.
    pub fn decode_entry_str(&self, input: &str) -> Result<Variant, Error> {
        let raw = crate::json::value_from_slice(input.as_bytes(), "entry")?;
        self.decode_entry(&raw)
    }
}

fn no_match_message(registry: &Registry, raw: &Value) -> String {
    let keys: Vec<&str> = raw
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    if keys.is_empty() {
        return "entry has no fields".to_string();
    }
    let known = registry.names();
    let present: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| known.contains(key))
        .collect();
    match present.len() {
        0 => format!("entry has no registered shape key (found: {})", keys.join(", ")),
        1 => format!("entry does not fit shape `{}`", present[0]),
        _ => format!(
            "entry mixes mutually exclusive keys: {}",
            present.join(", ")
        ),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeOptions, Decoder, MatchPolicy};
    use crate::core::error::{ErrorKind, MismatchCategory};
    use crate::core::registry::{Registry, Shape};
    use crate::core::variant::{SelectorSpec, StaticSpec, Variant};
    use serde_json::{Value, json};

    fn loose_static(raw: &Value) -> Result<Variant, serde_json::Error> {
        let payload = raw.get("static").cloned().unwrap_or(Value::Null);
        serde_json::from_value::<StaticSpec>(payload).map(Variant::Static)
    }

    fn overlapping_registry() -> Registry {
        Registry::standard().with_shape(Shape::new("loose-static", &["key"], loose_static))
    }

    #[test]
    fn decodes_each_standard_shape() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder
                .decode_entry(&json!({"static": {"key": "keyA"}}))
                .expect("static"),
            Variant::Static(StaticSpec {
                key: "keyA".to_string()
            })
        );
        assert_eq!(
            decoder
                .decode_entry(&json!({"selector": {"selector": "selA"}}))
                .expect("selector"),
            Variant::Selector(SelectorSpec {
                selector: "selA".to_string()
            })
        );
    }

    #[test]
    fn unknown_key_matches_nothing() {
        let err = Decoder::default()
            .decode_entry(&json!({"other": {"key": "keyA"}}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
        assert_eq!(err.mismatches().len(), 2);
        assert!(
            err.mismatches()
                .iter()
                .all(|m| m.category == MismatchCategory::UnknownField)
        );
        assert!(err.message().unwrap_or("").contains("other"));
    }

    #[test]
    fn both_keys_match_nothing() {
        let err = Decoder::default()
            .decode_entry(&json!({
                "static": {"key": "keyA"},
                "selector": {"selector": "selA"}
            }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
        assert!(err.message().unwrap_or("").contains("mutually exclusive"));
    }

    #[test]
    fn wrong_payload_type_is_a_field_type_mismatch() {
        let err = Decoder::default()
            .decode_entry(&json!({"static": {"key": 42}}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
        assert_eq!(
            err.mismatches()[0].category,
            MismatchCategory::FieldTypeMismatch
        );
        assert_eq!(err.mismatches()[0].shape, "static");
    }

    #[test]
    fn missing_nested_field_is_reported() {
        let err = Decoder::default()
            .decode_entry(&json!({"selector": {}}))
            .unwrap_err();
        assert_eq!(
            err.mismatches()[1].category,
            MismatchCategory::MissingField
        );
    }

    #[test]
    fn non_object_entry_is_malformed() {
        for raw in [json!("static"), json!(["static"]), json!(null), json!(1)] {
            let err = Decoder::default().decode_entry(&raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "input: {raw}");
        }
    }

    #[test]
    fn malformed_text_fails_before_any_shape() {
        let err = Decoder::default()
            .decode_entry_str(r#"{"static": {"key": "#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.mismatches().is_empty());
    }

    #[test]
    fn exclusive_policy_rejects_overlapping_shapes() {
        let decoder = Decoder::new(overlapping_registry(), DecodeOptions::default());
        let err = decoder
            .decode_entry(&json!({"static": {"key": "keyA"}}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousVariant);
        assert_eq!(err.matched(), &["static", "loose-static"]);
    }

    #[test]
    fn first_match_policy_keeps_registry_order() {
        let decoder = Decoder::new(
            overlapping_registry(),
            DecodeOptions::new().with_policy(MatchPolicy::FirstMatch),
        );
        let variant = decoder
            .decode_entry(&json!({"static": {"key": "keyA"}}))
            .expect("first match wins");
        assert_eq!(variant.value(), "keyA");
    }

    #[test]
    fn empty_registry_matches_nothing() {
        let decoder = Decoder::new(Registry::new(Vec::new()), DecodeOptions::default());
        let err = decoder
            .decode_entry(&json!({"static": {"key": "keyA"}}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
        assert!(err.mismatches().is_empty());
    }
}
