//! Purpose: Define the closed set of entry shapes and their payloads.
//! Exports: `Variant`, `VariantKind`, `Slot`, `StaticSpec`, `SelectorSpec`.
//! Role: Typed handle returned by the decoder and consumed by the encoder.
//! Invariants: Every payload struct rejects unknown fields on deserialize.
//! Invariants: Serialization emits exactly one key per entry (the discriminator).
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticSpec {
    pub key: String,
}

/// Selects an attribute from the contextual properties provided at request time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorSpec {
    pub selector: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Static(StaticSpec),
    Selector(SelectorSpec),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VariantKind {
    Static,
    Selector,
}

impl VariantKind {
    pub fn discriminator(self) -> &'static str {
        match self {
            VariantKind::Static => "static",
            VariantKind::Selector => "selector",
        }
    }
}

impl Variant {
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Static(_) => VariantKind::Static,
            Variant::Selector(_) => VariantKind::Selector,
        }
    }

    pub fn discriminator(&self) -> &'static str {
        self.kind().discriminator()
    }

    /// The single text value carried by the payload.
    pub fn value(&self) -> &str {
        match self {
            Variant::Static(spec) => &spec.key,
            Variant::Selector(spec) => &spec.selector,
        }
    }
}

impl From<StaticSpec> for Variant {
    fn from(spec: StaticSpec) -> Self {
        Variant::Static(spec)
    }
}

impl From<SelectorSpec> for Variant {
    fn from(spec: SelectorSpec) -> Self {
        Variant::Selector(spec)
    }
}

/// One position in a document's `data` array, resolved to a single variant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Slot(Variant);

impl Slot {
    pub fn new(variant: Variant) -> Self {
        Self(variant)
    }

    pub fn variant(&self) -> &Variant {
        &self.0
    }

    pub fn into_variant(self) -> Variant {
        self.0
    }
}

impl From<Variant> for Slot {
    fn from(variant: Variant) -> Self {
        Self(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectorSpec, Slot, StaticSpec, Variant, VariantKind};
    use serde_json::json;

    #[test]
    fn variants_serialize_as_single_keyed_objects() {
        let stat = Variant::Static(StaticSpec {
            key: "keyA".to_string(),
        });
        let sel = Slot::new(Variant::Selector(SelectorSpec {
            selector: "selA".to_string(),
        }));

        assert_eq!(
            serde_json::to_value(&stat).expect("encode"),
            json!({"static": {"key": "keyA"}})
        );
        assert_eq!(
            serde_json::to_value(&sel).expect("encode"),
            json!({"selector": {"selector": "selA"}})
        );
    }

    #[test]
    fn kind_and_value_follow_payload() {
        let variant: Variant = SelectorSpec {
            selector: "auth.identity".to_string(),
        }
        .into();
        assert_eq!(variant.kind(), VariantKind::Selector);
        assert_eq!(variant.discriminator(), "selector");
        assert_eq!(variant.value(), "auth.identity");
    }
}
