//! Purpose: Hold the ordered list of candidate shapes an entry may resolve to.
//! Exports: `Shape`, `Registry`, `Construct`.
//! Role: Only place that knows which variants exist; the decoder iterates it blindly.
//! Invariants: Standard shapes are pairwise field-disjoint at the top level.
//! Invariants: Constructors decode strictly (unknown fields are errors at every level).
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::variant::{SelectorSpec, StaticSpec, Variant};

/// Strictly decodes one raw entry into a variant, or reports why it cannot.
pub type Construct = fn(&Value) -> Result<Variant, serde_json::Error>;

#[derive(Clone, Copy)]
pub struct Shape {
    name: &'static str,
    fields: &'static [&'static str],
    construct: Construct,
}

impl Shape {
    pub const fn new(
        name: &'static str,
        fields: &'static [&'static str],
        construct: Construct,
    ) -> Self {
        Self {
            name,
            fields,
            construct,
        }
    }

    /// Discriminator: the single top-level key this shape accepts.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field names declared by the nested payload.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub(crate) fn attempt(&self, raw: &Value) -> Result<Variant, serde_json::Error> {
        (self.construct)(raw)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StaticEnvelope {
    #[serde(rename = "static")]
    spec: StaticSpec,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SelectorEnvelope {
    selector: SelectorSpec,
}

impl From<StaticEnvelope> for Variant {
    fn from(envelope: StaticEnvelope) -> Self {
        Variant::Static(envelope.spec)
    }
}

impl From<SelectorEnvelope> for Variant {
    fn from(envelope: SelectorEnvelope) -> Self {
        Variant::Selector(envelope.selector)
    }
}

fn strict<E>(raw: &Value) -> Result<Variant, serde_json::Error>
where
    E: DeserializeOwned + Into<Variant>,
{
    E::deserialize(raw).map(Into::into)
}

const STANDARD: [Shape; 2] = [
    Shape::new("static", &["key"], strict::<StaticEnvelope>),
    Shape::new("selector", &["selector"], strict::<SelectorEnvelope>),
];

#[derive(Clone, Debug)]
pub struct Registry {
    shapes: Vec<Shape>,
}

impl Registry {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// `static` then `selector`.
    pub fn standard() -> Self {
        Self::new(STANDARD.to_vec())
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.shapes.iter().map(Shape::name).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
