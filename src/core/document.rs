//! Purpose: Decode and encode whole documents of the form `{name, data: [entry...]}`.
//! Exports: `Document`, plus `Decoder::decode_document*` helpers.
//! Role: Thin composition layer over the discriminating decoder.
//! Invariants: Entries keep source order; the first failing entry aborts the decode.
//! Invariants: Errors from an entry carry that entry's index.
//! Invariants: `decode(encode(d)) == d` for every decoded document.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::{Decoder, json_type};
use super::error::{Error, ErrorKind};
use super::variant::{Slot, Variant};

const DOCUMENT_FIELDS: [&str; 2] = ["name", "data"];

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Document {
    name: String,
    #[serde(rename = "data")]
    entries: Vec<Slot>,
}

impl Document {
    pub fn new(name: impl Into<String>, entries: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            entries: entries.into_iter().map(Slot::new).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Slot] {
        &self.entries
    }

    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.entries.iter().map(Slot::variant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(encode_error)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(encode_error)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(encode_error)
    }
}

fn encode_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Internal)
        .with_message("failed to encode document")
        .with_source(err)
}

// `data: null` is accepted and treated like an absent array.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Outer fields of a raw document, checked but not yet resolved.
pub(crate) struct DocumentParts {
    pub(crate) name: String,
    pub(crate) data: Vec<Value>,
}

impl Decoder {
    pub fn decode_document(&self, raw: &Value) -> Result<Document, Error> {
        let parts = self.split_document(raw)?;
        let mut entries = Vec::with_capacity(parts.data.len());
        for (index, entry) in parts.data.iter().enumerate() {
            let variant = self
                .decode_entry(entry)
                .map_err(|err| err.with_index(index))?;
            entries.push(Slot::new(variant));
        }
        tracing::debug!(name = %parts.name, entries = entries.len(), "decoded document");
        Ok(Document {
            name: parts.name,
            entries,
        })
    }

    pub fn decode_document_slice(&self, input: &[u8]) -> Result<Document, Error> {
        let raw = crate::json::value_from_slice(input, "document")?;
        self.decode_document(&raw)
    }

    pub fn decode_document_str(&self, input: &str) -> Result<Document, Error> {
        self.decode_document_slice(input.as_bytes())
    }

    pub(crate) fn split_document(&self, raw: &Value) -> Result<DocumentParts, Error> {
        let Some(map) = raw.as_object() else {
            return Err(Error::new(ErrorKind::MalformedInput)
                .with_message(format!("document must be an object, found {}", json_type(raw)))
                .with_hint("Expected {\"name\": <text>, \"data\": [<entry>, ...]}."));
        };
        if self.options().strict_document {
            let unknown: Vec<&str> = map
                .keys()
                .map(String::as_str)
                .filter(|key| !DOCUMENT_FIELDS.contains(key))
                .collect();
            if !unknown.is_empty() {
                return Err(Error::new(ErrorKind::MalformedInput)
                    .with_message(format!("unknown document field(s): {}", unknown.join(", ")))
                    .with_hint("Strict document mode only allows `name` and `data`."));
            }
        }
        let doc = RawDocument::deserialize(raw).map_err(|err| {
            Error::new(ErrorKind::MalformedInput)
                .with_message(format!("document fields have the wrong shape: {err}"))
                .with_hint("`name` must be a string and `data` an array of entries.")
                .with_source(err)
        })?;
        Ok(DocumentParts {
            name: doc.name,
            data: doc.data.unwrap_or_default(),
        })
    }
}
