//! Purpose: Strict discriminated-union decoding for JSON documents.
//! Exports: `api` (decoder, registry, variants, documents, reports, errors).
//! Role: Library backing the `oneshape` CLI; usable directly by host applications.
//! Invariants: The library never reads files, environment, or stdio.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
