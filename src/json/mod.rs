//! Purpose: Internal JSON parsing boundary shared by the decoder and the CLI.
//! Exports: `parse` module plus `value_from_slice`, which maps parse failures to `MalformedInput`.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Text never reaches a shape constructor without passing through here first.

pub(crate) mod parse;

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

pub(crate) fn value_from_slice(input: &[u8], context: &str) -> Result<Value, Error> {
    parse::from_slice::<Value>(input).map_err(|err| {
        Error::new(ErrorKind::MalformedInput)
            .with_message(format!("{context} is not well-formed JSON"))
            .with_hint(parse::hint_for_error(&err, context))
            .with_source(err)
    })
}
