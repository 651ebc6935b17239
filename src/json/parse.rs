//! Purpose: Provide the internal JSON decode entrypoints and parse-failure triage.
//! Exports: `from_slice`, `ParseFailureCategory`, `categorize_error`, `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category mapping is deterministic and never inspects payload bytes.
//! Notes: Error mapping into domain errors is done by callsites so context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    TruncatedInput,
    Encoding,
    NumericRange,
    DepthLimit,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::TruncatedInput => "truncated-input",
            ParseFailureCategory::Encoding => "encoding",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Eof => ParseFailureCategory::TruncatedInput,
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Data | Category::Io => ParseFailureCategory::Unknown,
        },
        category => category,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("number out of range") {
        ParseFailureCategory::NumericRange
    } else if [
        "unicode",
        "utf-8",
        "surrogate",
        "control character",
        "hex escape",
    ]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        ParseFailureCategory::Encoding
    } else if lower.contains("eof while parsing") {
        ParseFailureCategory::TruncatedInput
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let mut hint = format!("parse category: {}; context: {context}", category.label());
    if err.line() > 0 {
        hint.push_str(&format!("; at line {} column {}", err.line(), err.column()));
    }
    hint
}
