//! Purpose: Provide a stable, serializable validation report model.
//! Exports: `ValidationReport`, `ValidationStatus`, `ValidationIssue`.
//! Role: Partial-success host mode; checks every entry instead of stopping at the first failure.
//! Invariants: Reports are additive-only; entry payloads are never embedded.
//! Invariants: An outer-document failure yields exactly one issue with no index.

use crate::core::decode::Decoder;
use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationStatus {
    Ok,
    Invalid,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
    pub index: Option<usize>,
    /// Shapes involved: rejecting shapes for no-match, accepting shapes for ambiguity.
    pub shapes: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationReport {
    pub source: Option<String>,
    pub status: ValidationStatus,
    pub entry_count: usize,
    pub issues: Vec<ValidationIssue>,
    pub issue_count: usize,
    pub remediation_hints: Vec<String>,
}

impl ValidationReport {
    pub fn ok(entry_count: usize) -> Self {
        Self {
            source: None,
            status: ValidationStatus::Ok,
            entry_count,
            issues: Vec::new(),
            issue_count: 0,
            remediation_hints: Vec::new(),
        }
    }

    pub fn invalid(issue: ValidationIssue) -> Self {
        Self::ok(0).set_issues(vec![issue])
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn set_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issue_count = issues.len();
        self.issues = issues;
        self.status = if self.issue_count == 0 {
            ValidationStatus::Ok
        } else {
            ValidationStatus::Invalid
        };
        self.remediation_hints = remediation_hints(&self.issues);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ValidationStatus::Ok
    }
}

impl From<&Error> for ValidationIssue {
    fn from(err: &Error) -> Self {
        let shapes = if err.kind() == ErrorKind::AmbiguousVariant {
            err.matched().iter().map(|name| name.to_string()).collect()
        } else {
            err.mismatches()
                .iter()
                .map(|mismatch| mismatch.to_string())
                .collect()
        };
        ValidationIssue {
            code: err.kind().code().to_string(),
            message: err.message().unwrap_or(err.kind().code()).to_string(),
            index: err.index(),
            shapes,
        }
    }
}

impl Decoder {
    /// Checks every entry of `raw` and collects all failures.
    pub fn validate_document(&self, raw: &Value) -> ValidationReport {
        let parts = match self.split_document(raw) {
            Ok(parts) => parts,
            Err(err) => return ValidationReport::invalid(ValidationIssue::from(&err)),
        };
        let issues: Vec<ValidationIssue> = parts
            .data
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                self.decode_entry(entry)
                    .err()
                    .map(|err| ValidationIssue::from(&err.with_index(index)))
            })
            .collect();
        tracing::debug!(
            entries = parts.data.len(),
            issues = issues.len(),
            "validated document"
        );
        ValidationReport::ok(parts.data.len()).set_issues(issues)
    }

    /// Parses `input` then validates it; malformed text becomes a single issue.
    pub fn validate_document_slice(&self, input: &[u8]) -> ValidationReport {
        match crate::json::value_from_slice(input, "document") {
            Ok(raw) => self.validate_document(&raw),
            Err(err) => ValidationReport::invalid(ValidationIssue::from(&err)),
        }
    }
}

fn remediation_hints(issues: &[ValidationIssue]) -> Vec<String> {
    let mut hints = Vec::new();
    let has = |code: ErrorKind| issues.iter().any(|issue| issue.code == code.code());
    if has(ErrorKind::MalformedInput) {
        hints.push(
            "Document must be a JSON object with a string `name` and an array `data`.".to_string(),
        );
    }
    if has(ErrorKind::NoMatchingVariant) {
        hints.push(
            "Each entry needs exactly one registered key with exactly its declared fields."
                .to_string(),
        );
    }
    if has(ErrorKind::AmbiguousVariant) {
        hints.push("Registry shapes overlap; make them mutually exclusive.".to_string());
    }
    hints
}
