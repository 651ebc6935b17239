use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Io,
    MalformedInput,
    NoMatchingVariant,
    AmbiguousVariant,
}

impl ErrorKind {
    /// Stable kebab-case label used in reports and JSON envelopes.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::Usage => "usage",
            ErrorKind::Io => "io",
            ErrorKind::MalformedInput => "malformed-input",
            ErrorKind::NoMatchingVariant => "no-matching-variant",
            ErrorKind::AmbiguousVariant => "ambiguous-variant",
        }
    }
}

/// Why a single candidate shape rejected a raw entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MismatchCategory {
    UnknownField,
    MissingField,
    FieldTypeMismatch,
    NotAnObject,
    Other,
}

impl MismatchCategory {
    pub fn label(self) -> &'static str {
        match self {
            MismatchCategory::UnknownField => "unknown-field",
            MismatchCategory::MissingField => "missing-field",
            MismatchCategory::FieldTypeMismatch => "field-type-mismatch",
            MismatchCategory::NotAnObject => "not-an-object",
            MismatchCategory::Other => "other",
        }
    }

    pub(crate) fn classify(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        if message.starts_with("unknown field") {
            MismatchCategory::UnknownField
        } else if message.starts_with("missing field") {
            MismatchCategory::MissingField
        } else if message.starts_with("invalid type") {
            MismatchCategory::FieldTypeMismatch
        } else {
            MismatchCategory::Other
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeMismatch {
    pub shape: &'static str,
    pub category: MismatchCategory,
    pub message: String,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.shape, self.message, self.category.label())
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    index: Option<usize>,
    mismatches: Vec<ShapeMismatch>,
    matched: Vec<&'static str>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            index: None,
            mismatches: Vec::new(),
            matched: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Position of the offending entry inside the document's `data` array.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Per-candidate rejections, in registry order.
    pub fn mismatches(&self) -> &[ShapeMismatch] {
        &self.mismatches
    }

    /// Shapes that all accepted the same entry.
    pub fn matched(&self) -> &[&'static str] {
        &self.matched
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_mismatches(mut self, mismatches: Vec<ShapeMismatch>) -> Self {
        self.mismatches = mismatches;
        self
    }

    pub fn with_matched(mut self, matched: Vec<&'static str>) -> Self {
        self.matched = matched;
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(index) = self.index {
            write!(f, " (entry: {index})")?;
        }
        if !self.matched.is_empty() {
            write!(f, " (matched: {})", self.matched.join(", "))?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::MalformedInput => 4,
        ErrorKind::NoMatchingVariant => 5,
        ErrorKind::AmbiguousVariant => 6,
    }
}
