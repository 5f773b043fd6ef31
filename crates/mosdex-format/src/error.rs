//! Interchange document errors.

use mosdex_core::ConvertError;

/// Errors raised while building, writing or reading an interchange document.
#[derive(Debug, Clone, PartialEq)]
pub enum InterchangeError {
    /// Input is not valid JSON.
    Parse { reason: String },
    /// A required top-level key is absent.
    MissingKey { key: String },
    /// A section does not have the expected structure.
    InvalidShape { reason: String },
    /// An `entity.field` reference cannot be split.
    MalformedReference { reference: String },
    /// A `CONDITION` string is not a conjunction of equalities.
    MalformedCondition { condition: String },
    /// A reference names a record type absent from the document.
    UnknownEntity { name: String },
    /// Serializing the document failed.
    Serialize { reason: String },
    /// The model could not be analyzed.
    Convert(ConvertError),
}

impl InterchangeError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            InterchangeError::Parse { .. } => "DOCUMENT_PARSE",
            InterchangeError::MissingKey { .. } => "DOCUMENT_MISSING_KEY",
            InterchangeError::InvalidShape { .. } => "DOCUMENT_INVALID_SHAPE",
            InterchangeError::MalformedReference { .. } => "REFERENCE_MALFORMED",
            InterchangeError::MalformedCondition { .. } => "CONDITION_MALFORMED",
            InterchangeError::UnknownEntity { .. } => "REFERENCE_UNKNOWN_ENTITY",
            InterchangeError::Serialize { .. } => "DOCUMENT_SERIALIZE",
            InterchangeError::Convert(inner) => inner.code(),
        }
    }
}

impl std::fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterchangeError::Parse { reason } => {
                write!(f, "[{}] Document is not valid JSON: {}", self.code(), reason)
            }
            InterchangeError::MissingKey { key } => {
                write!(f, "[{}] Document has no '{}' section", self.code(), key)
            }
            InterchangeError::InvalidShape { reason } => {
                write!(f, "[{}] Document shape invalid: {}", self.code(), reason)
            }
            InterchangeError::MalformedReference { reference } => write!(
                f,
                "[{}] Expected 'entity.field', got '{}'",
                self.code(),
                reference
            ),
            InterchangeError::MalformedCondition { condition } => {
                write!(f, "[{}] Cannot parse condition '{}'", self.code(), condition)
            }
            InterchangeError::UnknownEntity { name } => {
                write!(f, "[{}] No data for entity '{}'", self.code(), name)
            }
            InterchangeError::Serialize { reason } => {
                write!(f, "[{}] Failed to write document: {}", self.code(), reason)
            }
            InterchangeError::Convert(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for InterchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterchangeError::Convert(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ConvertError> for InterchangeError {
    fn from(err: ConvertError) -> Self {
        InterchangeError::Convert(err)
    }
}
