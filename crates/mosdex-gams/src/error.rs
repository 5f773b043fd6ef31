//! Reverse emission errors.

use mosdex_format::InterchangeError;

/// Errors that stop modeling-language emission.
#[derive(Debug, Clone, PartialEq)]
pub enum EmitError {
    /// A constraint has distinct lower and upper bounds.
    RangedConstraint { constraint: String },
    /// A constraint carries a sense that has no relational operator.
    UnsupportedSense { constraint: String },
    /// The document itself is inconsistent.
    Interchange(InterchangeError),
}

impl EmitError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EmitError::RangedConstraint { .. } => "CONSTRAINT_RANGED",
            EmitError::UnsupportedSense { .. } => "CONSTRAINT_UNSUPPORTED_SENSE",
            EmitError::Interchange(inner) => inner.code(),
        }
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::RangedConstraint { constraint } => write!(
                f,
                "[{}] Ranged constraint '{}' cannot be written as one equation",
                self.code(),
                constraint
            ),
            EmitError::UnsupportedSense { constraint } => write!(
                f,
                "[{}] Constraint '{}' has an unsupported sense",
                self.code(),
                constraint
            ),
            EmitError::Interchange(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitError::Interchange(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<InterchangeError> for EmitError {
    fn from(err: InterchangeError) -> Self {
        EmitError::Interchange(err)
    }
}
