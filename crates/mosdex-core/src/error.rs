//! Conversion error types.

use crate::ids::SymbolId;

/// Errors that abort a model-to-interchange conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The model was loaded without a symbol dictionary.
    MissingDictionary,
    /// The model is not a linear or mixed-integer linear program.
    UnsupportedModelClass { class: String },
    /// A row or column resolved to a symbol the directory does not know.
    SymbolOutOfRange { symbol: SymbolId, count: usize },
    /// Dictionary and matrix disagree about a row, column or symbol.
    DictionaryMismatch { reason: String },
    /// A nonzero is flagged nonlinear.
    NonlinearCoefficient { row: usize, col: usize },
    /// In-memory model data failed validation.
    InvalidModelData { reason: String },
}

impl ConvertError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::MissingDictionary => "DICTIONARY_MISSING",
            ConvertError::UnsupportedModelClass { .. } => "MODEL_UNSUPPORTED_CLASS",
            ConvertError::SymbolOutOfRange { .. } => "SYMBOL_OUT_OF_RANGE",
            ConvertError::DictionaryMismatch { .. } => "DICTIONARY_MISMATCH",
            ConvertError::NonlinearCoefficient { .. } => "MATRIX_NONLINEAR",
            ConvertError::InvalidModelData { .. } => "MODEL_INVALID_DATA",
        }
    }

    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        ConvertError::DictionaryMismatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConvertError::InvalidModelData {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::MissingDictionary => {
                write!(f, "[{}] Need a model dictionary", self.code())
            }
            ConvertError::UnsupportedModelClass { class } => write!(
                f,
                "[{}] Can only convert LP and MIP models (got {})",
                self.code(),
                class
            ),
            ConvertError::SymbolOutOfRange { symbol, count } => write!(
                f,
                "[{}] Symbol index {} outside [0, {})",
                self.code(),
                symbol,
                count
            ),
            ConvertError::DictionaryMismatch { reason } => {
                write!(f, "[{}] Dictionary out of sync: {}", self.code(), reason)
            }
            ConvertError::NonlinearCoefficient { row, col } => write!(
                f,
                "[{}] Nonlinear coefficient at row {} column {}",
                self.code(),
                row,
                col
            ),
            ConvertError::InvalidModelData { reason } => {
                write!(f, "[{}] Model data invalid: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for ConvertError {}
