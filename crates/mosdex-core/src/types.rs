use serde::{Deserialize, Serialize};

/// Role a dictionary symbol plays in the converted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constraint,
    Objective,
    /// Present in the dictionary but not part of the solved model.
    Ignored,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constraint => "constraint",
            SymbolKind::Objective => "objective",
            SymbolKind::Ignored => "ignored",
        }
    }
}

/// Problem class reported by the model provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelClass {
    #[default]
    Lp,
    Mip,
    Rmip,
    Other(String),
}

impl ModelClass {
    /// Only linear and mixed-integer linear classes can be converted.
    pub fn is_supported(&self) -> bool {
        matches!(self, ModelClass::Lp | ModelClass::Mip | ModelClass::Rmip)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModelClass::Lp => "lp",
            ModelClass::Mip => "mip",
            ModelClass::Rmip => "rmip",
            ModelClass::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for ModelClass {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "lp" => ModelClass::Lp,
            "mip" => ModelClass::Mip,
            "rmip" => ModelClass::Rmip,
            _ => ModelClass::Other(value),
        }
    }
}

impl From<ModelClass> for String {
    fn from(value: ModelClass) -> Self {
        value.as_str().to_string()
    }
}

/// Optimization sense of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

impl ObjectiveSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectiveSense::Minimize => "minimize",
            ObjectiveSense::Maximize => "maximize",
        }
    }
}

/// Variable type as written to the interchange document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    Binary,
    Integer,
    Continuous,
    Unsupported,
}

impl VarKind {
    /// Classify a native column type tag (`B`, `I`, `X`).
    pub fn from_tag(tag: char) -> Self {
        match tag.to_ascii_uppercase() {
            'B' => VarKind::Binary,
            'I' => VarKind::Integer,
            'X' => VarKind::Continuous,
            _ => VarKind::Unsupported,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Binary => "Binary",
            VarKind::Integer => "Integer",
            VarKind::Continuous => "Continuous",
            VarKind::Unsupported => "Unsupported",
        }
    }

    pub fn is_discrete(self) -> bool {
        matches!(self, VarKind::Binary | VarKind::Integer)
    }
}

/// Constraint relation as written to the interchange document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "UNSUPPORTED")]
    Unsupported,
}

impl ConstraintSense {
    /// Classify a native relational tag. `B` rows are fixed and map to equality.
    pub fn from_tag(tag: char) -> Self {
        match tag.to_ascii_uppercase() {
            'E' | 'B' => ConstraintSense::Equal,
            'G' => ConstraintSense::GreaterEqual,
            'L' => ConstraintSense::LessEqual,
            _ => ConstraintSense::Unsupported,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintSense::Equal => "==",
            ConstraintSense::GreaterEqual => ">=",
            ConstraintSense::LessEqual => "<=",
            ConstraintSense::Unsupported => "UNSUPPORTED",
        }
    }
}

/// Bounds for a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Default bounds for a column of the given kind.
    pub fn default_for(kind: VarKind) -> Self {
        match kind {
            VarKind::Binary => Self::new(0.0, 1.0),
            _ => Self::new(f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}
