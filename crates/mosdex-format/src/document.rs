//! Serde model of a MOSDEX interchange document.
//!
//! Struct field order is the top-level key order of the written document.

use indexmap::IndexMap;
use mosdex_core::{ConstraintSense, ObjectiveSense, VarKind};
use serde::{Deserialize, Serialize};

/// `INDEX` value of a scalar symbol.
pub const SELF_INDEX: &str = "self";

/// `TYPE` of constraints and decision expressions.
pub const LINEAR: &str = "Linear";

/// Payload field of coefficient records.
pub const VALUE_FIELD: &str = "val";

/// Schema prefix that marks an index field.
pub const INDEX_PREFIX: char = '*';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "PROBLEM")]
    pub problem: Problem,
    #[serde(rename = "INPUT_DATA_MODEL")]
    pub input_data_model: InputDataModel,
    #[serde(rename = "DATA")]
    pub data: Data,
    #[serde(rename = "VARIABLES")]
    pub variables: Vec<VariableDescriptor>,
    #[serde(rename = "CONSTRAINTS")]
    pub constraints: Vec<ConstraintDescriptor>,
    #[serde(rename = "DECISION_EXPRESSIONS")]
    pub decision_expressions: Vec<ExpressionDescriptor>,
    #[serde(rename = "COEFFICIENTS")]
    pub coefficients: Vec<CoefficientDescriptor>,
}

impl Document {
    /// Top-level keys every document must carry, in write order.
    pub const KEYS: [&'static str; 7] = [
        "PROBLEM",
        "INPUT_DATA_MODEL",
        "DATA",
        "VARIABLES",
        "CONSTRAINTS",
        "DECISION_EXPRESSIONS",
        "COEFFICIENTS",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "NAME")]
    pub name: String,
}

/// Column type tag of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Double,
}

/// Field name to type, in declaration order.
pub type RecordSchema = IndexMap<String, FieldType>;

/// Record type name to schema.
pub type InputDataModel = IndexMap<String, RecordSchema>;

/// One cell of a data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Label(String),
    Number(f64),
    /// Written for non-finite numbers.
    Null,
}

impl Cell {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Cell::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }
}

pub type Record = IndexMap<String, Cell>;

/// Record type name to its records.
pub type Data = IndexMap<String, Vec<Record>>;

/// A literal number or an `entity.field` indirection into `DATA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Reference(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsSpec {
    #[serde(rename = "LOWER", default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<Value>,
    #[serde(rename = "UPPER", default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Value>,
}

impl BoundsSpec {
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "INDEX")]
    pub index: String,
    #[serde(rename = "TYPE")]
    pub kind: VarKind,
    #[serde(rename = "BOUNDS", default)]
    pub bounds: BoundsSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "INDEX")]
    pub index: String,
    #[serde(rename = "RHS", default, skip_serializing_if = "Option::is_none")]
    pub rhs: Option<Value>,
    #[serde(rename = "SENSE", default, skip_serializing_if = "Option::is_none")]
    pub sense: Option<ConstraintSense>,
    /// Explicit bounds, used instead of `RHS`/`SENSE` when present.
    #[serde(rename = "BOUNDS", default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsSpec>,
    #[serde(rename = "TYPE")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionDescriptor {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "INDEX")]
    pub index: String,
    #[serde(rename = "SENSE")]
    pub sense: ObjectiveSense,
    #[serde(rename = "TYPE")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientDescriptor {
    #[serde(rename = "CONSTRAINTS")]
    pub constraint: String,
    #[serde(rename = "VARIABLES")]
    pub variable: String,
    #[serde(rename = "ENTRIES")]
    pub entries: String,
    #[serde(rename = "CONDITION", default)]
    pub condition: String,
}
