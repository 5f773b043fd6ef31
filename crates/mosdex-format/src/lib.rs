//! MOSDEX interchange documents.
//!
//! The forward direction turns an analyzed [`mosdex_core::Conversion`] into a
//! [`Document`]: a schema (`INPUT_DATA_MODEL`), literal records (`DATA`) and
//! descriptors that tie symbols to those records. [`parse_document`] reads
//! one back for the reverse direction.

pub mod data;
pub mod descriptors;
pub mod document;
pub mod error;
pub mod reader;
pub mod reference;
pub mod schema;
pub mod writer;

pub use data::emit_data;
pub use document::{
    BoundsSpec, Cell, CoefficientDescriptor, ConstraintDescriptor, Data, Document,
    ExpressionDescriptor, FieldType, InputDataModel, Problem, Record, RecordSchema, Value,
    VariableDescriptor,
};
pub use error::InterchangeError;
pub use reader::parse_document;
pub use reference::{Condition, Equality, FieldRef, field_domain};
pub use schema::emit_schema;
pub use writer::{WriterConfig, build_document, convert, to_json_string};
