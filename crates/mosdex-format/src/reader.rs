//! Parsing interchange documents.

use crate::document::{Document, INDEX_PREFIX, Record};
use crate::error::InterchangeError;
use crate::reference::FieldRef;

/// Parse a document, checking for every required top-level section first.
pub fn parse_document(text: &str) -> Result<Document, InterchangeError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| InterchangeError::Parse {
            reason: err.to_string(),
        })?;

    let object = value.as_object().ok_or_else(|| InterchangeError::InvalidShape {
        reason: "top level is not an object".to_string(),
    })?;
    if let Some(missing) = Document::KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(InterchangeError::MissingKey {
            key: (*missing).to_string(),
        });
    }

    let document: Document =
        serde_json::from_value(value).map_err(|err| InterchangeError::InvalidShape {
            reason: err.to_string(),
        })?;

    tracing::debug!(
        component = "reader",
        operation = "parse",
        status = "success",
        problem = document.problem.name.as_str(),
        entities = document.data.len(),
        "Parsed interchange document"
    );

    Ok(document)
}

impl Document {
    /// Records of a `DATA` entity.
    pub fn records(&self, entity: &str) -> Result<&[Record], InterchangeError> {
        self.data
            .get(entity)
            .map(Vec::as_slice)
            .ok_or_else(|| InterchangeError::UnknownEntity {
                name: entity.to_string(),
            })
    }

    /// Index fields of a record type, in schema order, without the `*` prefix.
    pub fn index_fields(&self, entity: &str) -> Result<Vec<String>, InterchangeError> {
        let schema = self
            .input_data_model
            .get(entity)
            .ok_or_else(|| InterchangeError::UnknownEntity {
                name: entity.to_string(),
            })?;
        Ok(schema
            .keys()
            .filter_map(|key| key.strip_prefix(INDEX_PREFIX))
            .map(str::to_string)
            .collect())
    }

    /// Resolve a reference, checking that its entity exists.
    pub fn resolve(&self, text: &str) -> Result<(FieldRef, &[Record]), InterchangeError> {
        let reference = FieldRef::parse(text)?;
        let records = self.records(&reference.entity)?;
        Ok((reference, records))
    }
}
