//! Sets and entity shapes recovered from a parsed document.

use indexmap::{IndexMap, IndexSet};
use mosdex_format::document::SELF_INDEX;
use mosdex_format::{Cell, Document, FieldType, InterchangeError, Record, field_domain};

/// Domains with their labels, and lookups over the document's entities.
#[derive(Debug)]
pub struct Catalog<'d> {
    document: &'d Document,
    sets: IndexMap<String, IndexSet<String>>,
    // DATA entity -> parameter identifier
    parameters: IndexMap<String, String>,
}

impl<'d> Catalog<'d> {
    /// Collect every domain named by a schema index field, with the labels
    /// the data binds to it in first-seen order.
    pub fn build(document: &'d Document) -> Result<Self, InterchangeError> {
        let mut sets: IndexMap<String, IndexSet<String>> = IndexMap::new();

        for entity in document.input_data_model.keys() {
            let fields = document.index_fields(entity)?;
            for field in &fields {
                sets.entry(field_domain(field).to_string()).or_default();
            }
            let Some(records) = document.data.get(entity) else {
                continue;
            };
            for record in records {
                for (field, label) in fields.iter().zip(record_labels(entity, &fields, record)?) {
                    if let Some(labels) = sets.get_mut(field_domain(field)) {
                        labels.insert(label);
                    }
                }
            }
        }

        let parameters = parameter_names(document, &sets);
        Ok(Self {
            document,
            sets,
            parameters,
        })
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.sets
            .iter()
            .map(|(domain, labels)| (domain.as_str(), labels))
    }

    /// Identifier of the parameter holding an entity's data.
    ///
    /// Symbol records share their symbol's name, so those parameters get a
    /// `_data` suffix until the name is free.
    pub fn parameter_name<'a>(&'a self, entity: &'a str) -> &'a str {
        self.parameters.get(entity).map_or(entity, String::as_str)
    }

    /// Index fields of a symbol given its `INDEX` value.
    pub fn symbol_fields(&self, index: &str) -> Result<Vec<String>, InterchangeError> {
        if index == SELF_INDEX {
            Ok(Vec::new())
        } else {
            self.document.index_fields(index)
        }
    }

    /// Numeric fields of an entity's schema, in declaration order.
    pub fn numeric_fields(&self, entity: &str) -> Vec<&'d str> {
        self.document
            .input_data_model
            .get(entity)
            .map(|schema| {
                schema
                    .iter()
                    .filter(|(_, kind)| **kind == FieldType::Double)
                    .map(|(field, _)| field.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn parameter_names(
    document: &Document,
    sets: &IndexMap<String, IndexSet<String>>,
) -> IndexMap<String, String> {
    let mut taken: IndexSet<String> = sets.keys().cloned().collect();
    taken.extend(document.variables.iter().map(|variable| variable.name.clone()));
    taken.extend(document.constraints.iter().map(|constraint| constraint.name.clone()));
    for expression in &document.decision_expressions {
        taken.insert(expression.name.clone());
        taken.insert(format!("{}_def", expression.name));
    }

    let mut parameters = IndexMap::new();
    for entity in document.data.keys() {
        let mut name = entity.clone();
        while taken.contains(&name) {
            name.push_str("_data");
        }
        taken.insert(name.clone());
        parameters.insert(entity.clone(), name);
    }
    parameters
}

/// Labels of a record's index fields, in field order.
pub fn record_labels(
    entity: &str,
    fields: &[String],
    record: &Record,
) -> Result<Vec<String>, InterchangeError> {
    fields
        .iter()
        .map(|field| match record.get(field) {
            Some(Cell::Label(label)) => Ok(label.clone()),
            _ => Err(InterchangeError::InvalidShape {
                reason: format!("a record of '{entity}' has no label for '{field}'"),
            }),
        })
        .collect()
}
