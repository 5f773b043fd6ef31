//! `INPUT_DATA_MODEL` emission.

use mosdex_core::{BlockMap, ConvertError, Symbol, SymbolDirectory, SymbolKind};

use crate::document::{FieldType, INDEX_PREFIX, InputDataModel, RecordSchema, VALUE_FIELD};

/// Whether a symbol gets its own record type in the schema and data sections.
pub(crate) fn has_records(symbol: &Symbol) -> bool {
    matches!(symbol.kind, SymbolKind::Variable | SymbolKind::Constraint) && symbol.dim() > 0
}

/// Describe every indexed symbol and every coefficient block.
///
/// Variable positions of a block that correlate with an equation position get
/// no field; their label is implied by the equation's.
pub fn emit_schema(
    directory: &SymbolDirectory,
    blocks: &BlockMap,
) -> Result<InputDataModel, ConvertError> {
    let mut model = InputDataModel::new();

    for symbol in directory.symbols().filter(|symbol| has_records(symbol)) {
        let mut schema = RecordSchema::new();
        for pos in 0..symbol.dim() {
            schema.insert(index_key(directory, symbol, pos), FieldType::String);
        }
        match symbol.kind {
            SymbolKind::Variable => {
                schema.insert("lb".to_string(), FieldType::Double);
                schema.insert("ub".to_string(), FieldType::Double);
            }
            SymbolKind::Constraint => {
                schema.insert("rhs".to_string(), FieldType::Double);
            }
            _ => {}
        }
        model.insert(symbol.name.clone(), schema);
    }

    for block in blocks.values() {
        let key = block.key();
        let equation = directory.get(key.equation)?;
        let variable = directory.get(key.variable)?;

        let mut schema = RecordSchema::new();
        for pos in 0..equation.dim() {
            schema.insert(index_key(directory, equation, pos), FieldType::String);
        }
        for pos in block.free_positions() {
            schema.insert(index_key(directory, variable, pos), FieldType::String);
        }
        schema.insert(VALUE_FIELD.to_string(), FieldType::Double);
        model.insert(block.name(directory)?, schema);
    }

    Ok(model)
}

fn index_key(directory: &SymbolDirectory, symbol: &Symbol, pos: usize) -> String {
    format!("{INDEX_PREFIX}{}", directory.field_name(symbol, pos))
}
