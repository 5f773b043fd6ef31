//! `DATA` emission: one record per symbol instance and per block entry.

use mosdex_core::correlate::resolve_entry_labels;
use mosdex_core::{
    BlockMap, Bounds, ConvertError, Dictionary, IndexTuple, LabelId, ModelProvider, Symbol,
    SymbolDirectory, SymbolKind, VarKind,
};

use crate::document::{Cell, Data, Record, VALUE_FIELD};
use crate::schema::has_records;

/// Bounds worth writing: sides equal to the kind's default are dropped.
///
/// Binaries default to `[0, 1]`, everything else to the provider's infinities.
pub(crate) fn explicit_bounds(
    kind: VarKind,
    bounds: Bounds,
    minus_infinity: f64,
    plus_infinity: f64,
) -> (Option<f64>, Option<f64>) {
    let (lower_default, upper_default) = match kind {
        VarKind::Binary => (0.0, 1.0),
        _ => (minus_infinity, plus_infinity),
    };
    (
        (bounds.lower != lower_default).then_some(bounds.lower),
        (bounds.upper != upper_default).then_some(bounds.upper),
    )
}

/// Emit symbol instance records, then coefficient records, in schema order.
pub fn emit_data(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
    blocks: &BlockMap,
) -> Result<Data, ConvertError> {
    let mut data = Data::new();

    for symbol in directory.symbols().filter(|symbol| has_records(symbol)) {
        let records = symbol_records(provider, dictionary, directory, symbol)?;
        data.insert(symbol.name.clone(), records);
    }

    for block in blocks.values() {
        let key = block.key();
        let equation = directory.get(key.equation)?;
        let variable = directory.get(key.variable)?;
        let free: Vec<usize> = block.free_positions().collect();
        let labels = resolve_entry_labels(block, dictionary, directory)?;

        let mut records = Vec::with_capacity(block.entries().len());
        for (entry, entry_labels) in block.entries().iter().zip(&labels) {
            let mut record = Record::new();
            for pos in 0..equation.dim() {
                record.insert(
                    directory.field_name(equation, pos),
                    Cell::Label(label_text(dictionary, entry_labels.row[pos])?),
                );
            }
            for &pos in &free {
                record.insert(
                    directory.field_name(variable, pos),
                    Cell::Label(label_text(dictionary, entry_labels.col[pos])?),
                );
            }
            record.insert(VALUE_FIELD.to_string(), Cell::Number(entry.value));
            records.push(record);
        }
        data.insert(block.name(directory)?, records);
    }

    Ok(data)
}

fn symbol_records(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
    symbol: &Symbol,
) -> Result<Vec<Record>, ConvertError> {
    let Some(offset) = dictionary.symbol_offset(symbol.id) else {
        return Ok(Vec::new());
    };
    let is_variable = symbol.kind == SymbolKind::Variable;
    let mut records = Vec::new();

    for idx in offset.. {
        let tuple = if is_variable {
            dictionary.col_entry(idx)
        } else {
            dictionary.row_entry(idx)
        };
        let Some(IndexTuple { symbol: owner, labels }) = tuple else {
            break;
        };
        if owner != symbol.id {
            break;
        }
        if labels.len() != symbol.dim() {
            return Err(ConvertError::DictionaryMismatch {
                reason: format!(
                    "instance {idx} of '{}' carries {} labels",
                    symbol.name,
                    labels.len()
                ),
            });
        }

        let solver_index = if is_variable {
            provider.solver_col(idx)
        } else {
            provider.solver_row(idx)
        };
        let Some(solver_index) = solver_index else {
            tracing::warn!(
                component = "data",
                operation = "emit",
                status = "skipped",
                symbol = symbol.name.as_str(),
                instance = idx,
                "Instance has no solver index"
            );
            continue;
        };

        let mut record = Record::new();
        for (pos, label) in labels.iter().enumerate() {
            record.insert(
                directory.field_name(symbol, pos),
                Cell::Label(label_text(dictionary, *label)?),
            );
        }
        if is_variable {
            let kind = VarKind::from_tag(provider.col_type(solver_index));
            let (lower, upper) = explicit_bounds(
                kind,
                provider.col_bounds(solver_index),
                provider.minus_infinity(),
                provider.plus_infinity(),
            );
            if let Some(lower) = lower {
                record.insert("lb".to_string(), Cell::Number(lower));
            }
            if let Some(upper) = upper {
                record.insert("ub".to_string(), Cell::Number(upper));
            }
        } else {
            record.insert(
                "rhs".to_string(),
                Cell::Number(provider.row_rhs(solver_index)),
            );
        }
        records.push(record);
    }

    Ok(records)
}

fn label_text(dictionary: &dyn Dictionary, label: LabelId) -> Result<String, ConvertError> {
    dictionary
        .label_text(label)
        .ok_or_else(|| ConvertError::DictionaryMismatch {
            reason: format!("label {label} has no text"),
        })
}
