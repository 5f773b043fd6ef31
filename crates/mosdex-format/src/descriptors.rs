//! `VARIABLES`, `CONSTRAINTS`, `DECISION_EXPRESSIONS` and `COEFFICIENTS`.

use mosdex_core::{
    BlockMap, CoefficientBlock, ConstraintSense, ConvertError, Dictionary, ModelProvider, Symbol,
    SymbolDirectory, SymbolKind, VarKind,
};

use crate::data::explicit_bounds;
use crate::document::{
    BoundsSpec, CoefficientDescriptor, ConstraintDescriptor, ExpressionDescriptor, LINEAR,
    SELF_INDEX, VALUE_FIELD, Value, VariableDescriptor,
};
use crate::reference::{Condition, Equality, FieldRef};

fn index_of(symbol: &Symbol) -> String {
    if symbol.dim() > 0 {
        symbol.name.clone()
    } else {
        SELF_INDEX.to_string()
    }
}

/// First solver-space column (or row) among a symbol's instances.
fn first_solver_index(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    symbol: &Symbol,
) -> Result<usize, ConvertError> {
    let is_variable = symbol.kind == SymbolKind::Variable;
    let offset = dictionary
        .symbol_offset(symbol.id)
        .ok_or_else(|| ConvertError::DictionaryMismatch {
            reason: format!("symbol '{}' has no instances", symbol.name),
        })?;

    for idx in offset.. {
        let owner = if is_variable {
            dictionary.col_entry(idx)
        } else {
            dictionary.row_entry(idx)
        };
        if owner.is_none_or(|tuple| tuple.symbol != symbol.id) {
            break;
        }
        let mapped = if is_variable {
            provider.solver_col(idx)
        } else {
            provider.solver_row(idx)
        };
        if let Some(mapped) = mapped {
            return Ok(mapped);
        }
    }

    Err(ConvertError::DictionaryMismatch {
        reason: format!("symbol '{}' has no instance in the solver model", symbol.name),
    })
}

/// One descriptor per variable symbol; the type comes from its first instance.
pub fn emit_variables(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<Vec<VariableDescriptor>, ConvertError> {
    let mut descriptors = Vec::new();
    for symbol in directory.of_kind(SymbolKind::Variable) {
        let col = first_solver_index(provider, dictionary, symbol)?;
        let tag = provider.col_type(col);
        let kind = VarKind::from_tag(tag);
        if kind == VarKind::Unsupported {
            tracing::warn!(
                component = "descriptors",
                operation = "emit_variables",
                status = "unsupported",
                symbol = symbol.name.as_str(),
                tag = %tag,
                "Unsupported variable type"
            );
        }

        let bounds = if symbol.dim() > 0 {
            BoundsSpec {
                lower: Some(Value::Reference(format!("{}.lb", symbol.name))),
                upper: Some(Value::Reference(format!("{}.ub", symbol.name))),
            }
        } else {
            let (lower, upper) = explicit_bounds(
                kind,
                provider.col_bounds(col),
                provider.minus_infinity(),
                provider.plus_infinity(),
            );
            BoundsSpec {
                lower: lower.map(Value::Number),
                upper: upper.map(Value::Number),
            }
        };

        descriptors.push(VariableDescriptor {
            name: symbol.name.clone(),
            index: index_of(symbol),
            kind,
            bounds,
        });
    }
    Ok(descriptors)
}

/// One descriptor per constraint symbol; the sense comes from its first instance.
pub fn emit_constraints(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<Vec<ConstraintDescriptor>, ConvertError> {
    let mut descriptors = Vec::new();
    for symbol in directory.of_kind(SymbolKind::Constraint) {
        let row = first_solver_index(provider, dictionary, symbol)?;
        let tag = provider.row_sense(row);
        let sense = ConstraintSense::from_tag(tag);
        if sense == ConstraintSense::Unsupported {
            tracing::warn!(
                component = "descriptors",
                operation = "emit_constraints",
                status = "unsupported",
                symbol = symbol.name.as_str(),
                tag = %tag,
                "Unsupported equation type"
            );
        }

        let rhs = if symbol.dim() > 0 {
            Value::Reference(format!("{}.rhs", symbol.name))
        } else {
            Value::Number(provider.row_rhs(row))
        };

        descriptors.push(ConstraintDescriptor {
            name: symbol.name.clone(),
            index: index_of(symbol),
            rhs: Some(rhs),
            sense: Some(sense),
            bounds: None,
            kind: LINEAR.to_string(),
        });
    }
    Ok(descriptors)
}

/// The objective as the single decision expression.
pub fn emit_expressions(
    provider: &dyn ModelProvider,
    directory: &SymbolDirectory,
) -> Vec<ExpressionDescriptor> {
    let objective = directory.objective();
    vec![ExpressionDescriptor {
        name: objective.name.clone(),
        index: SELF_INDEX.to_string(),
        sense: provider.objective_sense(),
        kind: LINEAR.to_string(),
    }]
}

/// Condition relating a block's correlated variable positions to equation positions.
pub fn block_condition(
    block: &CoefficientBlock,
    directory: &SymbolDirectory,
) -> Result<Condition, ConvertError> {
    let key = block.key();
    let equation = directory.get(key.equation)?;
    let variable = directory.get(key.variable)?;

    let terms = block
        .correlates_to()
        .iter()
        .enumerate()
        .filter_map(|(d, target)| target.map(|r| (d, r)))
        .map(|(d, r)| Equality {
            variable: FieldRef {
                entity: variable.name.clone(),
                field: directory.field_name(variable, d),
            },
            equation: FieldRef {
                entity: equation.name.clone(),
                field: directory.field_name(equation, r),
            },
        })
        .collect();
    Ok(Condition { terms })
}

/// One descriptor per block, in block order.
pub fn emit_coefficients(
    directory: &SymbolDirectory,
    blocks: &BlockMap,
) -> Result<Vec<CoefficientDescriptor>, ConvertError> {
    blocks
        .values()
        .map(|block| {
            let key = block.key();
            Ok(CoefficientDescriptor {
                constraint: directory.get(key.equation)?.name.clone(),
                variable: directory.get(key.variable)?.name.clone(),
                entries: format!("{}.{VALUE_FIELD}", block.name(directory)?),
                condition: block_condition(block, directory)?.to_string(),
            })
        })
        .collect()
}
