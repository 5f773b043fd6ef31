//! In-memory model provider built from a JSON model dump.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::ids::{DomainId, LabelId, SymbolId};
use crate::provider::{DictSymbol, Dictionary, IndexTuple, ModelProvider, NativeSymbolType, Nonzero};
use crate::types::{Bounds, ModelClass, ObjectiveSense, VarKind};

fn default_true() -> bool {
    true
}

fn default_col_type() -> char {
    'X'
}

/// Serialized form of a model with its dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default)]
    pub class: ModelClass,
    pub objective: ObjectiveSpec,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<SymbolSpec>,
    #[serde(default)]
    pub rows: Vec<RowSpec>,
    #[serde(default)]
    pub cols: Vec<ColSpec>,
    /// `false` simulates a model loaded without its dictionary.
    #[serde(default = "default_true")]
    pub dictionary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectiveSpec {
    pub name: String,
    #[serde(default)]
    pub sense: ObjectiveSense,
    #[serde(default)]
    pub nonzeros: Vec<NonzeroSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolTypeSpec {
    Variable,
    Equation,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolTypeSpec,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NonzeroSpec {
    /// Model-space column.
    pub col: usize,
    pub value: f64,
    #[serde(default)]
    pub nonlinear: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowSpec {
    pub symbol: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub rhs: f64,
    pub sense: char,
    #[serde(default)]
    pub nonzeros: Vec<NonzeroSpec>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColSpec {
    pub symbol: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Absent means the type's default (0 for binaries, -inf otherwise).
    #[serde(default)]
    pub lower: Option<f64>,
    /// Absent means the type's default (1 for binaries, +inf otherwise).
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(rename = "type", default = "default_col_type")]
    pub kind: char,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone)]
struct StoredRow {
    tuple: IndexTuple,
    rhs: f64,
    sense: char,
    nonzeros: Vec<Nonzero>,
}

#[derive(Debug, Clone)]
struct StoredCol {
    tuple: IndexTuple,
    bounds: Bounds,
    kind: char,
}

/// Fully indexed model that implements both [`ModelProvider`] and [`Dictionary`].
#[derive(Debug, Clone)]
pub struct InMemoryModel {
    name: String,
    class: ModelClass,
    objective_name: String,
    objective_sense: ObjectiveSense,
    objective: Vec<Nonzero>,
    domains: Vec<String>,
    labels: IndexSet<String>,
    symbols: Vec<DictSymbol>,
    offsets: Vec<Option<usize>>,
    rows: Vec<StoredRow>,
    cols: Vec<StoredCol>,
    row_to_solver: Vec<Option<usize>>,
    solver_to_row: Vec<usize>,
    col_to_solver: Vec<Option<usize>>,
    solver_to_col: Vec<usize>,
    has_dictionary: bool,
}

impl InMemoryModel {
    /// Parse and index a JSON model dump.
    pub fn from_json(text: &str) -> Result<Self, ConvertError> {
        let spec: ModelSpec = serde_json::from_str(text)
            .map_err(|err| ConvertError::invalid(format!("model file is not valid: {err}")))?;
        Self::from_spec(spec)
    }

    /// Build the indexed model, validating cross references.
    pub fn from_spec(spec: ModelSpec) -> Result<Self, ConvertError> {
        let ModelSpec {
            name,
            class,
            objective,
            domains,
            symbols,
            rows,
            cols,
            dictionary,
        } = spec;

        let domain_ids: HashMap<&str, DomainId> = domains
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), DomainId::new(idx as u32 + 1)))
            .collect();
        if domain_ids.len() != domains.len() {
            return Err(ConvertError::invalid("domain names must be unique"));
        }

        let mut symbol_ids: HashMap<String, SymbolId> = HashMap::with_capacity(symbols.len());
        let mut dict_symbols = Vec::with_capacity(symbols.len());
        for (idx, symbol) in symbols.into_iter().enumerate() {
            let id = SymbolId::new(idx as u32 + 1);
            if symbol_ids.insert(symbol.name.clone(), id).is_some() {
                return Err(ConvertError::invalid(format!(
                    "symbol '{}' declared twice",
                    symbol.name
                )));
            }
            let mut resolved = Vec::with_capacity(symbol.domains.len());
            for domain in &symbol.domains {
                let id = domain_ids.get(domain.as_str()).copied().ok_or_else(|| {
                    ConvertError::invalid(format!(
                        "symbol '{}' uses unknown domain '{domain}'",
                        symbol.name
                    ))
                })?;
                resolved.push(id);
            }
            dict_symbols.push(DictSymbol {
                name: symbol.name,
                text: symbol.text,
                kind: match symbol.kind {
                    SymbolTypeSpec::Variable => NativeSymbolType::Variable,
                    SymbolTypeSpec::Equation => NativeSymbolType::Equation,
                    SymbolTypeSpec::Other => NativeSymbolType::Other,
                },
                domains: resolved,
            });
        }

        let mut labels: IndexSet<String> = IndexSet::new();
        let mut offsets: Vec<Option<usize>> = vec![None; dict_symbols.len()];
        let mut last_owner: Option<SymbolId> = None;

        // Columns first so that row nonzeros can be validated against them.
        let mut stored_cols = Vec::with_capacity(cols.len());
        let mut col_to_solver = Vec::with_capacity(cols.len());
        let mut solver_to_col = Vec::new();
        for (idx, col) in cols.into_iter().enumerate() {
            let tuple = intern_tuple(
                &col.symbol,
                col.labels,
                NativeSymbolType::Variable,
                &symbol_ids,
                &dict_symbols,
                &mut labels,
            )?;
            record_offset(&mut offsets, &mut last_owner, tuple.symbol, idx, "column")?;
            let defaults = Bounds::default_for(VarKind::from_tag(col.kind));
            let bounds = Bounds::new(
                col.lower.unwrap_or(defaults.lower),
                col.upper.unwrap_or(defaults.upper),
            );
            if bounds.lower.is_nan() || bounds.upper.is_nan() {
                return Err(ConvertError::invalid(format!("column {idx} has NaN bounds")));
            }
            if col.active {
                col_to_solver.push(Some(solver_to_col.len()));
                solver_to_col.push(idx);
            } else {
                col_to_solver.push(None);
            }
            stored_cols.push(StoredCol {
                tuple,
                bounds,
                kind: col.kind,
            });
        }

        let convert_nonzeros = |nonzeros: Vec<NonzeroSpec>,
                                owner: &str|
         -> Result<Vec<Nonzero>, ConvertError> {
            nonzeros
                .into_iter()
                .map(|nz| {
                    if !nz.value.is_finite() {
                        return Err(ConvertError::invalid(format!(
                            "{owner} has a non-finite coefficient"
                        )));
                    }
                    let col = col_to_solver.get(nz.col).copied().flatten().ok_or_else(|| {
                        ConvertError::invalid(format!(
                            "{owner} references column {} which is missing or inactive",
                            nz.col
                        ))
                    })?;
                    Ok(Nonzero {
                        col,
                        value: nz.value,
                        nonlinear: nz.nonlinear,
                    })
                })
                .collect()
        };

        last_owner = None;
        let mut stored_rows = Vec::with_capacity(rows.len());
        let mut row_to_solver = Vec::with_capacity(rows.len());
        let mut solver_to_row = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            let tuple = intern_tuple(
                &row.symbol,
                row.labels,
                NativeSymbolType::Equation,
                &symbol_ids,
                &dict_symbols,
                &mut labels,
            )?;
            record_offset(&mut offsets, &mut last_owner, tuple.symbol, idx, "row")?;
            if row.rhs.is_nan() {
                return Err(ConvertError::invalid(format!("row {idx} has a NaN rhs")));
            }
            let nonzeros = if row.active {
                row_to_solver.push(Some(solver_to_row.len()));
                solver_to_row.push(idx);
                convert_nonzeros(row.nonzeros, &format!("row {idx}"))?
            } else {
                row_to_solver.push(None);
                Vec::new()
            };
            stored_rows.push(StoredRow {
                tuple,
                rhs: row.rhs,
                sense: row.sense,
                nonzeros,
            });
        }

        let objective_nonzeros = convert_nonzeros(objective.nonzeros, "objective")?;

        Ok(Self {
            name,
            class,
            objective_name: objective.name,
            objective_sense: objective.sense,
            objective: objective_nonzeros,
            domains,
            labels,
            symbols: dict_symbols,
            offsets,
            rows: stored_rows,
            cols: stored_cols,
            row_to_solver,
            solver_to_row,
            col_to_solver,
            solver_to_col,
            has_dictionary: dictionary,
        })
    }
}

fn intern_tuple(
    symbol: &str,
    row_labels: Vec<String>,
    expected: NativeSymbolType,
    symbol_ids: &HashMap<String, SymbolId>,
    symbols: &[DictSymbol],
    labels: &mut IndexSet<String>,
) -> Result<IndexTuple, ConvertError> {
    let id = symbol_ids
        .get(symbol)
        .copied()
        .ok_or_else(|| ConvertError::invalid(format!("unknown symbol '{symbol}'")))?;
    let info = &symbols[id.index() - 1];
    if info.kind != expected {
        return Err(ConvertError::invalid(format!(
            "symbol '{symbol}' has the wrong type for this entry"
        )));
    }
    if row_labels.len() != info.domains.len() {
        return Err(ConvertError::invalid(format!(
            "symbol '{symbol}' has dimension {} but an entry carries {} labels",
            info.domains.len(),
            row_labels.len()
        )));
    }
    let label_ids = row_labels
        .into_iter()
        .map(|label| LabelId::new(labels.insert_full(label).0 as u32))
        .collect();
    Ok(IndexTuple {
        symbol: id,
        labels: label_ids,
    })
}

fn record_offset(
    offsets: &mut [Option<usize>],
    last_owner: &mut Option<SymbolId>,
    owner: SymbolId,
    idx: usize,
    what: &str,
) -> Result<(), ConvertError> {
    if *last_owner == Some(owner) {
        return Ok(());
    }
    let slot = &mut offsets[owner.index() - 1];
    if slot.is_some() {
        return Err(ConvertError::invalid(format!(
            "{what} {idx}: instances of symbol {owner} must be contiguous"
        )));
    }
    *slot = Some(idx);
    *last_owner = Some(owner);
    Ok(())
}

impl Dictionary for InMemoryModel {
    fn domain_count(&self) -> usize {
        self.domains.len()
    }

    fn domain_name(&self, id: DomainId) -> Option<String> {
        id.index()
            .checked_sub(1)
            .and_then(|idx| self.domains.get(idx))
            .cloned()
    }

    fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    fn symbol(&self, id: SymbolId) -> Option<DictSymbol> {
        id.index()
            .checked_sub(1)
            .and_then(|idx| self.symbols.get(idx))
            .cloned()
    }

    fn symbol_offset(&self, id: SymbolId) -> Option<usize> {
        id.index()
            .checked_sub(1)
            .and_then(|idx| self.offsets.get(idx).copied().flatten())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.cols.len()
    }

    fn row_entry(&self, row: usize) -> Option<IndexTuple> {
        self.rows.get(row).map(|stored| stored.tuple.clone())
    }

    fn col_entry(&self, col: usize) -> Option<IndexTuple> {
        self.cols.get(col).map(|stored| stored.tuple.clone())
    }

    fn label_text(&self, label: LabelId) -> Option<String> {
        self.labels.get_index(label.index()).cloned()
    }
}

impl ModelProvider for InMemoryModel {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn class(&self) -> ModelClass {
        self.class.clone()
    }

    fn objective_name(&self) -> String {
        self.objective_name.clone()
    }

    fn objective_sense(&self) -> ObjectiveSense {
        self.objective_sense
    }

    fn row_count(&self) -> usize {
        self.solver_to_row.len()
    }

    fn col_count(&self) -> usize {
        self.solver_to_col.len()
    }

    fn row_nonzeros(&self, row: usize) -> Vec<Nonzero> {
        self.solver_to_row
            .get(row)
            .map(|&model_row| self.rows[model_row].nonzeros.clone())
            .unwrap_or_default()
    }

    fn objective_nonzeros(&self) -> Vec<Nonzero> {
        self.objective.clone()
    }

    fn col_bounds(&self, col: usize) -> Bounds {
        self.solver_to_col
            .get(col)
            .map(|&model_col| self.cols[model_col].bounds)
            .unwrap_or(Bounds::new(f64::NEG_INFINITY, f64::INFINITY))
    }

    fn col_type(&self, col: usize) -> char {
        self.solver_to_col
            .get(col)
            .map(|&model_col| self.cols[model_col].kind)
            .unwrap_or('?')
    }

    fn row_rhs(&self, row: usize) -> f64 {
        self.solver_to_row
            .get(row)
            .map(|&model_row| self.rows[model_row].rhs)
            .unwrap_or(0.0)
    }

    fn row_sense(&self, row: usize) -> char {
        self.solver_to_row
            .get(row)
            .map(|&model_row| self.rows[model_row].sense)
            .unwrap_or('?')
    }

    fn solver_row(&self, model_row: usize) -> Option<usize> {
        self.row_to_solver.get(model_row).copied().flatten()
    }

    fn solver_col(&self, model_col: usize) -> Option<usize> {
        self.col_to_solver.get(model_col).copied().flatten()
    }

    fn model_row(&self, solver_row: usize) -> usize {
        self.solver_to_row[solver_row]
    }

    fn model_col(&self, solver_col: usize) -> usize {
        self.solver_to_col[solver_col]
    }

    fn dictionary(&self) -> Option<&dyn Dictionary> {
        if self.has_dictionary {
            Some(self)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> ModelSpec {
        serde_json::from_value(value).expect("valid model spec")
    }

    fn small_model() -> serde_json::Value {
        json!({
            "name": "small",
            "objective": {"name": "z", "nonzeros": [{"col": 1, "value": 2.0}]},
            "domains": ["i"],
            "symbols": [
                {"name": "x", "type": "variable", "domains": ["i"]},
                {"name": "e", "type": "equation", "domains": ["i"]}
            ],
            "rows": [
                {"symbol": "e", "labels": ["a"], "rhs": 1.0, "sense": "E",
                 "nonzeros": [{"col": 0, "value": 1.0}]},
                {"symbol": "e", "labels": ["b"], "rhs": 2.0, "sense": "L",
                 "nonzeros": [{"col": 1, "value": 3.0}]}
            ],
            "cols": [
                {"symbol": "x", "labels": ["a"], "lower": 0.0},
                {"symbol": "x", "labels": ["b"], "type": "B"}
            ]
        })
    }

    #[test]
    fn from_spec_indexes_dictionary() {
        let model = InMemoryModel::from_spec(spec(small_model())).expect("model");
        assert_eq!(Dictionary::symbol_count(&model), 2);
        assert_eq!(model.domain_name(DomainId::new(1)).as_deref(), Some("i"));
        assert!(model.domain_name(DomainId::new(0)).is_none());
        assert_eq!(model.symbol_offset(SymbolId::new(1)), Some(0));
        assert_eq!(model.symbol_offset(SymbolId::new(2)), Some(0));

        let col = model.col_entry(1).expect("col 1");
        assert_eq!(col.symbol, SymbolId::new(1));
        assert_eq!(model.label_text(col.labels[0]).as_deref(), Some("b"));
        // Shared labels are interned once.
        assert_eq!(model.row_entry(0).unwrap().labels, model.col_entry(0).unwrap().labels);
    }

    #[test]
    fn binary_columns_default_to_unit_bounds() {
        let model = InMemoryModel::from_spec(spec(small_model())).expect("model");
        assert_eq!(model.col_bounds(1), Bounds::new(0.0, 1.0));
        assert_eq!(model.col_bounds(0).lower, 0.0);
        assert!(model.col_bounds(0).upper.is_infinite());
        assert_eq!(model.col_type(1), 'B');
    }

    #[test]
    fn inactive_entries_have_no_solver_index() {
        let mut value = small_model();
        value["cols"][1]["active"] = json!(false);
        value["rows"][1]["nonzeros"] = json!([]);
        value["objective"]["nonzeros"] = json!([]);
        let model = InMemoryModel::from_spec(spec(value)).expect("model");
        assert_eq!(ModelProvider::col_count(&model), 1);
        assert_eq!(model.solver_col(1), None);
        assert_eq!(model.solver_col(0), Some(0));
        assert_eq!(model.model_col(0), 0);
    }

    #[test]
    fn nonzero_on_inactive_column_is_rejected() {
        let mut value = small_model();
        value["cols"][1]["active"] = json!(false);
        let err = InMemoryModel::from_spec(spec(value)).unwrap_err();
        assert_eq!(err.code(), "MODEL_INVALID_DATA");
        assert!(err.to_string().contains("column 1"));
    }

    #[test]
    fn label_count_must_match_dimension() {
        let mut value = small_model();
        value["cols"][0]["labels"] = json!(["a", "b"]);
        let err = InMemoryModel::from_spec(spec(value)).unwrap_err();
        assert!(err.to_string().contains("dimension 1"));
    }

    #[test]
    fn symbol_instances_must_be_contiguous() {
        let mut value = small_model();
        value["symbols"]
            .as_array_mut()
            .unwrap()
            .push(json!({"name": "y", "type": "variable"}));
        value["cols"] = json!([
            {"symbol": "x", "labels": ["a"]},
            {"symbol": "y"},
            {"symbol": "x", "labels": ["b"]}
        ]);
        value["rows"] = json!([]);
        value["objective"]["nonzeros"] = json!([]);
        let err = InMemoryModel::from_spec(spec(value)).unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn missing_dictionary_flag_hides_dictionary() {
        let mut value = small_model();
        value["dictionary"] = json!(false);
        let model = InMemoryModel::from_spec(spec(value)).expect("model");
        assert!(model.dictionary().is_none());
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = InMemoryModel::from_json("{ not json").unwrap_err();
        assert_eq!(err.code(), "MODEL_INVALID_DATA");
    }
}
