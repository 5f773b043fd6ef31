//! Interfaces to the loaded model and its symbol dictionary.
//!
//! Row and column indices come in two spaces. *Model space* is the
//! dictionary's view: every declared equation/variable instance has an index.
//! *Solver space* is the reformulated matrix actually handed to a solver;
//! instances eliminated by reformulation have no solver index.

use crate::ids::{DomainId, LabelId, SymbolId};
use crate::types::{Bounds, ModelClass, ObjectiveSense};

/// Native symbol type recorded in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeSymbolType {
    Variable,
    Equation,
    Other,
}

/// A symbol as reported by the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictSymbol {
    pub name: String,
    pub text: String,
    pub kind: NativeSymbolType,
    pub domains: Vec<DomainId>,
}

/// Owner symbol and per-position labels of one row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTuple {
    pub symbol: SymbolId,
    pub labels: Vec<LabelId>,
}

/// One sparse matrix entry of a row (or of the objective).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nonzero {
    /// Solver-space column.
    pub col: usize,
    pub value: f64,
    pub nonlinear: bool,
}

/// Symbol dictionary of a loaded model.
///
/// Domain and symbol indices are 1-based; index 0 is never a dictionary entry.
pub trait Dictionary {
    fn domain_count(&self) -> usize;

    fn domain_name(&self, id: DomainId) -> Option<String>;

    fn symbol_count(&self) -> usize;

    fn symbol(&self, id: SymbolId) -> Option<DictSymbol>;

    /// First model-space row (equations) or column (variables) of a symbol.
    fn symbol_offset(&self, id: SymbolId) -> Option<usize>;

    /// Number of model-space rows.
    fn row_count(&self) -> usize;

    /// Number of model-space columns.
    fn col_count(&self) -> usize;

    fn row_entry(&self, row: usize) -> Option<IndexTuple>;

    fn col_entry(&self, col: usize) -> Option<IndexTuple>;

    fn label_text(&self, label: LabelId) -> Option<String>;
}

/// Matrix, bounds and index mapping of a loaded model.
pub trait ModelProvider {
    fn name(&self) -> String;

    fn class(&self) -> ModelClass;

    fn objective_name(&self) -> String;

    fn objective_sense(&self) -> ObjectiveSense;

    /// Number of solver-space rows.
    fn row_count(&self) -> usize;

    /// Number of solver-space columns.
    fn col_count(&self) -> usize;

    fn row_nonzeros(&self, row: usize) -> Vec<Nonzero>;

    fn objective_nonzeros(&self) -> Vec<Nonzero>;

    /// Model-space row that carries the objective, if the dictionary has one.
    fn objective_row(&self) -> Option<usize> {
        None
    }

    fn col_bounds(&self, col: usize) -> Bounds;

    /// Native column type tag (`X`, `B`, `I`, ...).
    fn col_type(&self, col: usize) -> char;

    fn row_rhs(&self, row: usize) -> f64;

    /// Native relational tag (`E`, `G`, `L`, `B`, ...).
    fn row_sense(&self, row: usize) -> char;

    fn solver_row(&self, model_row: usize) -> Option<usize>;

    fn solver_col(&self, model_col: usize) -> Option<usize>;

    fn model_row(&self, solver_row: usize) -> usize;

    fn model_col(&self, solver_col: usize) -> usize;

    fn minus_infinity(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn plus_infinity(&self) -> f64 {
        f64::INFINITY
    }

    fn dictionary(&self) -> Option<&dyn Dictionary>;
}
