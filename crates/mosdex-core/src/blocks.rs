//! Coefficient blocks: nonzeros grouped by (equation symbol, variable symbol).

use std::collections::BTreeMap;
use std::time::Instant;

use crate::directory::SymbolDirectory;
use crate::error::ConvertError;
use crate::ids::SymbolId;
use crate::provider::{Dictionary, ModelProvider};

/// Identity of a coefficient block.
///
/// Ordering is lexicographic on (equation, variable), which fixes emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
    pub equation: SymbolId,
    pub variable: SymbolId,
}

impl BlockKey {
    pub fn new(equation: SymbolId, variable: SymbolId) -> Self {
        Self { equation, variable }
    }
}

/// One nonzero of a block, in model-space indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// Model-space row; `None` for the objective row.
    pub row: Option<usize>,
    pub col: usize,
    pub value: f64,
}

/// All nonzeros pairing one equation symbol with one variable symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientBlock {
    key: BlockKey,
    entries: Vec<Entry>,
    // variable position -> equation position with identical labels
    pub(crate) correlates_to: Vec<Option<usize>>,
}

impl CoefficientBlock {
    pub(crate) fn new(key: BlockKey, var_dim: usize) -> Self {
        Self {
            key,
            entries: Vec::new(),
            correlates_to: vec![None; var_dim],
        }
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn key(&self) -> BlockKey {
        self.key
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// For each variable position, the equation position it always equals.
    pub fn correlates_to(&self) -> &[Option<usize>] {
        &self.correlates_to
    }

    pub fn is_correlated(&self, var_pos: usize) -> bool {
        self.correlates_to.get(var_pos).is_some_and(Option::is_some)
    }

    /// Variable positions that keep their own index field.
    pub fn free_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.correlates_to
            .iter()
            .enumerate()
            .filter_map(|(pos, target)| target.is_none().then_some(pos))
    }

    /// Record name: `coef_<equation>_<variable>`.
    pub fn name(&self, directory: &SymbolDirectory) -> Result<String, ConvertError> {
        let equation = directory.get(self.key.equation)?;
        let variable = directory.get(self.key.variable)?;
        Ok(format!("coef_{}_{}", equation.name, variable.name))
    }
}

/// Blocks of one model, iterated in key order.
pub type BlockMap = BTreeMap<BlockKey, CoefficientBlock>;

/// Scan every solver row and the objective, grouping nonzeros into blocks.
pub fn build_blocks(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<BlockMap, ConvertError> {
    let started = Instant::now();
    let mut blocks = BlockMap::new();
    let mut entries = 0usize;

    for solver_row in 0..provider.row_count() {
        let row = provider.model_row(solver_row);
        let equation = dictionary
            .row_entry(row)
            .ok_or_else(|| ConvertError::mismatch(format!("row {row} is not in the dictionary")))?
            .symbol;
        directory.get(equation)?;

        for nonzero in provider.row_nonzeros(solver_row) {
            let col = provider.model_col(nonzero.col);
            if nonzero.nonlinear {
                return Err(ConvertError::NonlinearCoefficient { row, col });
            }
            let variable = owner_of_col(dictionary, col)?;
            let block = block_for(&mut blocks, directory, BlockKey::new(equation, variable))?;
            block.push(Entry {
                row: Some(row),
                col,
                value: nonzero.value,
            });
            entries += 1;
        }
    }

    let objective_row = provider.objective_row();
    for nonzero in provider.objective_nonzeros() {
        let col = provider.model_col(nonzero.col);
        let variable = owner_of_col(dictionary, col)?;
        let block = block_for(
            &mut blocks,
            directory,
            BlockKey::new(SymbolId::OBJECTIVE, variable),
        )?;
        block.push(Entry {
            row: objective_row,
            col,
            value: nonzero.value,
        });
        entries += 1;
    }

    tracing::debug!(
        component = "blocks",
        operation = "build",
        status = "success",
        blocks = blocks.len(),
        entries,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Grouped nonzeros into coefficient blocks"
    );

    Ok(blocks)
}

fn owner_of_col(dictionary: &dyn Dictionary, col: usize) -> Result<SymbolId, ConvertError> {
    dictionary
        .col_entry(col)
        .map(|tuple| tuple.symbol)
        .ok_or_else(|| ConvertError::mismatch(format!("column {col} is not in the dictionary")))
}

fn block_for<'a>(
    blocks: &'a mut BlockMap,
    directory: &SymbolDirectory,
    key: BlockKey,
) -> Result<&'a mut CoefficientBlock, ConvertError> {
    let var_dim = directory.get(key.variable)?.dim();
    directory.get(key.equation)?;
    Ok(blocks
        .entry(key)
        .or_insert_with(|| CoefficientBlock::new(key, var_dim)))
}
