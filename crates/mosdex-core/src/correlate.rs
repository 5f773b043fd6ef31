//! Domain correlation within coefficient blocks.
//!
//! A variable index position correlates with an equation index position when
//! both range over the same domain and every entry of the block binds the
//! same label to them. Correlated positions need not be stored per record.

use crate::blocks::{BlockMap, CoefficientBlock, Entry};
use crate::directory::SymbolDirectory;
use crate::error::ConvertError;
use crate::ids::{LabelId, SymbolId};
use crate::provider::{Dictionary, IndexTuple};

/// Row and column labels of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLabels {
    pub row: Vec<LabelId>,
    pub col: Vec<LabelId>,
}

/// Resolve the label tuples of every entry of a block.
///
/// Each tuple must be owned by the block's symbol and carry at least that
/// symbol's dimension worth of labels.
pub fn resolve_entry_labels(
    block: &CoefficientBlock,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<Vec<EntryLabels>, ConvertError> {
    let key = block.key();
    let row_dim = directory.get(key.equation)?.dim();
    let col_dim = directory.get(key.variable)?.dim();

    block
        .entries()
        .iter()
        .map(|entry| {
            let row = match entry.row {
                Some(row) if row_dim > 0 => labels_of(
                    dictionary.row_entry(row),
                    key.equation,
                    row_dim,
                    "row",
                    row,
                )?,
                _ => Vec::new(),
            };
            let col = if col_dim > 0 {
                labels_of(
                    dictionary.col_entry(entry.col),
                    key.variable,
                    col_dim,
                    "column",
                    entry.col,
                )?
            } else {
                Vec::new()
            };
            if row.len() < row_dim {
                return Err(objective_mismatch(entry));
            }
            Ok(EntryLabels { row, col })
        })
        .collect()
}

fn labels_of(
    tuple: Option<IndexTuple>,
    owner: SymbolId,
    dim: usize,
    what: &str,
    index: usize,
) -> Result<Vec<LabelId>, ConvertError> {
    let tuple = tuple
        .ok_or_else(|| ConvertError::mismatch(format!("{what} {index} is not in the dictionary")))?;
    if tuple.symbol != owner {
        return Err(ConvertError::mismatch(format!(
            "{what} {index} belongs to symbol {} instead of {owner}",
            tuple.symbol
        )));
    }
    if tuple.labels.len() < dim {
        return Err(ConvertError::mismatch(format!(
            "{what} {index} carries {} labels for a {dim}-dimensional symbol",
            tuple.labels.len()
        )));
    }
    Ok(tuple.labels)
}

fn objective_mismatch(entry: &Entry) -> ConvertError {
    ConvertError::mismatch(format!(
        "objective entry at column {} has no row labels",
        entry.col
    ))
}

/// Fill `correlates_to` for one block. Returns the number of correlated positions.
pub fn analyze(
    block: &mut CoefficientBlock,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<usize, ConvertError> {
    let key = block.key();
    let row_domains = &directory.get(key.equation)?.domains;
    let col_domains = &directory.get(key.variable)?.domains;

    // Labels are only needed when some pair of positions shares a domain.
    if !col_domains.iter().any(|domain| row_domains.contains(domain)) {
        return Ok(0);
    }
    let labels = resolve_entry_labels(block, dictionary, directory)?;
    let mut correlated = 0usize;

    for (c, col_domain) in col_domains.iter().enumerate() {
        for (r, row_domain) in row_domains.iter().enumerate() {
            if row_domain != col_domain {
                continue;
            }
            if labels.iter().all(|entry| entry.row[r] == entry.col[c]) {
                block.correlates_to[c] = Some(r);
                correlated += 1;
                break;
            }
        }
    }

    Ok(correlated)
}

/// Correlate every block of the map.
pub fn analyze_all(
    blocks: &mut BlockMap,
    dictionary: &dyn Dictionary,
    directory: &SymbolDirectory,
) -> Result<(), ConvertError> {
    let mut correlated = 0usize;
    for block in blocks.values_mut() {
        correlated += analyze(block, dictionary, directory)?;
    }
    tracing::debug!(
        component = "correlate",
        operation = "analyze_all",
        status = "success",
        blocks = blocks.len(),
        correlated,
        "Correlated block index positions"
    );
    Ok(())
}
