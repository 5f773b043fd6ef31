//! Symbol directory: every variable, constraint and objective symbol with its
//! declared domain sequence.

use crate::error::ConvertError;
use crate::ids::{DomainId, SymbolId};
use crate::provider::{Dictionary, ModelProvider, NativeSymbolType};
use crate::types::SymbolKind;

/// A named index set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
}

/// A variable, constraint or objective symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub text: String,
    pub kind: SymbolKind,
    pub domains: Vec<DomainId>,
}

impl Symbol {
    pub fn dim(&self) -> usize {
        self.domains.len()
    }

    pub fn is_ignored(&self) -> bool {
        self.kind == SymbolKind::Ignored
    }
}

/// All symbols of one conversion run, indexed by [`SymbolId`].
///
/// Slot 0 always holds the synthetic objective symbol.
#[derive(Debug, Clone)]
pub struct SymbolDirectory {
    domains: Vec<Domain>,
    symbols: Vec<Symbol>,
}

impl SymbolDirectory {
    /// Load domains and symbols from the provider's dictionary.
    pub fn load(provider: &dyn ModelProvider) -> Result<Self, ConvertError> {
        let dictionary = provider.dictionary().ok_or(ConvertError::MissingDictionary)?;

        let domain_count = dictionary.domain_count();
        let mut domains = Vec::with_capacity(domain_count);
        for idx in 1..=domain_count {
            let id = DomainId::new(idx as u32);
            let name = dictionary
                .domain_name(id)
                .ok_or_else(|| ConvertError::mismatch(format!("domain {id} has no name")))?;
            domains.push(Domain { id, name });
        }

        let symbol_count = dictionary.symbol_count();
        let mut symbols = Vec::with_capacity(symbol_count + 1);
        symbols.push(Symbol {
            id: SymbolId::OBJECTIVE,
            name: provider.objective_name(),
            text: String::new(),
            kind: SymbolKind::Objective,
            domains: Vec::new(),
        });

        for idx in 1..=symbol_count {
            let id = SymbolId::new(idx as u32);
            let info = dictionary
                .symbol(id)
                .ok_or_else(|| ConvertError::mismatch(format!("symbol {id} is missing")))?;
            if let Some(bad) = info
                .domains
                .iter()
                .find(|dom| dom.index() == 0 || dom.index() > domain_count)
            {
                return Err(ConvertError::mismatch(format!(
                    "symbol '{}' references unknown domain {bad}",
                    info.name
                )));
            }

            let mut kind = match info.kind {
                NativeSymbolType::Variable => SymbolKind::Variable,
                NativeSymbolType::Equation => SymbolKind::Constraint,
                NativeSymbolType::Other => SymbolKind::Ignored,
            };
            // Scalar symbols may have been reformulated away (e.g. the objective
            // variable and its defining equation) while staying in the dictionary.
            if info.domains.is_empty()
                && kind != SymbolKind::Ignored
                && !is_active_scalar(provider, dictionary, id, kind)
            {
                tracing::debug!(
                    component = "directory",
                    operation = "load",
                    status = "ignored",
                    symbol = info.name.as_str(),
                    "Scalar symbol not present in the solver model"
                );
                kind = SymbolKind::Ignored;
            }

            symbols.push(Symbol {
                id,
                name: info.name,
                text: info.text,
                kind,
                domains: info.domains,
            });
        }

        tracing::debug!(
            component = "directory",
            operation = "load",
            status = "success",
            domains = domains.len(),
            symbols = symbols.len(),
            "Loaded symbol directory"
        );

        Ok(Self { domains, symbols })
    }

    /// Number of symbols including the objective slot.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.iter()
    }

    /// Lookup a symbol, failing on ids the directory never saw.
    pub fn get(&self, id: SymbolId) -> Result<&Symbol, ConvertError> {
        self.symbols.get(id.index()).ok_or(ConvertError::SymbolOutOfRange {
            symbol: id,
            count: self.symbols.len(),
        })
    }

    pub fn objective(&self) -> &Symbol {
        &self.symbols[SymbolId::OBJECTIVE.index()]
    }

    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        id.index()
            .checked_sub(1)
            .and_then(|idx| self.domains.get(idx))
    }

    pub fn domain_name(&self, id: DomainId) -> &str {
        self.domain(id).map_or("*", |domain| domain.name.as_str())
    }

    /// Symbols of one kind, in directory order.
    pub fn of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |symbol| symbol.kind == kind)
    }

    /// Field name of a symbol's index position: `<domain>#<symbol>`.
    ///
    /// The symbol suffix keeps fields distinct when several symbols of one
    /// record range over the same domain. A domain repeated within one symbol
    /// gets its occurrence number appended (`i#link#2`).
    pub fn field_name(&self, symbol: &Symbol, pos: usize) -> String {
        let Some(id) = symbol.domains.get(pos) else {
            return format!("*#{}", symbol.name);
        };
        let domain = self.domain_name(*id);
        let occurrence = symbol.domains[..pos].iter().filter(|d| *d == id).count();
        if occurrence == 0 {
            format!("{domain}#{}", symbol.name)
        } else {
            format!("{domain}#{}#{}", symbol.name, occurrence + 1)
        }
    }
}

fn is_active_scalar(
    provider: &dyn ModelProvider,
    dictionary: &dyn Dictionary,
    id: SymbolId,
    kind: SymbolKind,
) -> bool {
    let Some(offset) = dictionary.symbol_offset(id) else {
        return false;
    };
    match kind {
        SymbolKind::Variable => provider
            .solver_col(offset)
            .is_some_and(|col| col < provider.col_count()),
        SymbolKind::Constraint => provider
            .solver_row(offset)
            .is_some_and(|row| row < provider.row_count()),
        _ => true,
    }
}
