//! Model analysis for MOSDEX conversion.
//!
//! A [`Conversion`] loads the [`SymbolDirectory`] from a [`ModelProvider`],
//! groups the matrix into [`CoefficientBlock`]s and correlates each block's
//! variable index positions with its equation index positions.

pub mod blocks;
pub mod context;
pub mod correlate;
pub mod directory;
pub mod error;
pub mod ids;
pub mod memory;
pub mod provider;
pub mod types;

pub use blocks::{BlockKey, BlockMap, CoefficientBlock, Entry};
pub use context::Conversion;
pub use directory::{Domain, Symbol, SymbolDirectory};
pub use error::ConvertError;
pub use ids::{DomainId, LabelId, SymbolId};
pub use memory::{InMemoryModel, ModelSpec};
pub use provider::{DictSymbol, Dictionary, IndexTuple, ModelProvider, NativeSymbolType, Nonzero};
pub use types::{Bounds, ConstraintSense, ModelClass, ObjectiveSense, SymbolKind, VarKind};
