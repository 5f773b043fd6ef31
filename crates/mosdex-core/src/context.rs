//! Per-run conversion state.

use std::time::Instant;

use crate::blocks::{BlockMap, build_blocks};
use crate::correlate::analyze_all;
use crate::directory::SymbolDirectory;
use crate::error::ConvertError;
use crate::ids::LabelId;
use crate::provider::{Dictionary, ModelProvider};

/// Everything derived from one provider during a forward conversion.
///
/// Borrowing the provider ties the directory and blocks to the run that
/// produced them; nothing outlives the provider handle.
pub struct Conversion<'p> {
    provider: &'p dyn ModelProvider,
    dictionary: &'p dyn Dictionary,
    directory: SymbolDirectory,
    blocks: BlockMap,
}

impl<'p> Conversion<'p> {
    /// Load the directory, build the blocks and correlate them.
    pub fn analyze(provider: &'p dyn ModelProvider) -> Result<Self, ConvertError> {
        let started = Instant::now();
        let class = provider.class();
        if !class.is_supported() {
            return Err(ConvertError::UnsupportedModelClass {
                class: class.as_str().to_string(),
            });
        }
        let dictionary = provider.dictionary().ok_or(ConvertError::MissingDictionary)?;

        let directory = SymbolDirectory::load(provider)?;
        let mut blocks = build_blocks(provider, dictionary, &directory)?;
        analyze_all(&mut blocks, dictionary, &directory)?;

        tracing::info!(
            component = "conversion",
            operation = "analyze",
            status = "success",
            model = provider.name().as_str(),
            rows = provider.row_count(),
            cols = provider.col_count(),
            blocks = blocks.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Analyzed model"
        );

        Ok(Self {
            provider,
            dictionary,
            directory,
            blocks,
        })
    }

    pub fn provider(&self) -> &'p dyn ModelProvider {
        self.provider
    }

    pub fn dictionary(&self) -> &'p dyn Dictionary {
        self.dictionary
    }

    pub fn directory(&self) -> &SymbolDirectory {
        &self.directory
    }

    pub fn blocks(&self) -> &BlockMap {
        &self.blocks
    }

    /// Resolve a label id to its text, failing when the dictionary lost it.
    pub fn label(&self, label: LabelId) -> Result<String, ConvertError> {
        self.dictionary
            .label_text(label)
            .ok_or_else(|| ConvertError::mismatch(format!("label {label} has no text")))
    }
}

impl std::fmt::Debug for Conversion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversion")
            .field("model", &self.provider.name())
            .field("symbols", &self.directory.len())
            .field("blocks", &self.blocks.len())
            .finish()
    }
}
