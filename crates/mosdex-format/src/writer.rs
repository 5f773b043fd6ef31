//! Document assembly and pretty printing.

use std::time::Instant;

use mosdex_core::{Conversion, ModelProvider};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::data::emit_data;
use crate::descriptors::{emit_coefficients, emit_constraints, emit_expressions, emit_variables};
use crate::document::{Document, Problem};
use crate::error::InterchangeError;
use crate::schema::emit_schema;

const DEFAULT_INDENT: usize = 4;

/// Configuration options for document output.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Spaces per nesting level. `None` uses 4.
    pub indent: Option<usize>,
    /// Terminate the output with a newline. `None` means yes.
    pub trailing_newline: Option<bool>,
}

impl WriterConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent width.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Enable or disable the trailing newline.
    pub fn with_trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = Some(enabled);
        self
    }

    pub fn indent_width(&self) -> usize {
        self.indent.unwrap_or(DEFAULT_INDENT)
    }

    pub fn ends_with_newline(&self) -> bool {
        self.trailing_newline.unwrap_or(true)
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.indent.is_none() && self.trailing_newline.is_none()
    }
}

/// Assemble the interchange document of an analyzed model.
pub fn build_document(conversion: &Conversion<'_>) -> Result<Document, InterchangeError> {
    let provider = conversion.provider();
    let dictionary = conversion.dictionary();
    let directory = conversion.directory();
    let blocks = conversion.blocks();

    Ok(Document {
        problem: Problem {
            name: provider.name(),
        },
        input_data_model: emit_schema(directory, blocks)?,
        data: emit_data(provider, dictionary, directory, blocks)?,
        variables: emit_variables(provider, dictionary, directory)?,
        constraints: emit_constraints(provider, dictionary, directory)?,
        decision_expressions: emit_expressions(provider, directory),
        coefficients: emit_coefficients(directory, blocks)?,
    })
}

/// Serialize a document with the configured indentation.
pub fn to_json_string(
    document: &Document,
    config: &WriterConfig,
) -> Result<String, InterchangeError> {
    let indent = vec![b' '; config.indent_width()];
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
    document
        .serialize(&mut serializer)
        .map_err(|err| InterchangeError::Serialize {
            reason: err.to_string(),
        })?;

    let mut text = String::from_utf8(buffer).map_err(|err| InterchangeError::Serialize {
        reason: err.to_string(),
    })?;
    if config.ends_with_newline() {
        text.push('\n');
    }
    Ok(text)
}

/// Analyze a model and print its interchange document.
pub fn convert(
    provider: &dyn ModelProvider,
    config: &WriterConfig,
) -> Result<String, InterchangeError> {
    let started = Instant::now();
    let conversion = Conversion::analyze(provider)?;
    let document = build_document(&conversion)?;
    let text = to_json_string(&document, config)?;

    tracing::info!(
        component = "writer",
        operation = "convert",
        status = "success",
        records = document.data.values().map(Vec::len).sum::<usize>(),
        bytes = text.len(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Wrote interchange document"
    );

    Ok(text)
}
