//! Emitter configuration types.

/// Configuration options for modeling-language output.
#[derive(Debug, Clone, Default)]
pub struct GamsConfig {
    /// Close with `Model` and `Solve` statements. `None` means yes.
    pub solve_statement: Option<bool>,
    /// Start with a comment naming the source problem. `None` means yes.
    pub header: Option<bool>,
}

impl GamsConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the closing `Model`/`Solve` statements.
    pub fn with_solve_statement(mut self, enabled: bool) -> Self {
        self.solve_statement = Some(enabled);
        self
    }

    /// Enable or disable the header comment.
    pub fn with_header(mut self, enabled: bool) -> Self {
        self.header = Some(enabled);
        self
    }

    pub fn emits_solve_statement(&self) -> bool {
        self.solve_statement.unwrap_or(true)
    }

    pub fn emits_header(&self) -> bool {
        self.header.unwrap_or(true)
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.solve_statement.is_none() && self.header.is_none()
    }
}
