//! Renderer configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options fixed for the lifetime of a [`SqlProvider`](crate::SqlProvider).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Wrap table and field names in double quotes.
    pub quote_identifiers: bool,
}

impl RenderConfig {
    /// Creates the default configuration (no identifier quoting).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quote_identifiers: false,
        }
    }

    /// Enables or disables identifier quoting.
    #[must_use]
    pub const fn with_quote_identifiers(mut self, quote: bool) -> Self {
        self.quote_identifiers = quote;
        self
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`](crate::RenderError::Config) if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
