//! Error types for statement rendering.

/// Errors that can occur while rendering a statement.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Identity retrieval was requested for a table without exactly one identity field.
    #[error("Identity field must be defined for '{table}'")]
    MissingIdentityField {
        /// Physical name of the target table.
        table: String,
    },

    /// An identity command was requested but the command plan recorded no identity field.
    #[error("No identity field was recorded for the statement on '{table}'")]
    IdentityNotRecorded {
        /// Physical name of the target table.
        table: String,
    },

    /// The recorded identity field does not belong to the statement being rendered.
    #[error("Identity field '{field}' was not recorded for '{target}'")]
    IdentityMismatch {
        /// The recorded identity field.
        field: String,
        /// The table (or statement kind) being rendered.
        target: String,
    },

    /// A command index outside the computed command count.
    #[error("Command {index} is out of range for a sequence of {count} command(s)")]
    CommandOutOfRange {
        /// Requested command index (0-based).
        index: usize,
        /// Number of commands in the plan.
        count: usize,
    },

    /// The dialect cannot express the requested construct.
    #[error("{feature} is not supported by the '{dialect}' dialect")]
    Unsupported {
        /// Description of the construct.
        feature: String,
        /// Dialect name.
        dialect: &'static str,
    },

    /// Invalid renderer configuration.
    #[error("Invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
