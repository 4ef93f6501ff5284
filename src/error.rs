use thiserror::Error;

/// Errors for the few operations that can genuinely fail.
///
/// Malformed environment or flag *values* never surface here: they are
/// dropped or ignored and reported through
/// [`Registry::diagnostics`](crate::Registry::diagnostics) instead.
#[derive(Debug, Error)]
pub enum ClapsetError {
    #[cfg(feature = "clap")]
    #[error("Failed to parse command-line flags: {0}")]
    Cli(#[from] clap::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Record did not serialize to a table of fields")]
    NotATable,
}
