use thiserror::Error;

/// An environment variable that is set but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failures while turning a catalog file into [`crate::ProductSpec`] records.
///
/// All variants are fatal for a cycle: the catalog is a precondition of the
/// watcher, not something that can be partially trusted.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog entry on line {line_number} (\"{line}\"): {reason}")]
    Format {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("no products found in catalog")]
    Empty,
}
