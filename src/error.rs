use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dashboard core.
///
/// Filtering, aggregation and search never fail; only loading, filter
/// validation, export and configuration can.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset source is missing or malformed. Fatal at startup: no
    /// partial dataset is ever served.
    #[error("failed to load dataset from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A filter selection was rejected before being applied.
    #[error("invalid filter state: {0}")]
    InvalidFilterState(String),

    /// The filtered view could not be encoded for export.
    #[error("failed to encode export: {reason}")]
    Encoding { reason: String },

    #[error("invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Fold an `anyhow` chain from the loaders into a [`Error::Load`].
    pub(crate) fn load(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        Error::Load {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_keeps_the_whole_context_chain() {
        let inner = anyhow::anyhow!("row 3: 'abc' is not a year").context("parsing CSV");
        let err = Error::load("titles.csv", inner);
        let msg = err.to_string();
        assert!(msg.contains("titles.csv"), "{msg}");
        assert!(msg.contains("parsing CSV"), "{msg}");
        assert!(msg.contains("'abc' is not a year"), "{msg}");
    }
}
