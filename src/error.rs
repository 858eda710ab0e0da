use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced to the dashboard window.
///
/// Loader internals work with `anyhow` and are flattened into `reason` at the
/// session boundary, so the message shown to the user carries the full
/// context chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Data unavailable ({}): {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Invalid configuration ({}): {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl DashboardError {
    pub fn data_unavailable(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        DashboardError::DataUnavailable {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}
