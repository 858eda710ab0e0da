use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::error::DashboardError;

use super::loader::load_file;
use super::model::Dataset;

/// Owns the dataset for one dashboard session.
///
/// The file is read on first access only. Later calls hand out the same
/// dataset (or the same load error) until the session is dropped.
#[derive(Debug)]
pub struct DataSession {
    path: PathBuf,
    dataset: OnceCell<Result<Dataset, DashboardError>>,
}

impl DataSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DataSession {
            path: path.into(),
            dataset: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the load has already run (successfully or not).
    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset, &DashboardError> {
        self.dataset
            .get_or_init(|| load_dataset(&self.path))
            .as_ref()
    }
}

fn load_dataset(path: &Path) -> Result<Dataset, DashboardError> {
    match load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} samples from {} covering {} locations",
                dataset.len(),
                path.display(),
                dataset.locations.len()
            );
            Ok(dataset)
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            Err(DashboardError::data_unavailable(path, &e))
        }
    }
}
