use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use super::loader::load_file;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// DatasetSource – load-once holder for the KPI table
// ---------------------------------------------------------------------------

/// Owns the input path and the table read from it.
///
/// The file is read on the first [`get_or_load`](Self::get_or_load) call and
/// never again: later calls hand out the same `Arc`. There is no refresh
/// path. `main` builds exactly one source at startup.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    dataset: OnceCell<Arc<Dataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dataset: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has been read already.
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn get_or_load(&self) -> Result<Arc<Dataset>> {
        if let Some(ds) = self.dataset.get() {
            return Ok(Arc::clone(ds));
        }
        let loaded = load_file(&self.path)
            .with_context(|| format!("loading {}", self.path.display()))?;
        log::info!(
            "Loaded {} customers with columns {:?}",
            loaded.len(),
            loaded.column_names
        );
        Ok(Arc::clone(self.dataset.get_or_init(|| Arc::new(loaded))))
    }
}
