use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::WorkerError;
use crate::worker::job::ValidationJob;

pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Collects one job per record file below the root.
    ///
    /// A root that is itself a file is taken as-is, whatever its extension.
    /// Inside directories only `.json` files are picked up, recursively and
    /// in file name order.
    pub fn scan(&self) -> Result<Vec<ValidationJob>, WorkerError> {
        if !self.root.exists() {
            return Err(WorkerError::PathNotFound(self.root.clone()));
        }

        if self.root.is_file() {
            return Ok(vec![ValidationJob::new(self.root.clone())]);
        }

        let mut jobs = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(WorkerError::ScanFailed {
                        path: self.root.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(
                        "Skipping unreadable entry under {}: {}",
                        self.root.display(),
                        e
                    );
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && is_record_file(path) {
                debug!("Found record file: {}", path.display());
                jobs.push(ValidationJob::new(path.to_path_buf()));
            }
        }

        info!(
            "Scanned {} record files in {}",
            jobs.len(),
            self.root.display()
        );
        Ok(jobs)
    }
}

fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
