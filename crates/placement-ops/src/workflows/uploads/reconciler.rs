use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::binding::UploadBinding;

/// Source of the filenames the database still references for a binding.
pub trait ReferenceSource: Send + Sync {
    /// Non-null, non-empty column values; duplicates collapse.
    fn referenced_filenames(
        &self,
        binding: &UploadBinding,
    ) -> Result<BTreeSet<String>, ReferenceError>;
}

/// Error enumeration for reference lookups.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference query failed: {0}")]
    Unavailable(String),
}

/// Filesystem operations a sweep needs, each independently fallible.
pub trait ArtifactStore: Send + Sync {
    fn list(&self, folder: &Path) -> io::Result<Vec<String>>;
    fn remove(&self, folder: &Path, file: &str) -> io::Result<()>;
}

/// std::fs-backed artifact store used by the operational sweep.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskArtifacts;

impl ArtifactStore for DiskArtifacts {
    fn list(&self, folder: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn remove(&self, folder: &Path, file: &str) -> io::Result<()> {
        fs::remove_file(folder.join(file))
    }
}

/// Per-binding outcome of a reconciliation sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingReport {
    pub binding: String,
    pub outcome: BindingOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BindingOutcome {
    Completed(ReconcileSummary),
    /// Upload folder missing or unreadable; nothing in it was touched.
    FolderInaccessible { detail: String },
    /// The reference query failed, so deleting anything would be unsafe.
    ReferenceUnavailable { detail: String },
}

/// What one completed binding sweep found and did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub referenced: usize,
    pub on_disk: usize,
    /// Referenced filenames with no artifact on disk. Reported only; the
    /// sweep cannot materialize a missing file.
    pub missing: Vec<String>,
    pub orphans_found: usize,
    pub orphans_deleted: usize,
    pub failures: Vec<DeletionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionFailure {
    pub file: String,
    pub detail: String,
}

/// Compares database file references against upload folders, reporting
/// references whose artifact is gone and deleting artifacts nothing
/// references.
///
/// Running twice over unchanged state leaves the second sweep with an empty
/// orphan set. There is no cross-sweep locking; the operator must not run
/// two sweeps over the same folder concurrently.
pub struct UploadReconciler<I, A> {
    references: I,
    artifacts: A,
}

impl<I, A> UploadReconciler<I, A>
where
    I: ReferenceSource,
    A: ArtifactStore,
{
    pub fn new(references: I, artifacts: A) -> Self {
        Self {
            references,
            artifacts,
        }
    }

    /// Sweep every binding in order. A failure on one binding never aborts
    /// the ones after it.
    pub fn reconcile(&self, bindings: &[UploadBinding]) -> Vec<BindingReport> {
        bindings
            .iter()
            .map(|binding| self.reconcile_binding(binding))
            .collect()
    }

    fn reconcile_binding(&self, binding: &UploadBinding) -> BindingReport {
        info!(binding = %binding.display_name, folder = %binding.folder.display(), "checking upload binding");

        let referenced = match self.references.referenced_filenames(binding) {
            Ok(set) => set,
            Err(err) => {
                warn!(binding = %binding.display_name, %err, "reference query failed, skipping binding");
                return BindingReport {
                    binding: binding.display_name.clone(),
                    outcome: BindingOutcome::ReferenceUnavailable {
                        detail: err.to_string(),
                    },
                };
            }
        };

        let listed = match self.artifacts.list(&binding.folder) {
            Ok(names) => names,
            Err(err) => {
                warn!(binding = %binding.display_name, %err, "folder missing or inaccessible, skipping binding");
                return BindingReport {
                    binding: binding.display_name.clone(),
                    outcome: BindingOutcome::FolderInaccessible {
                        detail: err.to_string(),
                    },
                };
            }
        };

        // Hidden and system entries never participate in reconciliation.
        let on_disk: BTreeSet<String> = listed
            .into_iter()
            .filter(|name| !name.starts_with('.'))
            .collect();

        let missing: Vec<String> = referenced.difference(&on_disk).cloned().collect();
        if !missing.is_empty() {
            warn!(
                binding = %binding.display_name,
                count = missing.len(),
                "references without a file on disk"
            );
        }

        let orphans: Vec<String> = on_disk.difference(&referenced).cloned().collect();
        let mut deleted = 0usize;
        let mut failures = Vec::new();
        for orphan in &orphans {
            match self.artifacts.remove(&binding.folder, orphan) {
                Ok(()) => {
                    info!(binding = %binding.display_name, file = %orphan, "deleted orphan");
                    deleted += 1;
                }
                Err(err) => {
                    warn!(binding = %binding.display_name, file = %orphan, %err, "failed to delete orphan");
                    failures.push(DeletionFailure {
                        file: orphan.clone(),
                        detail: err.to_string(),
                    });
                }
            }
        }

        BindingReport {
            binding: binding.display_name.clone(),
            outcome: BindingOutcome::Completed(ReconcileSummary {
                referenced: referenced.len(),
                on_disk: on_disk.len(),
                missing,
                orphans_found: orphans.len(),
                orphans_deleted: deleted,
                failures,
            }),
        }
    }
}
