//! Upload folder reconciliation: compare the filenames the database still
//! references against what sits in each bound folder, report references whose
//! file is gone, and delete files nothing references.
//!
//! Intended for operational/cron use; there is no HTTP trigger.

pub mod binding;
pub mod manifest;
pub mod reconciler;

pub use binding::{default_bindings, UploadBinding};
pub use manifest::{ManifestError, ManifestReferences};
pub use reconciler::{
    ArtifactStore, BindingOutcome, BindingReport, DeletionFailure, DiskArtifacts, ReconcileSummary,
    ReferenceError, ReferenceSource, UploadReconciler,
};
