use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use placement_ops::config::AppConfig;
use placement_ops::error::AppError;
use placement_ops::workflows::uploads::{
    default_bindings, BindingOutcome, BindingReport, DiskArtifacts, ManifestReferences,
    UploadReconciler,
};

#[derive(Args, Debug)]
pub(crate) struct SweepArgs {
    /// CSV manifest of referenced filenames (table,column,filename rows)
    #[arg(long)]
    pub(crate) manifest: PathBuf,
    /// Root directory the upload folders live under (defaults to APP_UPLOADS_ROOT)
    #[arg(long)]
    pub(crate) uploads_root: Option<PathBuf>,
}

/// Run one reconciliation sweep over the stock bindings. Intended to be
/// invoked from cron after exporting the bound columns into the manifest.
pub(crate) fn run_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let uploads_root = args.uploads_root.unwrap_or(config.uploads.root);

    let references = ManifestReferences::from_path(&args.manifest)?;
    if references.is_empty() {
        // An empty manifest would classify every upload as an orphan; more
        // often it means the export step silently produced nothing.
        warn!(manifest = %args.manifest.display(), "manifest contains no references");
    }

    let reconciler = UploadReconciler::new(references, DiskArtifacts);
    let reports = reconciler.reconcile(&default_bindings(&uploads_root));
    render_sweep(&reports);
    Ok(())
}

fn render_sweep(reports: &[BindingReport]) {
    println!("Upload reconciliation sweep");

    for report in reports {
        println!("\n{}", report.binding);
        match &report.outcome {
            BindingOutcome::Completed(summary) => {
                println!(
                    "- references: {}, files on disk: {}",
                    summary.referenced, summary.on_disk
                );
                if summary.missing.is_empty() {
                    println!("- all referenced files present");
                } else {
                    println!("- missing from disk: {}", summary.missing.len());
                    for file in &summary.missing {
                        println!("  - {file}");
                    }
                }
                println!(
                    "- orphans: {} found, {} deleted",
                    summary.orphans_found, summary.orphans_deleted
                );
                for failure in &summary.failures {
                    println!("  - could not delete {}: {}", failure.file, failure.detail);
                }
            }
            BindingOutcome::FolderInaccessible { detail } => {
                println!("- skipped: folder inaccessible ({detail})");
            }
            BindingOutcome::ReferenceUnavailable { detail } => {
                println!("- skipped: reference query failed ({detail})");
            }
        }
    }

    println!("\nSweep complete");
}
