use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::InMemoryStudentStore;
use placement_ops::error::AppError;
use placement_ops::workflows::profiles::{
    AdminId, BulkAction, Eligibility, ProfileStateService, SelectionStatus, StudentId,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Write the failure report CSV to this path
    #[arg(long)]
    pub(crate) failures_csv: Option<PathBuf>,
}

/// Walk a bulk freeze end to end against a seeded roster so stakeholders can
/// see the partial-success reporting without a database.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(seeded_roster());
    let service = ProfileStateService::new(store.clone());
    let admin = AdminId("demo-admin".to_string());

    println!("Placement profile freeze demo");

    let probe = StudentId("u-2".to_string());
    match service.check_freeze_eligibility(&probe) {
        Eligibility::Eligible => println!("\n{}: eligible to freeze", probe.0),
        Eligibility::Ineligible(refusal) => {
            println!("\n{}: not eligible ({})", probe.0, refusal.summary())
        }
    }

    let selection: Vec<StudentId> = ["u-1", "u-2", "u-3", "u-4"]
        .iter()
        .map(|id| StudentId(id.to_string()))
        .collect();
    let report = service.apply_bulk_action(BulkAction::Freeze, &selection, &admin)?;

    println!("\n{}", report.message());
    if !report.failures.is_empty() {
        println!("\nSkipped students");
        for failure in &report.failures {
            println!("- {} ({}): {}", failure.name, failure.roll_no, failure.reason);
        }
    }

    if let Some(path) = args.failures_csv {
        let rendered = report
            .failures_csv()
            .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
        fs::write(&path, rendered)?;
        println!("\nFailure report written to {}", path.display());
    }

    Ok(())
}

fn seeded_roster() -> InMemoryStudentStore {
    let store = InMemoryStudentStore::default();
    store.seed_requirements("prog-cs", &[(3, 1), (5, 2)]);
    store.seed_student(
        "u-1",
        "prog-cs",
        "CS-2021-101",
        "Aarav Sharma",
        &[SelectionStatus::Selected],
        &[(3, 1), (5, 2)],
    );
    store.seed_student(
        "u-2",
        "prog-cs",
        "CS-2021-102",
        "Diya Patel",
        &[SelectionStatus::Pending, SelectionStatus::Pending],
        &[(3, 1), (5, 2)],
    );
    store.seed_student(
        "u-3",
        "prog-cs",
        "CS-2021-103",
        "Kavya Reddy",
        &[SelectionStatus::Rejected],
        &[(3, 1)],
    );
    store.seed_student(
        "u-4",
        "prog-cs",
        "CS-2021-104",
        "Rohan Verma",
        &[],
        &[(3, 1), (5, 2)],
    );
    store
}
