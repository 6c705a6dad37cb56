use serde::{Deserialize, Serialize};

use super::domain::{BulkAction, StudentId};

/// One rejected student in a bulk freeze, carrying the display identity the
/// portal shows operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeFailure {
    pub student_id: StudentId,
    pub roll_no: String,
    pub name: String,
    pub reason: String,
}

/// Outcome of one bulk status operation.
///
/// Freezing is a partial-success operation: some students change state, some
/// do not, and the caller always learns which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionReport {
    pub action: BulkAction,
    pub success_count: usize,
    pub failures: Vec<FreezeFailure>,
}

impl BulkActionReport {
    /// Operator-facing summary line.
    pub fn message(&self) -> String {
        match self.action {
            BulkAction::Freeze => format!(
                "Processed: {} frozen, {} skipped due to requirements.",
                self.success_count,
                self.failures.len()
            ),
            other => format!(
                "Bulk {} successful for {} student(s).",
                other.label(),
                self.success_count
            ),
        }
    }

    /// Render the failure list as CSV for download alongside the report.
    pub fn failures_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["userid", "rollno", "name", "reason"])?;
        for failure in &self.failures {
            writer.write_record([
                failure.student_id.0.as_str(),
                failure.roll_no.as_str(),
                failure.name.as_str(),
                failure.reason.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
