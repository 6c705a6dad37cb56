use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::StudentId;
use super::store::{StoreError, StudentStore};

/// Outcome of a freeze eligibility check.
///
/// This is a normal result value, never an error: bulk operations rely on the
/// check being total over every candidate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    Ineligible(FreezeRefusal),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn refusal(&self) -> Option<&FreezeRefusal> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(refusal) => Some(refusal),
        }
    }
}

/// Named reasons a profile freeze is denied, kept distinct so callers can
/// render "record not found" differently from a rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreezeRefusal {
    PendingPlacements { count: u32 },
    ProfileNotFound,
    MissingInternships { needed: u32, semester: u8 },
    ValidationUnavailable,
}

impl FreezeRefusal {
    pub fn summary(&self) -> String {
        match self {
            FreezeRefusal::PendingPlacements { count } => {
                format!("Has {count} pending placement application(s).")
            }
            FreezeRefusal::ProfileNotFound => "Student profile not found.".to_string(),
            FreezeRefusal::MissingInternships { needed, semester } => {
                format!("Missing {needed} internship(s) for Semester {semester}.")
            }
            FreezeRefusal::ValidationUnavailable => "Database error during validation.".to_string(),
        }
    }
}

/// Run the freeze preconditions for one student.
///
/// A store fault degrades to `ValidationUnavailable` so a single bad record
/// cannot abort a bulk sweep.
pub(crate) fn evaluate<S>(store: &S, student: &StudentId) -> Eligibility
where
    S: StudentStore + ?Sized,
{
    match run_checks(store, student) {
        Ok(result) => result,
        Err(StoreError::Unavailable(detail)) => {
            warn!(student = %student.0, %detail, "eligibility check degraded to ineligible");
            Eligibility::Ineligible(FreezeRefusal::ValidationUnavailable)
        }
    }
}

fn run_checks<S>(store: &S, student: &StudentId) -> Result<Eligibility, StoreError>
where
    S: StudentStore + ?Sized,
{
    let pending = store.pending_placement_count(student)?;
    if pending > 0 {
        return Ok(Eligibility::Ineligible(FreezeRefusal::PendingPlacements {
            count: pending,
        }));
    }

    let program = match store.program_of(student)? {
        Some(program) => program,
        None => return Ok(Eligibility::Ineligible(FreezeRefusal::ProfileNotFound)),
    };

    let mut requirements = store.requirements_for(&program)?;
    if requirements.is_empty() {
        return Ok(Eligibility::Eligible);
    }

    let completed = store.internship_counts(student)?;

    // First shortfall wins; ascending semester keeps the answer reproducible.
    requirements.sort_by_key(|requirement| requirement.semester);
    for requirement in &requirements {
        let done = completed.get(&requirement.semester).copied().unwrap_or(0);
        if done < requirement.required {
            return Ok(Eligibility::Ineligible(FreezeRefusal::MissingInternships {
                needed: requirement.required - done,
                semester: requirement.semester,
            }));
        }
    }

    Ok(Eligibility::Eligible)
}
