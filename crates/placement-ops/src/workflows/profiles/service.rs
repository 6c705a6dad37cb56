use std::slice;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{AdminId, BulkAction, FreezeState, LockState, StudentId};
use super::eligibility::{self, Eligibility, FreezeRefusal};
use super::report::{BulkActionReport, FreezeFailure};
use super::store::{StoreError, StudentStore};

/// Service applying administrative profile state transitions through the
/// roster store.
///
/// The acting administrator is always an explicit argument; nothing here
/// reads ambient request context.
pub struct ProfileStateService<S> {
    store: Arc<S>,
}

impl<S> ProfileStateService<S>
where
    S: StudentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Decide whether one student's profile may transition to frozen.
    ///
    /// Total over every id: store faults come back as an ineligible result,
    /// not an error.
    pub fn check_freeze_eligibility(&self, student: &StudentId) -> Eligibility {
        eligibility::evaluate(self.store.as_ref(), student)
    }

    /// Apply one status action to a set of students and report per-record
    /// outcomes.
    ///
    /// The check phase has no side effects; only the final update mutates
    /// state, as one bulk statement over the accepted set.
    pub fn apply_bulk_action(
        &self,
        action: BulkAction,
        students: &[StudentId],
        acting_admin: &AdminId,
    ) -> Result<BulkActionReport, ProfileServiceError> {
        if students.is_empty() {
            return Err(ProfileServiceError::EmptySelection);
        }

        let report = match action {
            BulkAction::Freeze => self.bulk_freeze(students, acting_admin)?,
            BulkAction::Unfreeze => {
                let affected = self.store.set_frozen(
                    students,
                    FreezeState::Unfrozen,
                    acting_admin,
                    Utc::now(),
                )?;
                debug!(affected, "bulk unfreeze applied");
                unconditional_report(BulkAction::Unfreeze, students)
            }
            BulkAction::Lock => {
                let affected =
                    self.store
                        .set_locked(students, LockState::Locked, acting_admin, Utc::now())?;
                debug!(affected, "bulk lock applied");
                unconditional_report(BulkAction::Lock, students)
            }
            BulkAction::Unlock => {
                let affected = self.store.set_locked(
                    students,
                    LockState::Unlocked,
                    acting_admin,
                    Utc::now(),
                )?;
                debug!(affected, "bulk unlock applied");
                unconditional_report(BulkAction::Unlock, students)
            }
        };

        info!(
            action = action.label(),
            selected = students.len(),
            succeeded = report.success_count,
            rejected = report.failures.len(),
            admin = %acting_admin.0,
            "bulk status action processed"
        );
        Ok(report)
    }

    fn bulk_freeze(
        &self,
        students: &[StudentId],
        acting_admin: &AdminId,
    ) -> Result<BulkActionReport, ProfileServiceError> {
        let mut accepted = Vec::new();
        let mut failures = Vec::new();

        for student in students {
            match self.check_freeze_eligibility(student) {
                Eligibility::Eligible => accepted.push(student.clone()),
                Eligibility::Ineligible(refusal) => {
                    let identity = self
                        .store
                        .identity_of(student)?
                        .unwrap_or_else(super::domain::StudentIdentity::unknown);
                    failures.push(FreezeFailure {
                        student_id: student.clone(),
                        roll_no: identity.roll_no,
                        name: identity.name,
                        reason: refusal.summary(),
                    });
                }
            }
        }

        if !accepted.is_empty() {
            self.store
                .set_frozen(&accepted, FreezeState::Frozen, acting_admin, Utc::now())?;
        }

        Ok(BulkActionReport {
            action: BulkAction::Freeze,
            success_count: accepted.len(),
            failures,
        })
    }

    /// Freeze a single student, or return the refusal.
    pub fn freeze_student(
        &self,
        student: &StudentId,
        acting_admin: &AdminId,
    ) -> Result<(), ProfileServiceError> {
        match self.check_freeze_eligibility(student) {
            Eligibility::Eligible => {
                self.store.set_frozen(
                    slice::from_ref(student),
                    FreezeState::Frozen,
                    acting_admin,
                    Utc::now(),
                )?;
                Ok(())
            }
            Eligibility::Ineligible(refusal) => Err(ProfileServiceError::FreezeRefused(refusal)),
        }
    }

    /// Unfreeze a single student; reports not-found when no row matches.
    pub fn unfreeze_student(
        &self,
        student: &StudentId,
        acting_admin: &AdminId,
    ) -> Result<(), ProfileServiceError> {
        let affected = self.store.set_frozen(
            slice::from_ref(student),
            FreezeState::Unfrozen,
            acting_admin,
            Utc::now(),
        )?;
        if affected == 0 {
            return Err(ProfileServiceError::StudentNotFound(student.clone()));
        }
        Ok(())
    }

    pub fn lock_student(
        &self,
        student: &StudentId,
        acting_admin: &AdminId,
    ) -> Result<(), ProfileServiceError> {
        self.store.set_locked(
            slice::from_ref(student),
            LockState::Locked,
            acting_admin,
            Utc::now(),
        )?;
        Ok(())
    }

    pub fn unlock_student(
        &self,
        student: &StudentId,
        acting_admin: &AdminId,
    ) -> Result<(), ProfileServiceError> {
        self.store.set_locked(
            slice::from_ref(student),
            LockState::Unlocked,
            acting_admin,
            Utc::now(),
        )?;
        Ok(())
    }
}

fn unconditional_report(action: BulkAction, students: &[StudentId]) -> BulkActionReport {
    BulkActionReport {
        action,
        success_count: students.len(),
        failures: Vec::new(),
    }
}

/// Error raised by the profile state service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("no students selected")]
    EmptySelection,
    #[error("cannot freeze: {}", .0.summary())]
    FreezeRefused(FreezeRefusal),
    #[error("student '{0}' not found")]
    StudentNotFound(StudentId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
