use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::domain::{
    AdminId, FreezeState, InternshipRequirement, LockState, ProgramId, StudentId, StudentIdentity,
};

/// Storage abstraction over the relational roster so the service and
/// eligibility modules can be exercised in isolation.
///
/// Each `set_*` call is one logical bulk update that stamps the modifying
/// administrator and timestamp on every affected row and reports how many
/// rows matched.
pub trait StudentStore: Send + Sync {
    /// Number of the student's placement applications still awaiting a
    /// selection decision.
    fn pending_placement_count(&self, student: &StudentId) -> Result<u32, StoreError>;

    /// Program the student is enrolled in, or `None` when no roster row
    /// exists for the id.
    fn program_of(&self, student: &StudentId) -> Result<Option<ProgramId>, StoreError>;

    /// Internship requirements configured for a program, in no particular
    /// order.
    fn requirements_for(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<InternshipRequirement>, StoreError>;

    /// Completed internship counts grouped by semester; absent semesters
    /// count as zero.
    fn internship_counts(&self, student: &StudentId) -> Result<BTreeMap<u8, u32>, StoreError>;

    /// Roll number and name for failure reports.
    fn identity_of(&self, student: &StudentId) -> Result<Option<StudentIdentity>, StoreError>;

    fn set_frozen(
        &self,
        students: &[StudentId],
        state: FreezeState,
        modified_by: &AdminId,
        modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    fn set_locked(
        &self,
        students: &[StudentId],
        state: LockState,
        modified_by: &AdminId,
        modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError>;
}

/// Error enumeration for roster storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
