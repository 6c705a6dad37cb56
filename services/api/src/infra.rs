use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use placement_ops::workflows::profiles::{
    AdminId, FreezeState, InternshipRequirement, LockState, ProgramId, SelectionStatus,
    StoreError, StudentId, StudentIdentity, StudentStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug)]
struct RosterRow {
    program: ProgramId,
    identity: StudentIdentity,
    applications: Vec<SelectionStatus>,
    internships: BTreeMap<u8, u32>,
    frozen: FreezeState,
    locked: LockState,
    modified_by: Option<AdminId>,
    modified_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct RosterState {
    students: HashMap<StudentId, RosterRow>,
    requirements: HashMap<ProgramId, Vec<InternshipRequirement>>,
}

/// In-memory roster standing in for the relational store; the real portal
/// wires a database-backed implementation here.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentStore {
    inner: Arc<Mutex<RosterState>>,
}

impl InMemoryStudentStore {
    pub(crate) fn seed_student(
        &self,
        id: &str,
        program: &str,
        roll_no: &str,
        name: &str,
        applications: &[SelectionStatus],
        internships: &[(u8, u32)],
    ) {
        let mut state = self.inner.lock().expect("roster mutex poisoned");
        state.students.insert(
            StudentId(id.to_string()),
            RosterRow {
                program: ProgramId(program.to_string()),
                identity: StudentIdentity {
                    roll_no: roll_no.to_string(),
                    name: name.to_string(),
                },
                applications: applications.to_vec(),
                internships: internships.iter().copied().collect(),
                frozen: FreezeState::Unfrozen,
                locked: LockState::Unlocked,
                modified_by: None,
                modified_at: None,
            },
        );
    }

    pub(crate) fn seed_requirements(&self, program: &str, requirements: &[(u8, u32)]) {
        let mut state = self.inner.lock().expect("roster mutex poisoned");
        state.requirements.insert(
            ProgramId(program.to_string()),
            requirements
                .iter()
                .map(|&(semester, required)| InternshipRequirement { semester, required })
                .collect(),
        );
    }

    pub(crate) fn frozen(&self, id: &str) -> Option<FreezeState> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        state
            .students
            .get(&StudentId(id.to_string()))
            .map(|row| row.frozen)
    }
}

impl StudentStore for InMemoryStudentStore {
    fn pending_placement_count(&self, student: &StudentId) -> Result<u32, StoreError> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        Ok(state
            .students
            .get(student)
            .map(|row| {
                row.applications
                    .iter()
                    .filter(|status| **status == SelectionStatus::Pending)
                    .count() as u32
            })
            .unwrap_or(0))
    }

    fn program_of(&self, student: &StudentId) -> Result<Option<ProgramId>, StoreError> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        Ok(state.students.get(student).map(|row| row.program.clone()))
    }

    fn requirements_for(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<InternshipRequirement>, StoreError> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        Ok(state.requirements.get(program).cloned().unwrap_or_default())
    }

    fn internship_counts(&self, student: &StudentId) -> Result<BTreeMap<u8, u32>, StoreError> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        Ok(state
            .students
            .get(student)
            .map(|row| row.internships.clone())
            .unwrap_or_default())
    }

    fn identity_of(&self, student: &StudentId) -> Result<Option<StudentIdentity>, StoreError> {
        let state = self.inner.lock().expect("roster mutex poisoned");
        Ok(state.students.get(student).map(|row| row.identity.clone()))
    }

    fn set_frozen(
        &self,
        students: &[StudentId],
        flag: FreezeState,
        modified_by: &AdminId,
        modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut state = self.inner.lock().expect("roster mutex poisoned");
        let mut affected = 0;
        for id in students {
            if let Some(row) = state.students.get_mut(id) {
                row.frozen = flag;
                row.modified_by = Some(modified_by.clone());
                row.modified_at = Some(modified_at);
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn set_locked(
        &self,
        students: &[StudentId],
        flag: LockState,
        modified_by: &AdminId,
        modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut state = self.inner.lock().expect("roster mutex poisoned");
        let mut affected = 0;
        for id in students {
            if let Some(row) = state.students.get_mut(id) {
                row.locked = flag;
                row.modified_by = Some(modified_by.clone());
                row.modified_at = Some(modified_at);
                affected += 1;
            }
        }
        Ok(affected)
    }
}
