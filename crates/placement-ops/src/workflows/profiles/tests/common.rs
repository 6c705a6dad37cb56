use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::profiles::domain::{
    AdminId, FreezeState, InternshipRequirement, LockState, ProgramId, StudentId, StudentIdentity,
};
use crate::workflows::profiles::service::ProfileStateService;
use crate::workflows::profiles::store::{StoreError, StudentStore};

pub(super) fn admin() -> AdminId {
    AdminId("admin-007".to_string())
}

pub(super) fn student_id(raw: &str) -> StudentId {
    StudentId(raw.to_string())
}

pub(super) fn program_id(raw: &str) -> ProgramId {
    ProgramId(raw.to_string())
}

pub(super) fn build_service() -> (ProfileStateService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = ProfileStateService::new(store.clone());
    (service, store)
}

/// One recorded bulk flag update, so tests can assert the commit phase issued
/// exactly one statement with the right stamp.
#[derive(Debug, Clone)]
pub(super) struct FlagUpdate {
    pub(super) students: Vec<StudentId>,
    pub(super) label: &'static str,
    pub(super) modified_by: AdminId,
    #[allow(dead_code)]
    pub(super) modified_at: DateTime<Utc>,
}

#[derive(Debug)]
struct StudentRow {
    program: ProgramId,
    identity: Option<StudentIdentity>,
    pending: u32,
    internships: BTreeMap<u8, u32>,
    frozen: FreezeState,
    locked: LockState,
}

#[derive(Default)]
struct MemoryState {
    students: HashMap<StudentId, StudentRow>,
    requirements: HashMap<ProgramId, Vec<InternshipRequirement>>,
    frozen_updates: Vec<FlagUpdate>,
    locked_updates: Vec<FlagUpdate>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub(super) fn insert_student(&self, id: &StudentId, program: &ProgramId, roll_no: &str, name: &str) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state.students.insert(
            id.clone(),
            StudentRow {
                program: program.clone(),
                identity: Some(StudentIdentity {
                    roll_no: roll_no.to_string(),
                    name: name.to_string(),
                }),
                pending: 0,
                internships: BTreeMap::new(),
                frozen: FreezeState::Unfrozen,
                locked: LockState::Unlocked,
            },
        );
    }

    pub(super) fn clear_identity(&self, id: &StudentId) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        if let Some(row) = state.students.get_mut(id) {
            row.identity = None;
        }
    }

    pub(super) fn set_pending(&self, id: &StudentId, count: u32) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        if let Some(row) = state.students.get_mut(id) {
            row.pending = count;
        }
    }

    pub(super) fn add_internships(&self, id: &StudentId, semester: u8, count: u32) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        if let Some(row) = state.students.get_mut(id) {
            *row.internships.entry(semester).or_insert(0) += count;
        }
    }

    pub(super) fn set_requirements(
        &self,
        program: &ProgramId,
        requirements: Vec<InternshipRequirement>,
    ) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state.requirements.insert(program.clone(), requirements);
    }

    pub(super) fn frozen_state(&self, id: &StudentId) -> Option<FreezeState> {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.students.get(id).map(|row| row.frozen)
    }

    pub(super) fn locked_state(&self, id: &StudentId) -> Option<LockState> {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.students.get(id).map(|row| row.locked)
    }

    pub(super) fn frozen_updates(&self) -> Vec<FlagUpdate> {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.frozen_updates.clone()
    }

    pub(super) fn locked_updates(&self) -> Vec<FlagUpdate> {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.locked_updates.clone()
    }
}

impl StudentStore for MemoryStore {
    fn pending_placement_count(&self, student: &StudentId) -> Result<u32, StoreError> {
        let state = self.inner.lock().expect("store mutex poisoned");
        Ok(state.students.get(student).map(|row| row.pending).unwrap_or(0))
    }

    fn program_of(&self, student: &StudentId) -> Result<Option<ProgramId>, StoreError> {
        let state = self.inner.lock().expect("store mutex poisoned");
        Ok(state.students.get(student).map(|row| row.program.clone()))
    }

    fn requirements_for(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<InternshipRequirement>, StoreError> {
        let state = self.inner.lock().expect("store mutex poisoned");
        Ok(state.requirements.get(program).cloned().unwrap_or_default())
    }

    fn internship_counts(&self, student: &StudentId) -> Result<BTreeMap<u8, u32>, StoreError> {
        let state = self.inner.lock().expect("store mutex poisoned");
        Ok(state
            .students
            .get(student)
            .map(|row| row.internships.clone())
            .unwrap_or_default())
    }

    fn identity_of(&self, student: &StudentId) -> Result<Option<StudentIdentity>, StoreError> {
        let state = self.inner.lock().expect("store mutex poisoned");
        Ok(state
            .students
            .get(student)
            .and_then(|row| row.identity.clone()))
    }

    fn set_frozen(
        &self,
        students: &[StudentId],
        flag: FreezeState,
        modified_by: &AdminId,
        modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state.frozen_updates.push(FlagUpdate {
            students: students.to_vec(),
            label: flag.label(),
            modified_by: modified_by.clone(),
            modified_at,
        });
        let mut affected = 0;
        for id in students {
            if let Some(row) = state.students.get_mut(id) {
                row.frozen = flag;
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
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state.locked_updates.push(FlagUpdate {
            students: students.to_vec(),
            label: flag.label(),
            modified_by: modified_by.clone(),
            modified_at,
        });
        let mut affected = 0;
        for id in students {
            if let Some(row) = state.students.get_mut(id) {
                row.locked = flag;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

/// Store whose eligibility reads fail while identity lookups and writes keep
/// working, for exercising the read-phase containment rules.
pub(super) struct UnreadableStore;

impl StudentStore for UnreadableStore {
    fn pending_placement_count(&self, _student: &StudentId) -> Result<u32, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn program_of(&self, _student: &StudentId) -> Result<Option<ProgramId>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn requirements_for(
        &self,
        _program: &ProgramId,
    ) -> Result<Vec<InternshipRequirement>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn internship_counts(&self, _student: &StudentId) -> Result<BTreeMap<u8, u32>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn identity_of(&self, _student: &StudentId) -> Result<Option<StudentIdentity>, StoreError> {
        Ok(None)
    }

    fn set_frozen(
        &self,
        students: &[StudentId],
        _flag: FreezeState,
        _modified_by: &AdminId,
        _modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Ok(students.len() as u64)
    }

    fn set_locked(
        &self,
        students: &[StudentId],
        _flag: LockState,
        _modified_by: &AdminId,
        _modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Ok(students.len() as u64)
    }
}

/// Store that is down for everything, reads and writes alike.
pub(super) struct OfflineStore;

impl StudentStore for OfflineStore {
    fn pending_placement_count(&self, _student: &StudentId) -> Result<u32, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn program_of(&self, _student: &StudentId) -> Result<Option<ProgramId>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn requirements_for(
        &self,
        _program: &ProgramId,
    ) -> Result<Vec<InternshipRequirement>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn internship_counts(&self, _student: &StudentId) -> Result<BTreeMap<u8, u32>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn identity_of(&self, _student: &StudentId) -> Result<Option<StudentIdentity>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn set_frozen(
        &self,
        _students: &[StudentId],
        _flag: FreezeState,
        _modified_by: &AdminId,
        _modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn set_locked(
        &self,
        _students: &[StudentId],
        _flag: LockState,
        _modified_by: &AdminId,
        _modified_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Seed one student who satisfies every freeze precondition.
pub(super) fn seed_eligible(store: &MemoryStore, id: &StudentId, roll_no: &str, name: &str) {
    let program = program_id("prog-cs");
    store.insert_student(id, &program, roll_no, name);
    store.set_requirements(
        &program,
        vec![InternshipRequirement {
            semester: 3,
            required: 1,
        }],
    );
    store.add_internships(id, 3, 1);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
