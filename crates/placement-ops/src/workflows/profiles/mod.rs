//! Student profile state transitions: freeze eligibility validation and bulk
//! freeze/unfreeze/lock/unlock with per-record outcome reporting.
//!
//! Freezing is guarded by two roster rules (no pending placement
//! applications, internship quota met per semester); the other transitions
//! are unconditional. The relational roster sits behind [`StudentStore`] so
//! the rules can be exercised against an in-memory implementation.

pub mod domain;
pub mod eligibility;
pub mod report;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    AdminId, BulkAction, FreezeState, InternshipRequirement, LockState, ProgramId,
    SelectionStatus, StudentId, StudentIdentity, UnknownAction,
};
pub use eligibility::{Eligibility, FreezeRefusal};
pub use report::{BulkActionReport, FreezeFailure};
pub use router::{profile_admin_router, BulkStatusRequest, SingleActionRequest};
pub use service::{ProfileServiceError, ProfileStateService};
pub use store::{StoreError, StudentStore};
