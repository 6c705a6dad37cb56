use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier wrapper for student accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for academic programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub String);

/// Identifier of the administrator performing a mutation, recorded as the
/// modifier of every affected row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(pub String);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a student profile accepts further self-service edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezeState {
    Frozen,
    Unfrozen,
}

impl FreezeState {
    /// Store column representation; conversion happens only at the
    /// persistence edge.
    pub const fn label(self) -> &'static str {
        match self {
            FreezeState::Frozen => "Yes",
            FreezeState::Unfrozen => "No",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(FreezeState::Frozen),
            "No" => Some(FreezeState::Unfrozen),
            _ => None,
        }
    }
}

/// Whether a student profile is administratively locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    pub const fn label(self) -> &'static str {
        match self {
            LockState::Locked => "Yes",
            LockState::Unlocked => "No",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(LockState::Locked),
            "No" => Some(LockState::Unlocked),
            _ => None,
        }
    }
}

/// Selection outcome of a placement application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    Pending,
    Selected,
    Rejected,
}

impl SelectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SelectionStatus::Pending => "Pending",
            SelectionStatus::Selected => "Yes",
            SelectionStatus::Rejected => "No",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pending" => Some(SelectionStatus::Pending),
            "Yes" => Some(SelectionStatus::Selected),
            "No" => Some(SelectionStatus::Rejected),
            _ => None,
        }
    }
}

/// Administrative action applied to a set of student profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Freeze,
    Unfreeze,
    Lock,
    Unlock,
}

impl BulkAction {
    pub const fn label(self) -> &'static str {
        match self {
            BulkAction::Freeze => "freeze",
            BulkAction::Unfreeze => "unfreeze",
            BulkAction::Lock => "lock",
            BulkAction::Unlock => "unlock",
        }
    }
}

/// Raised when a request names an action the portal does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for BulkAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "freeze" => Ok(BulkAction::Freeze),
            "unfreeze" => Ok(BulkAction::Unfreeze),
            "lock" => Ok(BulkAction::Lock),
            "unlock" => Ok(BulkAction::Unlock),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Minimum internship count a program demands for one semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRequirement {
    pub semester: u8,
    pub required: u32,
}

/// Display identity attached to bulk failure rows so operators can read the
/// report without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub roll_no: String,
    pub name: String,
}

impl StudentIdentity {
    /// Placeholder identity used when the roster row has vanished between
    /// validation and reporting.
    pub fn unknown() -> Self {
        Self {
            roll_no: "N/A".to_string(),
            name: "Unknown".to_string(),
        }
    }
}
