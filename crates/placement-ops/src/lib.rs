//! Backend core for the placement-and-internship records portal: freeze
//! eligibility validation, bulk profile status transitions with
//! partial-success reporting, and upload folder reconciliation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
