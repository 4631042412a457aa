//! Decision and status enumerations.
//!
//! All variants serialize in upper snake case (`ONGOING`, `CANCELLED`,
//! `ATTEND`, ...) because that is the wire format the dashboard and the
//! chat responder consume.

use serde::{Deserialize, Serialize};

/// Whether the currently scheduled session is being held.
///
/// The outcome of the teacher's per-step decision, fixed for the rest of
/// the step: students decide against it and the snapshot reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// The session is running; attendance is counted.
    Ongoing,
    /// The teacher cancelled the session; no counters move.
    Cancelled,
}

impl core::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ONGOING"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A teacher's per-step decision for their subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeacherDecision {
    /// Hold the session as scheduled.
    Hold,
    /// Cancel the session for this step.
    Cancel,
}

impl TeacherDecision {
    /// Map the decision onto the session status it produces.
    pub const fn session_status(self) -> SessionStatus {
        match self {
            Self::Hold => SessionStatus::Ongoing,
            Self::Cancel => SessionStatus::Cancelled,
        }
    }
}

/// A student's per-step decision about the scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentDecision {
    /// The student shows up.
    Attend,
    /// The student stays away.
    Skip,
}
