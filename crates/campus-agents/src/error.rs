//! Error types for the campus-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Counter corruption (`attended > total`, overflow) is not a recoverable
//! condition -- callers treat it as a fatal defect and let the process
//! end.

use campus_types::{StudentId, Subject};

/// Errors that can occur during agent state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A student was asked to record attendance for a subject they are
    /// not enrolled in.
    #[error("student {student} is not enrolled in {subject}")]
    NotEnrolled {
        /// The student whose record was touched.
        student: StudentId,
        /// The subject missing from their record.
        subject: Subject,
    },

    /// A counter increment would overflow.
    #[error("attendance counter overflow for {student} in {subject}")]
    CounterOverflow {
        /// The student whose counter overflowed.
        student: StudentId,
        /// The subject whose counter overflowed.
        subject: Subject,
    },

    /// Counters violate `attended <= total`. Should never occur given the
    /// update contract; detection means the state is corrupt.
    #[error(
        "attendance invariant violated for {student} in {subject}: attended {attended} > total {total}"
    )]
    InvariantViolation {
        /// The student with the corrupt record.
        student: StudentId,
        /// The subject with the corrupt counters.
        subject: Subject,
        /// The attended count observed.
        attended: u32,
        /// The total count observed.
        total: u32,
    },
}
