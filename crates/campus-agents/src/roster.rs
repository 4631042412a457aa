//! Enrollment-order roster construction.
//!
//! At simulation start the roster is created once: `count` students with
//! sequential, zero-padded ids (`S01`, `S02`, ...). The returned `Vec`
//! order *is* the enrollment order; the orchestrator iterates it
//! unchanged every step so decisions consume draws in a stable sequence.

use campus_types::{StudentId, Subject};
use tracing::info;

use crate::student::StudentAgent;

/// Format a roster id from a prefix and 1-based index (`S` + 7 -> `S07`).
///
/// Two digits of padding covers the default roster; larger indices widen
/// naturally.
pub fn roster_id(prefix: &str, index: u32) -> StudentId {
    StudentId::new(format!("{prefix}{index:02}"))
}

/// Build the enrollment-ordered roster with zeroed counters.
///
/// Every student is enrolled in every subject. Indices start at 1 so the
/// first id is `S01`, matching the ids surfaced in URLs and chat
/// responses.
pub fn build_roster(count: u32, prefix: &str, subjects: &[Subject]) -> Vec<StudentAgent> {
    let students: Vec<StudentAgent> = (1..=count)
        .map(|index| StudentAgent::new(roster_id(prefix, index), subjects))
        .collect();

    info!(
        students = students.len(),
        subjects = subjects.len(),
        "Roster created"
    );

    students
}
