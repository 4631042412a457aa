//! Snapshot structs published once per step.
//!
//! [`StepSnapshot`] is the immutable composite the orchestrator produces
//! at the end of every step. The observer swaps one `Arc<StepSnapshot>`
//! for the next, so a reader always sees the current-state view and the
//! attendance table from the same step -- never a torn mix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::SessionStatus;
use crate::ids::{StudentId, Subject};

/// Per-subject attendance counters for one student.
///
/// `attended <= total` always; both move only while a session is ongoing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCounters {
    /// Sessions of this subject the student attended.
    pub attended: u32,
    /// Sessions of this subject that were held while the student was
    /// enrolled.
    pub total: u32,
}

/// The current-state view of the institution, as of the end of one step.
///
/// Field names match the JSON the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassState {
    /// Label of the current time slot (e.g. `09:00-10:00`).
    pub time: String,
    /// The subject scheduled for the slot.
    pub class: Subject,
    /// Room the session is assigned to.
    pub room: String,
    /// Display name of the teacher bound to the subject.
    pub teacher: String,
    /// Whether the session is being held.
    pub class_status: SessionStatus,
    /// Students who decided to attend this step (0 when cancelled).
    pub students_present: u32,
    /// Size of the enrolled roster.
    pub total_students: u32,
}

/// One student's row in the attendance table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Total sessions attended, summed across all subjects.
    pub attended: u64,
    /// Total sessions held, summed across all subjects.
    pub total: u64,
    /// Attendance percentage rounded to one decimal place.
    pub pct: f64,
}

/// The immutable snapshot pair published atomically once per step.
///
/// Bundles the current-state view and the attendance table so consumers
/// can never observe data from two different steps at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// Monotonic step counter (1 for the first completed step).
    pub step: u64,
    /// The current-state view.
    pub class_state: ClassState,
    /// Attendance table keyed by roster id.
    pub attendance: BTreeMap<StudentId, AttendanceEntry>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_snapshot() -> StepSnapshot {
        let mut attendance = BTreeMap::new();
        attendance.insert(
            StudentId::new("S01"),
            AttendanceEntry {
                attended: 3,
                total: 4,
                pct: 75.0,
            },
        );
        StepSnapshot {
            step: 4,
            class_state: ClassState {
                time: String::from("10:00-11:00"),
                class: Subject::from("DBMS"),
                room: String::from("Block B - 204"),
                teacher: String::from("Dr. Rao"),
                class_status: SessionStatus::Ongoing,
                students_present: 1,
                total_students: 1,
            },
            attendance,
        }
    }

    #[test]
    fn class_state_serializes_flat() {
        let snapshot = make_snapshot();
        let json = serde_json::to_value(&snapshot.class_state).unwrap();
        assert_eq!(json["time"], "10:00-11:00");
        assert_eq!(json["class"], "DBMS");
        assert_eq!(json["class_status"], "ONGOING");
        assert_eq!(json["students_present"], 1);
    }

    #[test]
    fn attendance_keyed_by_roster_id() {
        let snapshot = make_snapshot();
        let json = serde_json::to_value(&snapshot.attendance).unwrap();
        assert_eq!(json["S01"]["attended"], 3);
        assert_eq!(json["S01"]["pct"], 75.0);
    }

    #[test]
    fn snapshot_round_trips() {
        let snapshot = make_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StepSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
