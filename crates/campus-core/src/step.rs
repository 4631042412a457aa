//! One discrete step of the simulation.
//!
//! Each step runs through four phases:
//!
//! 1. **Clock** -- advance to the next time slot and derive the subject.
//! 2. **Teacher** -- the subject's teacher decides hold or cancel.
//! 3. **Students** -- every student, in enrollment order, decides and then
//!    records the outcome; attends are tallied while the session is
//!    ongoing.
//! 4. **Snapshot** -- the current-state view and the attendance table are
//!    assembled into one immutable [`StepSnapshot`] and a step-completed
//!    event is logged.
//!
//! The step cycle is deterministic given the same initial state and
//! generator. A failed step is a fatal condition: there is no partial-step
//! recovery, the error propagates and ends the process.

use std::collections::BTreeMap;

use campus_agents::{AgentError, StudentAgent, TeacherAgent, build_roster};
use campus_types::{
    AttendanceEntry, ClassState, SessionStatus, StepSnapshot, StudentDecision, StudentId, Subject,
};
use rand::Rng;
use tracing::info;

use crate::clock::{ClockError, ScheduleClock};
use crate::config::CampusConfig;

/// Errors that can occur during step execution.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A student update failed.
    #[error("agent error for {student}: {source}")]
    Agent {
        /// The student that caused the error.
        student: StudentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// The scheduled subject has no room or teacher in the lookup tables.
    #[error("no room or teacher registered for subject {subject}")]
    UnknownSubject {
        /// The subject missing from the static tables.
        subject: Subject,
    },

    /// The step counter would overflow.
    #[error("step counter overflow: cannot advance beyond u64::MAX")]
    StepOverflow,
}

/// The mutable simulation state owned by the driver.
///
/// Private to the driver thread of execution: readers only ever see the
/// immutable snapshots derived from it.
#[derive(Debug)]
pub struct SimulationState {
    /// The schedule clock.
    pub clock: ScheduleClock,
    /// Teacher agents keyed by their bound subject.
    pub teachers: BTreeMap<Subject, TeacherAgent>,
    /// Room lookup keyed by subject.
    pub rooms: BTreeMap<Subject, String>,
    /// The roster in enrollment order.
    pub students: Vec<StudentAgent>,
    /// Number of steps completed so far.
    pub steps_completed: u64,
}

impl SimulationState {
    /// Build the initial state from configuration.
    ///
    /// Creates the clock, one teacher per subject, the room table, and the
    /// enrollment-ordered roster with zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the schedule has no time
    /// slots or no subjects.
    pub fn from_config(config: &CampusConfig) -> Result<Self, ClockError> {
        let subjects: Vec<Subject> = config
            .schedule
            .subjects
            .iter()
            .map(|spec| Subject::from(spec.name.as_str()))
            .collect();

        let clock = ScheduleClock::new(config.schedule.time_slots.clone(), subjects.clone())?;

        let teachers = config
            .schedule
            .subjects
            .iter()
            .map(|spec| {
                let subject = Subject::from(spec.name.as_str());
                (
                    subject.clone(),
                    TeacherAgent::new(spec.teacher.clone(), subject),
                )
            })
            .collect();

        let rooms = config
            .schedule
            .subjects
            .iter()
            .map(|spec| (Subject::from(spec.name.as_str()), spec.room.clone()))
            .collect();

        let students = build_roster(config.roster.students, &config.roster.id_prefix, &subjects);

        Ok(Self {
            clock,
            teachers,
            rooms,
            students,
            steps_completed: 0,
        })
    }
}

/// Execute one complete step of the simulation.
///
/// This is the main entry point for the driver. It runs the four phases
/// in sequence and returns the snapshot pair for publication.
///
/// # Errors
///
/// Returns [`StepError`] if the clock fails, the scheduled subject has no
/// room/teacher entry, a counter update fails, or the step counter would
/// overflow. All are fatal: the caller does not retry.
pub fn run_step(state: &mut SimulationState, rng: &mut impl Rng) -> Result<StepSnapshot, StepError> {
    // --- Phase 1: Clock ---
    let slot = state.clock.advance()?;

    // --- Phase 2: Teacher ---
    let room = state
        .rooms
        .get(&slot.subject)
        .cloned()
        .ok_or_else(|| StepError::UnknownSubject {
            subject: slot.subject.clone(),
        })?;
    let teacher = state
        .teachers
        .get(&slot.subject)
        .ok_or_else(|| StepError::UnknownSubject {
            subject: slot.subject.clone(),
        })?;
    let status = teacher.decide(rng).session_status();
    let teacher_name = teacher.name().to_owned();

    // --- Phase 3: Students ---
    let mut students_present: u32 = 0;
    for student in &mut state.students {
        let decision = student.decide(status, rng);
        student
            .update(&slot.subject, decision, status)
            .map_err(|source| StepError::Agent {
                student: student.id().clone(),
                source,
            })?;
        if status == SessionStatus::Ongoing && decision == StudentDecision::Attend {
            students_present = students_present.saturating_add(1);
        }
    }

    state.steps_completed = state
        .steps_completed
        .checked_add(1)
        .ok_or(StepError::StepOverflow)?;
    let step = state.steps_completed;

    // --- Phase 4: Snapshot ---
    let attendance: BTreeMap<StudentId, AttendanceEntry> = state
        .students
        .iter()
        .map(|student| {
            let (attended, total) = student.totals();
            (
                student.id().clone(),
                AttendanceEntry {
                    attended,
                    total,
                    pct: round_to_tenth(student.attendance_pct()),
                },
            )
        })
        .collect();

    let total_students = u32::try_from(state.students.len()).unwrap_or(u32::MAX);
    let class_state = ClassState {
        time: slot.time,
        class: slot.subject,
        room,
        teacher: teacher_name,
        class_status: status,
        students_present,
        total_students,
    };

    info!(
        step,
        time = %class_state.time,
        subject = %class_state.class,
        status = %status,
        students_present,
        "Step completed"
    );

    Ok(StepSnapshot {
        step,
        class_state,
        attendance,
    })
}

/// Round a percentage to one decimal place.
///
/// Uses round-half-away-from-zero (`f64::round` on the tenths-scaled
/// value). The choice of mode matters less than applying it everywhere a
/// percentage leaves the core.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn make_state() -> SimulationState {
        SimulationState::from_config(&CampusConfig::default()).unwrap()
    }

    #[test]
    fn round_to_tenth_half_goes_away_from_zero() {
        assert!((round_to_tenth(66.6666) - 66.7).abs() < f64::EPSILON);
        assert!((round_to_tenth(74.95) - 75.0).abs() < f64::EPSILON);
        assert!((round_to_tenth(100.0) - 100.0).abs() < f64::EPSILON);
        assert!(round_to_tenth(0.04).abs() < f64::EPSILON);
    }

    #[test]
    fn first_step_advances_to_the_second_slot() {
        let mut state = make_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let snapshot = run_step(&mut state, &mut rng).unwrap();

        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.class_state.time, "10:00-11:00");
        assert_eq!(snapshot.class_state.class.as_str(), "DBMS");
        assert_eq!(snapshot.class_state.room, "Block B - 204");
        assert_eq!(snapshot.class_state.teacher, "Dr. Rao");
        assert_eq!(snapshot.class_state.total_students, 30);
        assert_eq!(snapshot.attendance.len(), 30);
    }

    #[test]
    fn present_count_matches_the_attendance_deltas() {
        let mut state = make_state();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut previous: Option<StepSnapshot> = None;

        for _ in 0..60 {
            let snapshot = run_step(&mut state, &mut rng).unwrap();

            let prev_attended = |id: &StudentId| {
                previous
                    .as_ref()
                    .and_then(|p| p.attendance.get(id))
                    .map_or(0, |e| e.attended)
            };
            let prev_total = |id: &StudentId| {
                previous
                    .as_ref()
                    .and_then(|p| p.attendance.get(id))
                    .map_or(0, |e| e.total)
            };

            match snapshot.class_state.class_status {
                SessionStatus::Cancelled => {
                    // No counters move and nobody is present.
                    assert_eq!(snapshot.class_state.students_present, 0);
                    for (id, entry) in &snapshot.attendance {
                        assert_eq!(entry.attended, prev_attended(id));
                        assert_eq!(entry.total, prev_total(id));
                    }
                }
                SessionStatus::Ongoing => {
                    // Every student's total moves by exactly one; the
                    // present count equals the attended deltas.
                    let mut attends: u32 = 0;
                    for (id, entry) in &snapshot.attendance {
                        assert_eq!(entry.total, prev_total(id).saturating_add(1));
                        let delta = entry.attended.saturating_sub(prev_attended(id));
                        assert!(delta <= 1);
                        attends = attends.saturating_add(u32::try_from(delta).unwrap_or(0));
                    }
                    assert_eq!(snapshot.class_state.students_present, attends);
                }
            }

            assert!(
                snapshot.class_state.students_present <= snapshot.class_state.total_students
            );
            for entry in snapshot.attendance.values() {
                assert!(entry.attended <= entry.total);
                assert!((0.0..=100.0).contains(&entry.pct));
            }

            previous = Some(snapshot);
        }
    }

    #[test]
    fn fixed_seed_runs_are_identical() {
        let run = |seed: u64| -> Vec<StepSnapshot> {
            let mut state = make_state();
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..40).map(|_| run_step(&mut state, &mut rng).unwrap()).collect()
        };

        assert_eq!(run(77), run(77));
        // A different seed diverges somewhere in 40 steps.
        assert_ne!(run(77), run(78));
    }

    #[test]
    fn first_ongoing_step_has_binomial_shape() {
        // Find the first held session for this seed (cancellation runs of
        // any length are vanishingly unlikely) and check the one-step
        // attendance shape for the full 30-student roster.
        let mut state = make_state();
        let mut rng = SmallRng::seed_from_u64(2);

        let mut ongoing = None;
        for _ in 0..32 {
            let snapshot = run_step(&mut state, &mut rng).unwrap();
            if snapshot.class_state.class_status == SessionStatus::Ongoing {
                ongoing = Some(snapshot);
                break;
            }
        }
        let snapshot = ongoing.unwrap();

        assert_eq!(snapshot.attendance.len(), 30);
        let mut present: u32 = 0;
        for entry in snapshot.attendance.values() {
            // Exactly one session counted so far for every student.
            assert_eq!(entry.total, 1);
            assert!(entry.attended <= 1);
            present = present.saturating_add(u32::try_from(entry.attended).unwrap_or(0));
            let expected_pct = if entry.attended == 1 { 100.0 } else { 0.0 };
            assert!((entry.pct - expected_pct).abs() < f64::EPSILON);
        }
        assert_eq!(snapshot.class_state.students_present, present);
    }

    #[test]
    fn unknown_subject_is_fatal() {
        let mut state = make_state();
        state.rooms.clear();
        let mut rng = SmallRng::seed_from_u64(1);
        let result = run_step(&mut state, &mut rng);
        assert!(matches!(result, Err(StepError::UnknownSubject { .. })));
    }
}
