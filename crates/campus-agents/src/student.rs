//! Student attendance model.
//!
//! Each student keeps per-subject `{attended, total}` counters and a
//! derived attendance percentage recomputed from the full counter set
//! after every update. The attend/skip decision is a Bernoulli draw whose
//! probability depends on the percentage *as it stood before the current
//! step* -- a negative-feedback policy: comfortable students slack off a
//! little, struggling students are driven back to class.

use std::collections::BTreeMap;

use campus_types::{SessionStatus, StudentDecision, StudentId, Subject, SubjectCounters};
use rand::Rng;

use crate::error::AgentError;

/// Attendance percentage before any session has been counted.
const STARTING_PCT: f64 = 100.0;

/// Percentage chance to attend when comfortably above the upper band.
const ATTEND_CHANCE_HIGH_PCT: u32 = 85;

/// Percentage chance to attend inside the 75-80 band.
const ATTEND_CHANCE_MID_PCT: u32 = 95;

/// Percentage chance to attend when below the danger threshold.
const ATTEND_CHANCE_LOW_PCT: u32 = 99;

/// Upper band boundary: above this the student can afford to skip.
const COMFORT_THRESHOLD_PCT: f64 = 80.0;

/// Lower band boundary: below this the student is in trouble.
const DANGER_THRESHOLD_PCT: f64 = 75.0;

/// A single enrolled student.
///
/// Created once at simulation start with zero counters, mutated exactly
/// once per step, never destroyed during the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAgent {
    id: StudentId,
    record: BTreeMap<Subject, SubjectCounters>,
    attendance_pct: f64,
}

impl StudentAgent {
    /// Create a student with zeroed counters for every enrolled subject.
    pub fn new(id: StudentId, subjects: &[Subject]) -> Self {
        let record = subjects
            .iter()
            .map(|subject| (subject.clone(), SubjectCounters::default()))
            .collect();
        Self {
            id,
            record,
            attendance_pct: STARTING_PCT,
        }
    }

    /// Return the roster id.
    pub const fn id(&self) -> &StudentId {
        &self.id
    }

    /// Return the per-subject counter table.
    pub const fn record(&self) -> &BTreeMap<Subject, SubjectCounters> {
        &self.record
    }

    /// Return the current attendance percentage (0-100).
    pub const fn attendance_pct(&self) -> f64 {
        self.attendance_pct
    }

    /// Sum the counters across all subjects as `(attended, total)`.
    pub fn totals(&self) -> (u64, u64) {
        self.record.values().fold((0, 0), |(attended, total), c| {
            (
                attended.saturating_add(u64::from(c.attended)),
                total.saturating_add(u64::from(c.total)),
            )
        })
    }

    /// Decide whether to attend this step's session.
    ///
    /// A cancelled session is always skipped and consumes no draw. For an
    /// ongoing session the attend probability is selected from the
    /// *current* (pre-update) percentage: above 80% attend at 85%, below
    /// 75% attend at 99%, otherwise attend at 95%.
    pub fn decide(&self, status: SessionStatus, rng: &mut impl Rng) -> StudentDecision {
        if status == SessionStatus::Cancelled {
            return StudentDecision::Skip;
        }

        let attend_chance = if self.attendance_pct > COMFORT_THRESHOLD_PCT {
            ATTEND_CHANCE_HIGH_PCT
        } else if self.attendance_pct < DANGER_THRESHOLD_PCT {
            ATTEND_CHANCE_LOW_PCT
        } else {
            ATTEND_CHANCE_MID_PCT
        };

        let roll: u32 = rng.random_range(0..100);
        if roll < attend_chance {
            StudentDecision::Attend
        } else {
            StudentDecision::Skip
        }
    }

    /// Record this step's outcome and recompute the percentage.
    ///
    /// When the session is ongoing, increments the subject's `total` and
    /// increments `attended` iff the student attended. A cancelled session
    /// leaves the counters untouched. The percentage is then recomputed
    /// from the full counter set, not just the touched subject.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotEnrolled`] for an unknown subject,
    /// [`AgentError::CounterOverflow`] if an increment would overflow, and
    /// [`AgentError::InvariantViolation`] if `attended > total` is ever
    /// observed. All three are fatal defects, not recoverable conditions.
    pub fn update(
        &mut self,
        subject: &Subject,
        decision: StudentDecision,
        status: SessionStatus,
    ) -> Result<(), AgentError> {
        if status == SessionStatus::Ongoing {
            let counters =
                self.record
                    .get_mut(subject)
                    .ok_or_else(|| AgentError::NotEnrolled {
                        student: self.id.clone(),
                        subject: subject.clone(),
                    })?;

            counters.total =
                counters
                    .total
                    .checked_add(1)
                    .ok_or_else(|| AgentError::CounterOverflow {
                        student: self.id.clone(),
                        subject: subject.clone(),
                    })?;

            if decision == StudentDecision::Attend {
                counters.attended =
                    counters
                        .attended
                        .checked_add(1)
                        .ok_or_else(|| AgentError::CounterOverflow {
                            student: self.id.clone(),
                            subject: subject.clone(),
                        })?;
            }

            if counters.attended > counters.total {
                return Err(AgentError::InvariantViolation {
                    student: self.id.clone(),
                    subject: subject.clone(),
                    attended: counters.attended,
                    total: counters.total,
                });
            }
        }

        self.recompute_pct();
        Ok(())
    }

    /// Recompute the percentage from all counters.
    ///
    /// 100.0 when no session has been counted yet.
    #[allow(clippy::cast_precision_loss)]
    fn recompute_pct(&mut self) {
        let (attended, total) = self.totals();
        self.attendance_pct = if total == 0 {
            STARTING_PCT
        } else {
            (attended as f64 / total as f64) * 100.0
        };
    }
}
