//! Cyclic time-slot clock with an independent subject rotation.
//!
//! The clock is the single source of truth for temporal state. It tracks
//! a slot index over the configured time-slot labels; the scheduled
//! subject is derived from the same index with its own modulus -- never
//! stored independently.
//!
//! The two rotations deliberately wrap independently: with three slots
//! and two subjects the (slot, subject) pairing repeats only every
//! `lcm(3, 2) = 6` advances. Collapsing them into one rotation would
//! change the schedule; both moduli are kept as-is.

use campus_types::Subject;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid schedule configuration (empty slot or subject list).
    #[error("invalid schedule configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// A derived index fell outside its table. Cannot happen given the
    /// constructor validation; detection means corrupted state.
    #[error("schedule index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the table it missed.
        len: usize,
    },
}

/// The slot a step runs in: label plus the subject scheduled for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    /// Label of the time slot (e.g. `09:00-10:00`).
    pub time: String,
    /// The subject derived for this slot.
    pub subject: Subject,
}

/// Clock tracking the simulation's position in the daily schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleClock {
    /// Current slot index (0-based, cyclic over the slot labels).
    slot_index: usize,

    /// Ordered time-slot labels forming the daily cycle.
    slots: Vec<String>,

    /// Ordered subject rotation, wrapped with its own modulus.
    subjects: Vec<Subject>,
}

impl ScheduleClock {
    /// Create a clock positioned at slot 0 with the first subject
    /// scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if either list is empty.
    pub fn new(slots: Vec<String>, subjects: Vec<Subject>) -> Result<Self, ClockError> {
        if slots.is_empty() {
            return Err(ClockError::InvalidConfig {
                reason: "at least one time slot must be configured".to_owned(),
            });
        }
        if subjects.is_empty() {
            return Err(ClockError::InvalidConfig {
                reason: "at least one subject must be configured".to_owned(),
            });
        }
        Ok(Self {
            slot_index: 0,
            slots,
            subjects,
        })
    }

    /// Return the current slot index.
    pub const fn slot_index(&self) -> usize {
        self.slot_index
    }

    /// Advance to the next slot and return it.
    ///
    /// Moves `slot_index` to `(slot_index + 1) % n_slots` and derives the
    /// subject as `subjects[slot_index % n_subjects]`. Pure given the
    /// index; the subject rotation wraps independently of the slot-label
    /// rotation.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::IndexOutOfBounds`] only if internal state is
    /// corrupt; under the constructor invariants this cannot happen.
    pub fn advance(&mut self) -> Result<ScheduleSlot, ClockError> {
        // n_slots >= 1 is guaranteed by the constructor.
        self.slot_index = self
            .slot_index
            .checked_add(1)
            .and_then(|next| next.checked_rem(self.slots.len()))
            .unwrap_or(0);
        self.current()
    }

    /// Return the current slot without advancing.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::IndexOutOfBounds`] only if internal state is
    /// corrupt.
    pub fn current(&self) -> Result<ScheduleSlot, ClockError> {
        let time = self
            .slots
            .get(self.slot_index)
            .cloned()
            .ok_or_else(|| ClockError::IndexOutOfBounds {
                index: self.slot_index,
                len: self.slots.len(),
            })?;

        let subject_index = self
            .slot_index
            .checked_rem(self.subjects.len())
            .unwrap_or(0);
        let subject = self
            .subjects
            .get(subject_index)
            .cloned()
            .ok_or_else(|| ClockError::IndexOutOfBounds {
                index: subject_index,
                len: self.subjects.len(),
            })?;

        Ok(ScheduleSlot { time, subject })
    }
}
