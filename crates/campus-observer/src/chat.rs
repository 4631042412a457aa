//! Keyword query responder.
//!
//! `POST /admin/chat` matches the incoming message against a fixed,
//! ordered set of trigger phrases and templates a reply from the latest
//! snapshot. This is a static lookup, not language understanding: an
//! unmatched message gets the fixed fallback string, and nothing here
//! ever mutates simulation state.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use campus_types::{SessionStatus, StepSnapshot};

use crate::state::AppState;

/// Percentage threshold for the low-attendance listing.
const LOW_ATTENDANCE_PCT: f64 = 75.0;

/// Request body for the chat endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ChatRequest {
    /// The message to match against the trigger phrases.
    pub message: String,
}

/// Response body for the chat endpoint.
#[derive(Debug, serde::Serialize)]
pub struct ChatResponse {
    /// The templated reply.
    pub response: String,
}

/// Answer a keyword query from the latest snapshot.
///
/// A body without a `message` field is rejected by the `Json` extractor
/// before this handler runs (client error, per the boundary contract).
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let snapshot = state.latest();
    Json(ChatResponse {
        response: respond(&request.message, &snapshot),
    })
}

/// Match a message against the trigger phrases, first match wins.
///
/// Matching is case-insensitive. The categories, in order: low-attendance
/// list, presence count, cancellation status, teacher location.
pub fn respond(message: &str, snapshot: &StepSnapshot) -> String {
    let msg = message.to_lowercase();
    let class_state = &snapshot.class_state;

    if msg.contains("low attendance") || msg.contains("below 75") {
        let low: Vec<&str> = snapshot
            .attendance
            .iter()
            .filter(|(_, entry)| entry.pct < LOW_ATTENDANCE_PCT)
            .map(|(id, _)| id.as_str())
            .collect();
        if low.is_empty() {
            String::from("Good news! No students are below 75% attendance currently.")
        } else {
            format!(
                "Students with low attendance (<75%): {}",
                low.join(", ")
            )
        }
    } else if msg.contains("present") || msg.contains("how many") {
        format!(
            "Currently, {} out of {} students are present.",
            class_state.students_present, class_state.total_students
        )
    } else if msg.contains("cancelled") || msg.contains("class status") {
        match class_state.class_status {
            SessionStatus::Cancelled => {
                format!("Yes, the current class ({}) is CANCELLED.", class_state.class)
            }
            SessionStatus::Ongoing => {
                format!("The current class ({}) is ONGOING.", class_state.class)
            }
        }
    } else if msg.contains("teacher") || msg.contains("where") {
        match class_state.class_status {
            SessionStatus::Ongoing => format!(
                "{} is currently in {}.",
                class_state.teacher, class_state.room
            ),
            SessionStatus::Cancelled => format!(
                "{} is currently not in class (Class Triggered Cancel).",
                class_state.teacher
            ),
        }
    } else {
        String::from(
            "I didn't understand that. Try asking about 'low attendance', \
             'simulation status', or 'students present'.",
        )
    }
}
