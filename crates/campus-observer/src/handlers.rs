//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read the latest [`StepSnapshot`](campus_types::StepSnapshot)
//! via the shared [`AppState`]; none of them touches simulation state or
//! waits on the step loop.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/student/status` | Current-state view |
//! | `GET` | `/student/attendance/:id` | One student's attendance row |
//! | `GET` | `/admin/dashboard` | Aggregate dashboard |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use campus_core::step::round_to_tenth;
use campus_types::{ClassState, StudentId};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the current step and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.latest();
    let step = snapshot.step;
    let time = &snapshot.class_state.time;
    let class = &snapshot.class_state.class;
    let status = snapshot.class_state.class_status;
    let present = snapshot.class_state.students_present;
    let total = snapshot.class_state.total_students;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Campus Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Campus Observer</h1>

    <div>
        <div class="metric">
            <div class="label">Step</div>
            <div class="value">{step}</div>
        </div>
        <div class="metric">
            <div class="label">Slot</div>
            <div class="value">{time}</div>
        </div>
        <div class="metric">
            <div class="label">Class</div>
            <div class="value">{class}</div>
        </div>
        <div class="metric">
            <div class="label">Status</div>
            <div class="value">{status}</div>
        </div>
        <div class="metric">
            <div class="label">Present</div>
            <div class="value">{present}/{total}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/student/status">GET /student/status</a> -- current-state view</li>
        <li>GET /student/attendance/:id -- one student's attendance</li>
        <li><a href="/admin/dashboard">GET /admin/dashboard</a> -- aggregate dashboard</li>
        <li>POST /admin/chat -- keyword queries</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/steps</code> -- live step summary stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /student/status -- current-state view
// ---------------------------------------------------------------------------

/// Return the current-state view as a flat object.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ClassState> {
    let snapshot = state.latest();
    Json(snapshot.class_state.clone())
}

// ---------------------------------------------------------------------------
// GET /student/attendance/:id -- one student's attendance row
// ---------------------------------------------------------------------------

/// Return one student's attendance totals and percentage.
///
/// An id never issued by the roster is a 404 -- never zero-filled data.
pub async fn get_attendance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.latest();
    let student_id = StudentId::new(id);

    let entry = snapshot
        .attendance
        .get(&student_id)
        .ok_or_else(|| ObserverError::NotFound(format!("student {student_id}")))?;

    Ok(Json(serde_json::json!({
        "id": student_id,
        "attended": entry.attended,
        "total": entry.total,
        "pct": entry.pct,
    })))
}

// ---------------------------------------------------------------------------
// GET /admin/dashboard -- aggregate dashboard
// ---------------------------------------------------------------------------

/// Return the aggregate dashboard derived from the latest snapshot.
///
/// The overall percentage is `100 * sum(attended) / sum(total)` across
/// the whole roster, rounded to one decimal, or 0 when nothing has been
/// counted yet.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.latest();

    let (attended, total) = snapshot
        .attendance
        .values()
        .fold((0_u64, 0_u64), |(attended, total), entry| {
            (
                attended.saturating_add(entry.attended),
                total.saturating_add(entry.total),
            )
        });

    #[allow(clippy::cast_precision_loss)]
    let overall_pct = if total == 0 {
        0.0
    } else {
        round_to_tenth((attended as f64 / total as f64) * 100.0)
    };

    Json(serde_json::json!({
        "current_class": snapshot.class_state.class,
        "status": snapshot.class_state.class_status,
        "students_present": snapshot.class_state.students_present,
        "overall_attendance_pct": overall_pct,
    }))
}
