//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use campus_observer::router::build_router;
use campus_observer::state::AppState;
use campus_types::{
    AttendanceEntry, ClassState, SessionStatus, StepSnapshot, StudentId, Subject,
};
use serde_json::Value;
use tower::ServiceExt;

fn make_snapshot(status: SessionStatus) -> StepSnapshot {
    let mut attendance = BTreeMap::new();
    attendance.insert(
        StudentId::new("S01"),
        AttendanceEntry {
            attended: 3,
            total: 4,
            pct: 75.0,
        },
    );
    attendance.insert(
        StudentId::new("S02"),
        AttendanceEntry {
            attended: 1,
            total: 4,
            pct: 25.0,
        },
    );
    StepSnapshot {
        step: 4,
        class_state: ClassState {
            time: String::from("10:00-11:00"),
            class: Subject::from("DBMS"),
            room: String::from("Block B - 204"),
            teacher: String::from("Dr. Rao"),
            class_status: status,
            students_present: 2,
            total_students: 2,
        },
        attendance,
    }
}

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(make_snapshot(SessionStatus::Ongoing)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn chat_request(body: &str) -> Request<Body> {
    Request::post("/admin/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn index_returns_html() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn status_returns_the_flat_current_state() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/student/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["time"], "10:00-11:00");
    assert_eq!(json["class"], "DBMS");
    assert_eq!(json["room"], "Block B - 204");
    assert_eq!(json["teacher"], "Dr. Rao");
    assert_eq!(json["class_status"], "ONGOING");
    assert_eq!(json["students_present"], 2);
    assert_eq!(json["total_students"], 2);
}

#[tokio::test]
async fn attendance_returns_one_student() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/student/attendance/S01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "S01");
    assert_eq!(json["attended"], 3);
    assert_eq!(json["total"], 4);
    assert_eq!(json["pct"], 75.0);
}

#[tokio::test]
async fn unknown_student_is_a_404() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/student/attendance/S99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn dashboard_aggregates_the_roster() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/admin/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["current_class"], "DBMS");
    assert_eq!(json["status"], "ONGOING");
    assert_eq!(json["students_present"], 2);
    // (3 + 1) / (4 + 4) = 50%
    assert_eq!(json["overall_attendance_pct"], 50.0);
}

#[tokio::test]
async fn dashboard_with_empty_counters_reports_zero() {
    let mut snapshot = make_snapshot(SessionStatus::Ongoing);
    for entry in snapshot.attendance.values_mut() {
        entry.attended = 0;
        entry.total = 0;
        entry.pct = 100.0;
    }
    let state = Arc::new(AppState::new(snapshot));
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/admin/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["overall_attendance_pct"], 0.0);
}

#[tokio::test]
async fn chat_answers_the_low_attendance_category() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(chat_request(r#"{"message": "show me low attendance"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json["response"],
        "Students with low attendance (<75%): S02"
    );
}

#[tokio::test]
async fn chat_answers_the_presence_category() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(chat_request(r#"{"message": "how many are in?"}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["response"], "Currently, 2 out of 2 students are present.");
}

#[tokio::test]
async fn chat_falls_back_on_unmatched_input() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(chat_request(r#"{"message": "sing me a song"}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    let reply = json["response"].as_str().unwrap();
    assert!(reply.starts_with("I didn't understand that."));
}

#[tokio::test]
async fn chat_rejects_a_body_without_a_message() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(chat_request(r#"{"text": "wrong field"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn chat_rejects_invalid_json() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router.oneshot(chat_request("not json")).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn readers_see_the_newly_published_step() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let mut next = make_snapshot(SessionStatus::Cancelled);
    next.step = 5;
    next.class_state.students_present = 0;
    state.publish(Arc::new(next));

    let response = router
        .oneshot(
            Request::get("/student/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["class_status"], "CANCELLED");
    assert_eq!(json["students_present"], 0);
}
