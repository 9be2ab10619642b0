use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::data::{Exam, Schedule, SchedulingInput, Teacher, TimeSlot};
use crate::error::Error;
use crate::schedule::build_schedule;
use crate::session::{ScheduleRecord, Session, solve_snapshot};

/// Shared state behind the session endpoints.
#[derive(Clone, Default)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

/// Error body returned as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = if e.is_internal() {
            error!("Internal scheduling error: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("Solver task failed: {e}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "solver task failed".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub name: String,
    pub time_slot: String,
}

/// Unavailable slots may come as a list, as a comma separated string, or both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    #[serde(default)]
    pub unavailable_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub unavailable: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub exams: Vec<Exam>,
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub summary: String,
    #[serde(flatten)]
    pub record: ScheduleRecord,
}

async fn solve_handler(Json(input): Json<SchedulingInput>) -> Result<Json<Schedule>, ApiError> {
    input.validate().map_err(Error::InvalidInput)?;
    let schedule =
        tokio::task::spawn_blocking(move || build_schedule(&input.exams, &input.teachers))
            .await??;
    Ok(Json(schedule))
}

async fn session_handler(State(state): State<AppState>) -> Json<SessionView> {
    let snapshot = state.session.lock().await.snapshot();
    Json(SessionView {
        exams: snapshot.exams,
        teachers: snapshot.teachers,
    })
}

async fn add_exam_handler(
    State(state): State<AppState>,
    Json(body): Json<NewExam>,
) -> Result<(StatusCode, Json<Exam>), ApiError> {
    let mut session = state.session.lock().await;
    let exam = session.add_exam(&body.name, &body.time_slot)?;
    Ok((StatusCode::CREATED, Json(exam)))
}

async fn add_teacher_handler(
    State(state): State<AppState>,
    Json(body): Json<NewTeacher>,
) -> Result<(StatusCode, Json<Teacher>), ApiError> {
    let mut slots = body.unavailable_slots;
    if let Some(text) = &body.unavailable {
        slots.extend(Teacher::parse_unavailable(text));
    }

    let mut session = state.session.lock().await;
    let teacher = session.add_teacher(&body.name, slots)?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

async fn schedule_handler(State(state): State<AppState>) -> Result<Json<Schedule>, ApiError> {
    // the lock is not held while searching; a clear in the meantime
    // makes `record` drop the result
    let snapshot = state.session.lock().await.snapshot();
    let generation = snapshot.generation;
    let schedule = tokio::task::spawn_blocking(move || {
        solve_snapshot(&snapshot.exams, &snapshot.teachers)
    })
    .await??;

    state.session.lock().await.record(generation, &schedule);
    Ok(Json(schedule))
}

async fn history_handler(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    let session = state.session.lock().await;
    let entries = session
        .history()
        .iter()
        .map(|record| HistoryEntry {
            summary: record.summary(),
            record: record.clone(),
        })
        .collect();
    Json(entries)
}

async fn clear_handler(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.clear();
    StatusCode::NO_CONTENT
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/session", get(session_handler).delete(clear_handler))
        .route("/v1/session/exams", post(add_exam_handler))
        .route("/v1/session/teachers", post(add_teacher_handler))
        .route("/v1/session/schedule", post(schedule_handler))
        .route("/v1/session/history", get(history_handler))
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr) -> std::io::Result<()> {
    let app = router(AppState::default());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down.");
}
