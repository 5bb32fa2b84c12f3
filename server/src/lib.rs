//! HTTP API for the task store.
//!
//! # Overview
//! Five operations over a single `tasks` collection: list (with search and
//! completed filters), create, read, update, delete. Handlers validate
//! input, translate outcomes to status codes and JSON, and delegate storage
//! to [`store::TaskStore`].
//!
//! # Design
//! - Each request is handled independently; there is no server-side session
//!   state beyond the shared store handle.
//! - Create validates `name` in the handler (not the extractor) so failures
//!   produce the field-keyed 422 payload instead of a deserialization error.
//! - Update is a partial merge and intentionally skips name validation;
//!   omitted fields keep their stored values.

pub mod error;
pub mod store;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use store::{Task, TaskFilter, TaskStore};

pub type Db = Arc<TaskStore>;

#[derive(Deserialize)]
pub struct CreateTask {
    pub name: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub completed: Option<String>,
}

pub fn app(store: TaskStore) -> Router {
    let db: Db = Arc::new(store);
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: TaskStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Parse the loosely-typed `completed` query value. Unparseable input yields
/// `None`, meaning the filter is simply not applied.
fn parse_lenient_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

async fn list_tasks(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let filter = TaskFilter {
        search: params.search,
        completed: params.completed.as_deref().and_then(parse_lenient_bool),
    };
    let tasks = db
        .list(&filter)
        .await
        .map_err(|e| ApiError::from_store(e, "Unable to retrieve tasks"))?;
    Ok(Json(tasks))
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let name = input.name.as_deref().unwrap_or("");
    if name.is_empty() {
        return Err(ApiError::validation("name", "The name field is required."));
    }
    if name.chars().count() > 255 {
        return Err(ApiError::validation(
            "name",
            "The name field must not be greater than 255 characters.",
        ));
    }
    let task = db
        .create(name, input.completed.unwrap_or(false))
        .await
        .map_err(|e| ApiError::from_store(e, "Unable to create task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, ApiError> {
    let task = db
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Unable to retrieve task"))?;
    Ok(Json(task))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, ApiError> {
    let task = db
        .update(id, input.name, input.completed)
        .await
        .map_err(|e| ApiError::from_store(e, "Unable to update task"))?;
    Ok(Json(task))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    db.delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Unable to delete task"))?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
