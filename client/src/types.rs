//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the server's wire schema but are defined independently;
//! the integration tests catch schema drift between the two crates. Optional
//! request fields use `skip_serializing_if` so an omitted field never appears
//! on the wire — the server treats absent fields as "keep the stored value".

use serde::{Deserialize, Serialize};

/// A single task returned by the API. Timestamps are server-maintained and
/// opaque to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new task. `completed` defaults to `false`
/// on the server when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// List criteria. `None` fields send no query parameter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub search: Option<String>,
    pub completed: Option<bool>,
}
