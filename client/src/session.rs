//! Client-side state layer: the in-memory mirror of the task collection.
//!
//! # Design
//! `TaskSession` owns the last server answer (`tasks`), the in-flight flag
//! (`loading`), the last user-facing error message, and the current filters.
//! Mutations patch the mirror from the server's response instead of
//! refetching: create appends, update replaces by id, delete removes by id.
//!
//! `update_filters` is a pure setter that only marks the session stale; the
//! actual refetch happens when the driving loop observes `is_stale` and calls
//! `reload`. That keeps a single trigger point for list requests, so filter
//! changes from several UI controls cannot race each other into duplicate
//! fetches. The session starts stale, which makes the first poll perform the
//! initial load.
//!
//! Every operation scopes `loading` around the request and records a
//! user-facing message on failure before re-raising the error, so the UI can
//! both render the banner and react to the failure. The messages are
//! presentation strings, not part of the wire contract.

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTask, Task, TaskFilters, UpdateTask};

#[derive(Debug, Clone, Copy)]
enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

pub struct TaskSession<T: Transport> {
    client: TaskClient,
    transport: T,
    tasks: Vec<Task>,
    filters: TaskFilters,
    loading: bool,
    error: Option<String>,
    stale: bool,
}

impl<T: Transport> TaskSession<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self {
            client,
            transport,
            tasks: Vec::new(),
            filters: TaskFilters::default(),
            loading: false,
            error: None,
            stale: true,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the filters changed since the last reload (or nothing has
    /// been loaded yet).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Pure state setter; never issues a request.
    pub fn update_filters(&mut self, filters: TaskFilters) {
        self.filters = filters;
        self.stale = true;
    }

    /// Fetch the list with the current filters and replace the mirror
    /// wholesale.
    pub fn reload(&mut self) -> Result<(), ApiError> {
        self.stale = false;
        let result = self.with_loading(|s| {
            let request = s.client.build_list_tasks(&s.filters);
            let response = s.transport.execute(&request)?;
            s.client.parse_list_tasks(response)
        });
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => Err(self.record_error(Operation::Load, err)),
        }
    }

    /// Create a task and append it to the mirror.
    pub fn create_task(&mut self, input: CreateTask) -> Result<Task, ApiError> {
        let result = self.with_loading(|s| {
            let request = s.client.build_create_task(&input)?;
            let response = s.transport.execute(&request)?;
            s.client.parse_create_task(response)
        });
        match result {
            Ok(task) => {
                self.tasks.push(task.clone());
                Ok(task)
            }
            Err(err) => Err(self.record_error(Operation::Create, err)),
        }
    }

    /// Update a task and replace its entry in the mirror.
    pub fn update_task(&mut self, id: i64, input: UpdateTask) -> Result<Task, ApiError> {
        let result = self.with_loading(|s| {
            let request = s.client.build_update_task(id, &input)?;
            let response = s.transport.execute(&request)?;
            s.client.parse_update_task(response)
        });
        match result {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task.clone();
                }
                Ok(task)
            }
            Err(err) => Err(self.record_error(Operation::Update, err)),
        }
    }

    /// Delete a task and remove it from the mirror.
    pub fn delete_task(&mut self, id: i64) -> Result<(), ApiError> {
        let result = self.with_loading(|s| {
            let request = s.client.build_delete_task(id);
            let response = s.transport.execute(&request)?;
            s.client.parse_delete_task(response)
        });
        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                Ok(())
            }
            Err(err) => Err(self.record_error(Operation::Delete, err)),
        }
    }

    /// Scope `loading` around the request so it resets on success and on
    /// every failure path alike.
    fn with_loading<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        self.loading = true;
        self.error = None;
        let result = f(self);
        self.loading = false;
        result
    }

    fn record_error(&mut self, op: Operation, err: ApiError) -> ApiError {
        self.error = Some(user_message(op, &err).to_string());
        err
    }
}

/// Map a failed operation to its user-facing message.
fn user_message(op: Operation, err: &ApiError) -> &'static str {
    match (op, err) {
        (_, ApiError::StoreUnavailable) => "Unable to connect to the database",
        (Operation::Create | Operation::Update, ApiError::Validation { .. }) => {
            if err.has_error_on("name") {
                "Task name is required"
            } else {
                "Invalid task data"
            }
        }
        (Operation::Update | Operation::Delete, ApiError::NotFound) => "Task not found",
        (Operation::Load, _) => "Failed to load tasks",
        (Operation::Create, _) => "Failed to create task",
        (Operation::Update, _) => "Failed to update task",
        (Operation::Delete, _) => "Failed to delete task",
    }
}
