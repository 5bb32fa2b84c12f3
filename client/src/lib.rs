//! Synchronous API client for the task service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A [`Transport`]
//! implementation supplied by the host executes the actual round-trips, so
//! the core stays deterministic and testable.
//!
//! # Design
//! - `TaskClient` is stateless — it holds only `base_url`. Each CRUD
//!   operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TaskSession` layers the client-side state on top: the in-memory mirror
//!   of the task collection, the loading flag, the last error message, and
//!   the current filters.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::TaskClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::TaskSession;
pub use types::{CreateTask, Task, TaskFilters, UpdateTask};
