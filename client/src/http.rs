//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The client
//! core builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — executing the round-trip is the job of a
//! [`Transport`] implementation supplied by the host (the TUI binary in this
//! workspace, a scripted fake in tests). Query pairs are carried unencoded;
//! the transport owns URL encoding.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TaskClient::build_*` methods and executed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `TaskClient::parse_*` methods for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes an `HttpRequest` against the network.
///
/// Implementations return every HTTP response as data, whatever its status —
/// status interpretation belongs to the parse methods. Only a failure to
/// produce a response at all (connection refused, DNS, timeout) is an error,
/// reported as [`ApiError::Transport`].
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}
