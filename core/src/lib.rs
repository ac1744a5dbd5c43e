//! Synchronous API client core for the todos service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the collection URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Path ids, query values and loosely-typed body fields are [`Fixture`]s,
//!   so boundary inputs go out on the wire exactly as written.

pub mod client;
pub mod error;
pub mod fixture;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use fixture::Fixture;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewTodo, Todo, TodoPatch, TodoReplacement};
