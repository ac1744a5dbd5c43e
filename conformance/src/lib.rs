//! Black-box conformance checks for a todos REST API.
//!
//! # Overview
//! The suite probes a todos collection (200 seeded records with `id`,
//! `userId`, `title` and `completed`) with boundary and equivalence-class
//! inputs for every verb, and asserts status codes and JSON shapes.
//!
//! # Design
//! - [`catalog`] turns fixtures into [`Case`]s using the `todo-core` request
//!   builder. Cases are plain data.
//! - [`expect`] checks a response against a status and body shape.
//! - [`runner`] executes cases one at a time over a [`Transport`] and
//!   collects a [`Report`]. A failing case never stops the run.
//! - [`session`] is the `ureq` transport; one agent serves the whole run.

pub mod catalog;
pub mod config;
pub mod error;
pub mod expect;
pub mod runner;
pub mod session;

pub use catalog::{catalog, select, Case, Group, Step};
pub use config::{OutputFormat, SuiteConfig};
pub use error::{CaseError, Mismatch, RunError, TransportError};
pub use expect::{BodyShape, Expectation};
pub use runner::{run, run_case, CaseOutcome, Report};
pub use session::{Session, Transport};

/// Validate `config`, build the selected cases and run them over HTTP.
pub fn execute(config: &SuiteConfig) -> Result<Report, RunError> {
    config.validate()?;
    let client = config.client();
    let cases = select(&client, &config.selected_groups())?;
    tracing::info!(
        base_url = client.base_url(),
        cases = cases.len(),
        "starting conformance run"
    );
    let session = Session::new(config.timeout());
    Ok(run(&session, &cases))
}
