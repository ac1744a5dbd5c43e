//! Error types for conformance runs.
//!
//! A case fails with either a [`TransportError`] (no response at all) or a
//! [`Mismatch`] (a response that does not meet its expectation). Both stay
//! local to the case; only [`RunError`] aborts a whole run.

use serde_json::Value;
use thiserror::Error;
use todo_core::{ApiError, HttpMethod, HttpRequest};

/// The request never produced a response.
#[derive(Debug, Error)]
#[error("{method} {url}: {source}")]
pub struct TransportError {
    pub method: HttpMethod,
    pub url: String,
    #[source]
    pub source: ureq::Error,
}

impl TransportError {
    pub fn new(request: &HttpRequest, source: ureq::Error) -> Self {
        Self {
            method: request.method,
            url: request.path.clone(),
            source,
        }
    }
}

/// A response that does not meet its expectation.
#[derive(Debug, Error, PartialEq)]
pub enum Mismatch {
    #[error("expected status {expected}, got {actual}: {body}")]
    Status {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("body is not JSON: {0}")]
    NotJson(String),

    #[error("expected {expected}, got {actual}")]
    Shape { expected: &'static str, actual: Value },

    #[error("expected {expected} items, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("field `{field}`: expected {expected}, got {}", shown(.actual))]
    Field {
        field: &'static str,
        expected: Value,
        actual: Option<Value>,
    },

    #[error("item {index} field `{field}`: expected {expected}, got {}", shown(.actual))]
    Item {
        index: usize,
        field: &'static str,
        expected: Value,
        actual: Option<Value>,
    },
}

fn shown(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map_or_else(|| "nothing".to_string(), Value::to_string)
}

/// Why a single case failed.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("step {step} ({method} {url}): {mismatch}")]
    Mismatch {
        step: usize,
        method: HttpMethod,
        url: String,
        #[source]
        mismatch: Mismatch,
    },
}

/// Failures that stop a run before any case executes, or after all have.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("could not build case catalog: {0}")]
    Catalog(#[from] ApiError),

    #[error("could not render report: {0}")]
    Render(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_mismatch_shows_missing_value() {
        let err = Mismatch::Field {
            field: "id",
            expected: json!(1),
            actual: None,
        };
        assert_eq!(err.to_string(), "field `id`: expected 1, got nothing");
    }

    #[test]
    fn item_mismatch_shows_actual_json() {
        let err = Mismatch::Item {
            index: 3,
            field: "userId",
            expected: json!(2),
            actual: Some(json!("2")),
        };
        assert_eq!(err.to_string(), r#"item 3 field `userId`: expected 2, got "2""#);
    }
}
