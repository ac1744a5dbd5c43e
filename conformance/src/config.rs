//! Suite configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TODOS_BASE_URL` | https://jsonplaceholder.typicode.com/todos | Collection URL under test |
//! | `TODOS_TIMEOUT_SECS` | 30 | Per-request timeout, 0 for ureq's defaults |
//! | `TODOS_LOG_LEVEL` | info | Log level when `RUST_LOG` is unset |

use std::time::Duration;

use clap::{Parser, ValueEnum};
use todo_core::TodoClient;

use crate::catalog::Group;
use crate::error::RunError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration for one conformance run.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-conformance")]
#[command(about = "Black-box conformance checks for a todos REST API")]
pub struct SuiteConfig {
    /// URL of the todos collection.
    #[arg(long, env = "TODOS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds (0 keeps the HTTP client's defaults).
    #[arg(long, env = "TODOS_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TODOS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Case group to run; repeat for several. Runs every group when omitted.
    #[arg(long = "group", value_enum)]
    pub groups: Vec<Group>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SuiteConfig {
    /// Configuration for running against `base_url` with every group.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            log_level: "info".to_string(),
            groups: Vec::new(),
            format: OutputFormat::Text,
        }
    }

    /// Requires an absolute http(s) URL with a host and no query or fragment.
    /// Item paths and filter queries are appended to it verbatim.
    pub fn validate(&self) -> Result<(), RunError> {
        let invalid = |reason: String| RunError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let parsed = url::Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(invalid(format!("scheme '{scheme}' is not http or https"))),
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        if parsed.query().is_some() {
            return Err(invalid("must not carry a query string".to_string()));
        }
        if parsed.fragment().is_some() {
            return Err(invalid("must not carry a fragment".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn selected_groups(&self) -> Vec<Group> {
        if self.groups.is_empty() {
            Group::ALL.to_vec()
        } else {
            self.groups.clone()
        }
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(self.base_url.trim())
    }
}
