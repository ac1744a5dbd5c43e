//! Sequential case execution and the resulting report.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Case, Group};
use crate::config::OutputFormat;
use crate::error::CaseError;
use crate::session::Transport;

/// Result of a single case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub group: Group,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a run, one outcome per case in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub outcomes: Vec<CaseOutcome>,
}

impl Report {
    pub fn new(outcomes: Vec<CaseOutcome>) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        Self {
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
            outcomes,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            match &outcome.error {
                None => {
                    let _ = writeln!(out, "PASS {}", outcome.name);
                }
                Some(error) => {
                    let _ = writeln!(out, "FAIL {}: {error}", outcome.name);
                }
            }
        }
        let _ = write!(
            out,
            "{} passed, {} failed, {} total",
            self.passed, self.failed, self.total
        );
        out
    }
}

/// Run every case in order. A failing case never stops the run.
pub fn run<T: Transport + ?Sized>(transport: &T, cases: &[Case]) -> Report {
    let outcomes = cases.iter().map(|case| run_case(transport, case)).collect();
    let report = Report::new(outcomes);
    info!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        "conformance run finished"
    );
    report
}

pub fn run_case<T: Transport + ?Sized>(transport: &T, case: &Case) -> CaseOutcome {
    let result = execute_steps(transport, case);
    match &result {
        Ok(()) => debug!(case = %case.name, "pass"),
        Err(error) => warn!(case = %case.name, %error, "fail"),
    }
    CaseOutcome {
        name: case.name.clone(),
        group: case.group,
        passed: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
    }
}

fn execute_steps<T: Transport + ?Sized>(transport: &T, case: &Case) -> Result<(), CaseError> {
    for (index, step) in case.steps.iter().enumerate() {
        let response = transport.execute(&step.request)?;
        step.expect
            .check(&response)
            .map_err(|mismatch| CaseError::Mismatch {
                step: index + 1,
                method: step.request.method,
                url: step.request.path.clone(),
                mismatch,
            })?;
    }
    Ok(())
}
