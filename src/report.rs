//! Structured result of an orchestrator run, one record per pass.
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Applied,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassOutcome {
    pub name: String,
    pub disposition: Disposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PassOutcome {
    pub fn applied(name: &str, note: Option<String>) -> Self {
        Self { name: name.to_string(), disposition: Disposition::Applied, reason: note }
    }

    pub fn skipped(name: &str, reason: String) -> Self {
        Self { name: name.to_string(), disposition: Disposition::Skipped, reason: Some(reason) }
    }

    pub fn failed(name: &str, reason: String) -> Self {
        Self { name: name.to_string(), disposition: Disposition::Failed, reason: Some(reason) }
    }
}

/// Everything a caller needs to diagnose a run without re-running it.
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub target: PathBuf,
    pub outcomes: Vec<PassOutcome>,
    /// False when a required pass failed; the target was not rewritten.
    pub success: bool,
    /// Whether the document was written back to disk.
    pub persisted: bool,
    /// Final document text, captured on dry runs so callers can see what a
    /// real run would have written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl PatchReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn failed_passes(&self) -> impl Iterator<Item = &PassOutcome> {
        self.outcomes.iter().filter(|o| o.disposition == Disposition::Failed)
    }
}

impl std::fmt::Display for PatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.target.display())?;
        for outcome in &self.outcomes {
            let state = match outcome.disposition {
                Disposition::Applied => "applied",
                Disposition::Skipped => "skipped",
                Disposition::Failed => "failed",
            };
            match &outcome.reason {
                Some(reason) => writeln!(f, "  {} … {state} ({reason})", outcome.name)?,
                None => writeln!(f, "  {} … {state}", outcome.name)?,
            }
        }
        write!(f, "result: {}", if self.success { "ok" } else { "required pass failed" })
    }
}
