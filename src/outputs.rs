//! Step outputs for downstream workflow steps
//!
//! The CI runner collects outputs from a file named by the `GITHUB_OUTPUT`
//! environment variable, one `name=value` line per output (with a heredoc
//! form for multi-line values). Outputs are written once at the end of a run.

use crate::error::Result;
use crate::types::ConflictReport;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const MULTILINE_DELIMITER: &str = "__PR_AUTOUPDATE_EOF__";

/// Sink for step outputs
#[derive(Debug, Clone)]
pub struct StepOutputs {
    path: PathBuf,
}

impl StepOutputs {
    /// Create a sink writing to the given file
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a sink from the `GITHUB_OUTPUT` environment variable
    ///
    /// Returns `None` when the variable is unset (e.g. local runs), in which
    /// case outputs are skipped.
    pub fn from_env() -> Option<Self> {
        std::env::var("GITHUB_OUTPUT")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| Self::new(PathBuf::from(v)))
    }

    /// Append a single output
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if value.contains('\n') {
            writeln!(file, "{name}<<{MULTILINE_DELIMITER}")?;
            writeln!(file, "{value}")?;
            writeln!(file, "{MULTILINE_DELIMITER}")?;
        } else {
            writeln!(file, "{name}={value}")?;
        }

        Ok(())
    }

    /// Write the conflict outputs for a finished run
    ///
    /// `hasConflicts` is always set; `conflictedPullRequestJSON` carries every
    /// conflicted PR from the run as a JSON array, in processing order.
    pub fn write_conflicts(&self, conflicts: &[ConflictReport]) -> Result<()> {
        self.set("hasConflicts", if conflicts.is_empty() { "false" } else { "true" })?;
        self.set(
            "conflictedPullRequestJSON",
            &serde_json::to_string(conflicts)?,
        )?;
        Ok(())
    }
}
