use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Terminal state of a check. A report that is never resolved counts as passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    #[default]
    Passed,
    Skipped,
    Failed,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckResult::Passed => "PASSED",
            CheckResult::Skipped => "SKIPPED",
            CheckResult::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Outcome of one check: ordered info lines plus at most one fatal line.
///
/// Info lines are append-only. `skip` and `fatal` each resolve the report and
/// may be called once between them; a second call is an error.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    name: String,
    infos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fatal: Option<String>,
    result: CheckResult,
    #[serde(skip)]
    resolved: bool,
}

impl Report {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            infos: Vec::new(),
            fatal: None,
            result: CheckResult::default(),
            resolved: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn fatal_message(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn result(&self) -> CheckResult {
        self.result
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::debug!(check = %self.name, "{}", msg);
        self.infos.push(msg);
    }

    /// Mark the check as skipped: it ran but could not reach a decision.
    pub fn skip(&mut self) -> Result<()> {
        self.resolve(CheckResult::Skipped)
    }

    /// Record the terminal failure message and mark the check failed.
    pub fn fatal(&mut self, msg: impl Into<String>) -> Result<()> {
        self.resolve(CheckResult::Failed)?;
        self.fatal = Some(msg.into());
        Ok(())
    }

    fn resolve(&mut self, state: CheckResult) -> Result<()> {
        if self.resolved {
            return Err(Error::ReportResolved {
                check: self.name.clone(),
                state: self.result,
            });
        }
        self.resolved = true;
        self.result = state;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} -- {}", self.name, self.result)?;
        for line in &self.infos {
            writeln!(f, "  [INFO] {}", line)?;
        }
        if let Some(line) = &self.fatal {
            writeln!(f, "  [FATAL] {}", line)?;
        }
        Ok(())
    }
}
