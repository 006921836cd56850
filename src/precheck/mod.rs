pub mod os_version;
pub mod report;

use std::sync::Arc;

use crate::catalog::SupportedOsValidator;
use crate::error::{Error, Result};
use crate::logging::audit_report;
use crate::osinfo::OsInfo;

pub use os_version::{split_os_version, OsFamily, OsVersionCheck, DOCS_URL};
pub use report::{CheckResult, Report};

/// A named precheck step.
///
/// `run` only returns an error when the check itself could not run;
/// unsupported or undeterminable systems are reported in the `Report`.
pub trait Check: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self) -> Result<Report>;
}

/// All prechecks for one disk, in execution order.
pub fn all_checks(os_info: OsInfo, validator: Arc<dyn SupportedOsValidator>) -> Vec<Box<dyn Check>> {
    vec![Box::new(OsVersionCheck::new(os_info).with_validator(validator))]
}

/// Run every check and collect its report.
pub fn run_all(checks: &[Box<dyn Check>]) -> Result<Vec<Report>> {
    let mut reports = Vec::with_capacity(checks.len());
    for (idx, check) in checks.iter().enumerate() {
        let _span = tracing::info_span!("check", name = %check.name(), idx = idx + 1, total = checks.len())
            .entered();
        let report = check.run()?;
        tracing::info!(result = %report.result(), "check finished");
        let _ = audit_report(&report);
        reports.push(report);
    }
    Ok(reports)
}

/// Collapse reports into a process outcome. Skipped checks only fail in strict mode.
pub fn verdict(reports: &[Report], strict: bool) -> Result<()> {
    let names_with = |state: CheckResult| {
        reports
            .iter()
            .filter(|r| r.result() == state)
            .map(Report::name)
            .collect::<Vec<_>>()
    };
    let failed = names_with(CheckResult::Failed);
    if !failed.is_empty() {
        return Err(Error::Unsupported(failed.join(", ")));
    }
    let skipped = names_with(CheckResult::Skipped);
    if strict && !skipped.is_empty() {
        return Err(Error::Undetermined(skipped.join(", ")));
    }
    Ok(())
}
