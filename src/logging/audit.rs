use crate::precheck::Report;
use crate::Result;
use chrono::{Local, SecondsFormat};
use std::env;
use tracing::{event, Level};

/// Env var naming the JSONL file that receives audit events.
pub const AUDIT_LOG_ENV: &str = "IMPORT_PRECHECK_AUDIT_LOG";

/// Optional structured fields for audit events, promoted to top-level keys in JSONL.
#[derive(Default, Debug, Clone)]
pub struct AuditFields {
    pub check: Option<String>,
    pub short_name: Option<String>,
    pub version: Option<String>,
    pub architecture: Option<String>,
    pub infos: Option<Vec<String>>, // rendered as " | "-joined string
    pub fatal: Option<String>,
}

/// Emit a structured audit event using canonical envelope fields.
pub fn audit_event_fields(
    subsystem: &str,
    event_name: &str,
    decision: &str,
    fields: &AuditFields,
) -> Result<()> {
    let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let run_id = env::var("RUN_ID").unwrap_or_default();
    let level_str = match decision.to_ascii_lowercase().as_str() {
        "failed" | "error" => "error",
        "skipped" => "warn",
        _ => "info",
    };
    let infos = fields.infos.as_ref().map(|v| v.join(" | "));
    event!(
        target: "audit",
        Level::INFO,
        ts = %timestamp,
        component = %"import-precheck",
        subsystem = %subsystem,
        level = %level_str,
        run_id = %run_id,
        event = %event_name,
        decision = %decision,
        check = %fields.check.as_deref().unwrap_or(""),
        short_name = %fields.short_name.as_deref().unwrap_or(""),
        version = %fields.version.as_deref().unwrap_or(""),
        architecture = %fields.architecture.as_deref().unwrap_or(""),
        infos = %infos.as_deref().unwrap_or(""),
        fatal = %fields.fatal.as_deref().unwrap_or(""),
        "audit"
    );
    Ok(())
}

/// Record the outcome of a finished check.
pub fn audit_report(report: &Report) -> Result<()> {
    audit_event_fields(
        "precheck",
        "check_finished",
        &report.result().to_string().to_ascii_lowercase(),
        &AuditFields {
            check: Some(report.name().to_string()),
            infos: Some(report.infos().to_vec()),
            fatal: report.fatal_message().map(str::to_string),
            ..Default::default()
        },
    )
}
