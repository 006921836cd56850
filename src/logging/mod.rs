pub mod audit;
pub mod init;

pub use audit::{audit_event_fields, audit_report, AuditFields, AUDIT_LOG_ENV};
pub use init::init_logging;
