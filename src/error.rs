use thiserror::Error;

use crate::precheck::CheckResult;

/// Core error type for import-precheck operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// os-release exists but could not be read or parsed
    #[error("os-release unreadable at {path}: {details}")]
    OsRelease { path: String, details: String },

    /// Supported-OS catalog override could not be loaded
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A report's terminal state was set twice
    #[error("report for '{check}' already resolved as {state}")]
    ReportResolved { check: String, state: CheckResult },

    /// One or more checks resolved the disk as not importable
    #[error("precheck failed: {0}")]
    Unsupported(String),

    /// One or more checks were skipped while running with --strict
    #[error("precheck undetermined: {0}")]
    Undetermined(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map errors to stable process exit codes.
    ///
    ///  1  - General failure (default)
    /// 10  - Operating system not supported for import
    /// 20  - Support undetermined (only with --strict)
    /// 30  - Catalog override unusable
    /// 40  - os-release unreadable
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Unsupported(_) => 10,
            Error::Undetermined(_) => 20,
            Error::Catalog(_) => 30,
            Error::OsRelease { .. } => 40,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(Error::Unsupported("x".into()).exit_code(), 10);
        assert_eq!(Error::Undetermined("x".into()).exit_code(), 20);
        assert_eq!(Error::Catalog("x".into()).exit_code(), 30);
        assert_eq!(
            Error::OsRelease { path: "/etc/os-release".into(), details: "denied".into() }
                .exit_code(),
            40
        );
        assert_eq!(Error::Other("x".into()).exit_code(), 1);
    }

    #[test]
    fn report_resolved_names_the_check() {
        let e = Error::ReportResolved {
            check: "OS Version Check".into(),
            state: CheckResult::Skipped,
        };
        assert_eq!(
            e.to_string(),
            "report for 'OS Version Check' already resolved as SKIPPED"
        );
    }
}
