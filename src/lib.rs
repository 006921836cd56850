pub mod catalog;
pub mod cli;
pub mod distro;
pub mod error;
pub mod logging;
pub mod osinfo;
pub mod precheck;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};

pub use catalog::{Catalog, SupportedOsValidator};
pub use osinfo::OsInfo;
pub use precheck::{Check, CheckResult, OsVersionCheck, Report};
