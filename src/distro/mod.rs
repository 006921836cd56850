//! Distro normalization: turning detector output into the identifiers used by
//! the import tool's `--os` flag.

pub mod release;
pub mod windows;

use thiserror::Error;

pub use release::{Architecture, BuiltinCanonicalizer, Distro, Release};
pub use windows::NtVersionTranslator;

/// Errors from the normalization collaborators. The text is shown to users
/// as report info, so it reads as a sentence fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistroError {
    #[error("distro name is required")]
    MissingDistro,

    #[error("distro '{0}' is not recognized")]
    UnknownDistro(String),

    #[error("major version is required for {0}")]
    MissingMajor(String),

    #[error("minor version is required for {0}")]
    MissingMinor(String),

    #[error("version '{version}' is not valid for {distro}")]
    InvalidVersion { distro: String, version: String },

    #[error("architecture is required for {0}; pass --arch")]
    MissingArchitecture(String),

    #[error("architecture '{0}' is not recognized")]
    UnknownArchitecture(String),

    #[error("NT version {major}.{minor} has no known Windows release")]
    UnknownNtVersion { major: String, minor: String },
}

/// A normalized release that can be rendered as an import identifier.
pub trait ReleaseDescriptor {
    /// Identifier for the import tool's `--os` flag; empty when the release has none.
    fn as_gcloud_arg(&self) -> String;
}

/// Builds a release descriptor from detector components.
pub trait DistroCanonicalizer: Send + Sync {
    fn from_components(
        &self,
        short_name: &str,
        major: &str,
        minor: &str,
        architecture: &str,
    ) -> Result<Box<dyn ReleaseDescriptor>, DistroError>;
}

/// Maps Windows NT kernel versions to marketing (major, minor) versions.
pub trait WindowsVersionTranslator: Send + Sync {
    fn marketing_version(
        &self,
        nt_major: &str,
        nt_minor: &str,
    ) -> Result<(String, String), DistroError>;
}

/// Pre-rendered identifiers act as their own descriptor.
impl ReleaseDescriptor for String {
    fn as_gcloud_arg(&self) -> String {
        self.clone()
    }
}
