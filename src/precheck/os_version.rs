use std::sync::Arc;

use super::{Check, Report};
use crate::catalog::{Catalog, SupportedOsValidator};
use crate::distro::{
    BuiltinCanonicalizer, DistroCanonicalizer, NtVersionTranslator, WindowsVersionTranslator,
};
use crate::error::Result;
use crate::osinfo::{OsInfo, LINUX, WINDOWS};

pub const DOCS_URL: &str = "https://cloud.google.com/sdk/gcloud/reference/compute/images/import";

pub const OS_VERSION_CHECK_NAME: &str = "OS Version Check";

/// OS family as far as identifier derivation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily<'a> {
    /// Detector produced no short name.
    Unknown,
    /// Detector found Linux but no specific distro.
    GenericLinux,
    Windows,
    Other(&'a str),
}

impl<'a> OsFamily<'a> {
    pub fn of(short_name: &'a str) -> Self {
        match short_name {
            "" => OsFamily::Unknown,
            s if s.eq_ignore_ascii_case(LINUX) => OsFamily::GenericLinux,
            s if s.eq_ignore_ascii_case(WINDOWS) => OsFamily::Windows,
            other => OsFamily::Other(other),
        }
    }
}

/// Licensing variants probed against the catalog, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseVariant {
    Standard,
    Byol,
}

impl LicenseVariant {
    pub const PROBE_ORDER: [LicenseVariant; 2] = [LicenseVariant::Standard, LicenseVariant::Byol];

    pub fn suffix(&self) -> &'static str {
        match self {
            LicenseVariant::Standard => "",
            LicenseVariant::Byol => "-byol",
        }
    }
}

/// Verifies that the disk's operating system is importable.
pub struct OsVersionCheck {
    os_info: OsInfo,
    distro: Arc<dyn DistroCanonicalizer>,
    windows: Arc<dyn WindowsVersionTranslator>,
    validator: Arc<dyn SupportedOsValidator>,
}

impl OsVersionCheck {
    pub fn new(os_info: OsInfo) -> Self {
        Self {
            os_info,
            distro: Arc::new(BuiltinCanonicalizer),
            windows: Arc::new(NtVersionTranslator),
            validator: Arc::new(Catalog::builtin()),
        }
    }

    pub fn with_canonicalizer(mut self, distro: Arc<dyn DistroCanonicalizer>) -> Self {
        self.distro = distro;
        self
    }

    pub fn with_translator(mut self, windows: Arc<dyn WindowsVersionTranslator>) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn SupportedOsValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Build the identifier used by the import tool's `--os` flag. Empty when
    /// it cannot be determined; the reason is recorded in `r`.
    pub fn create_os_id(&self, original_major: &str, original_minor: &str, r: &mut Report) -> String {
        let info = &self.os_info;
        let family = OsFamily::of(&info.short_name);
        let (mut major, mut minor) = (original_major.to_string(), original_minor.to_string());

        match family {
            OsFamily::Unknown => {
                r.info("Unable to determine OS.");
                return String::new();
            }
            OsFamily::GenericLinux => {
                r.info("Detected generic Linux system.");
                return String::new();
            }
            OsFamily::Windows => {
                r.info("Detected Windows system.");
                // Detection reports NT numbers; release names use marketing versions.
                match self.windows.marketing_version(original_major, original_minor) {
                    Ok((m, n)) => {
                        major = m;
                        minor = n;
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "keeping NT version numbers");
                    }
                }
            }
            OsFamily::Other(_) => {}
        }

        let release = match self.distro.from_components(
            &info.short_name,
            &major,
            &minor,
            &info.architecture,
        ) {
            Ok(release) => release,
            Err(e) => {
                r.info(e.to_string());
                return String::new();
            }
        };
        let os_id = release.as_gcloud_arg();
        if !os_id.is_empty() {
            return os_id;
        }
        match family {
            OsFamily::Windows | OsFamily::Other(_) if !info.version.is_empty() => {
                format!("{}-{}", info.short_name, info.version)
            }
            _ => String::new(),
        }
    }

    /// First licensing variant of `os_id` the catalog accepts.
    fn probe_catalog(&self, os_id: &str) -> Option<LicenseVariant> {
        LicenseVariant::PROBE_ORDER
            .into_iter()
            .find(|variant| self.validator.is_supported(&format!("{}{}", os_id, variant.suffix())))
    }
}

impl Check for OsVersionCheck {
    fn name(&self) -> &str {
        OS_VERSION_CHECK_NAME
    }

    fn run(&self) -> Result<Report> {
        let mut r = Report::new(self.name());
        let (major, minor) = split_os_version(&self.os_info.version);
        let os_id = self.create_os_id(major, minor, &mut r);
        if os_id.is_empty() {
            r.info(format!(
                "Unable to determine whether your system is supported for import. \
                 For supported versions, see {}",
                DOCS_URL
            ));
            r.skip()?;
            return Ok(r);
        }

        match self.probe_catalog(&os_id) {
            Some(variant) => {
                tracing::debug!(os_id = %os_id, variant = ?variant, "supported");
                if OsFamily::of(&self.os_info.short_name) == OsFamily::Windows {
                    // One NT version covers both desktop and server editions.
                    r.info(format!("Detected Windows version number: NT {}", self.os_info.version));
                } else {
                    r.info(format!("Detected system: {}", os_id));
                }
            }
            None => r.fatal(format!(
                "{} is not supported for import. For supported versions, see {}",
                os_id, DOCS_URL
            ))?,
        }
        Ok(r)
    }
}

/// Split a dotted version into (major, minor); anything after a second dot is dropped.
pub fn split_os_version(version: &str) -> (&str, &str) {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    (major, minor)
}
