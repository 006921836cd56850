use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Identifiers accepted by the image-import tool's `--os` flag.
pub const SUPPORTED_OS_IDS: &[&str] = &[
    "centos-7",
    "centos-8",
    "debian-8",
    "debian-9",
    "debian-10",
    "debian-11",
    "opensuse-15",
    "rhel-6",
    "rhel-6-byol",
    "rhel-7",
    "rhel-7-byol",
    "rhel-8",
    "rhel-8-byol",
    "rhel-9-byol",
    "sles-12",
    "sles-12-byol",
    "sles-15",
    "sles-15-byol",
    "sles-sap-12",
    "sles-sap-12-byol",
    "sles-sap-15",
    "sles-sap-15-byol",
    "ubuntu-1404",
    "ubuntu-1604",
    "ubuntu-1804",
    "ubuntu-2004",
    "ubuntu-2204",
    "windows-2008r2",
    "windows-2008r2-byol",
    "windows-2012",
    "windows-2012-byol",
    "windows-2012r2",
    "windows-2012r2-byol",
    "windows-2016",
    "windows-2016-byol",
    "windows-2019",
    "windows-2019-byol",
    "windows-2022",
    "windows-2022-byol",
    "windows-7-x64-byol",
    "windows-7-x86-byol",
    "windows-8-x64-byol",
    "windows-8-x86-byol",
    "windows-10-x64-byol",
    "windows-10-x86-byol",
    "windows-11-x64-byol",
];

/// Membership test against the supported-import list.
pub trait SupportedOsValidator: Send + Sync {
    fn is_supported(&self, os_id: &str) -> bool;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    os_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    os_ids: BTreeSet<String>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::from_ids(SUPPORTED_OS_IDS.iter().copied())
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            os_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Load an override catalog of the form `{"os_ids": ["centos-7", ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .map_err(|e| Error::Catalog(format!("cannot read {}: {}", path.display(), e)))?;
        let file: CatalogFile = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Catalog(format!("cannot parse {}: {}", path.display(), e)))?;
        if file.os_ids.is_empty() {
            return Err(Error::Catalog(format!("{} lists no os_ids", path.display())));
        }
        tracing::debug!(path = %path.display(), count = file.os_ids.len(), "catalog loaded");
        Ok(Self::from_ids(file.os_ids))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.os_ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.os_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.os_ids.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SupportedOsValidator for Catalog {
    fn is_supported(&self, os_id: &str) -> bool {
        self.os_ids.contains(os_id)
    }
}
