use std::fmt;
use std::str::FromStr;

use super::{DistroCanonicalizer, DistroError, ReleaseDescriptor};

/// Distros the import tool has identifiers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    Centos,
    Debian,
    Opensuse,
    Rhel,
    Sles,
    SlesSap,
    Ubuntu,
    Windows,
}

impl Distro {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distro::Centos => "centos",
            Distro::Debian => "debian",
            Distro::Opensuse => "opensuse",
            Distro::Rhel => "rhel",
            Distro::Sles => "sles",
            Distro::SlesSap => "sles-sap",
            Distro::Ubuntu => "ubuntu",
            Distro::Windows => "windows",
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distro {
    type Err = DistroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        match id.as_str() {
            "" => Err(DistroError::MissingDistro),
            "centos" => Ok(Distro::Centos),
            "debian" => Ok(Distro::Debian),
            "opensuse" | "opensuse-leap" => Ok(Distro::Opensuse),
            "rhel" => Ok(Distro::Rhel),
            "sles" => Ok(Distro::Sles),
            "sles-sap" | "sles_sap" => Ok(Distro::SlesSap),
            "ubuntu" => Ok(Distro::Ubuntu),
            "windows" => Ok(Distro::Windows),
            _ => Err(DistroError::UnknownDistro(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X86,
    X64,
    Arm64,
}

impl FromStr for Architecture {
    type Err = DistroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86" | "x86_32" | "i386" | "i686" => Ok(Architecture::X86),
            "x64" | "x86_64" | "amd64" => Ok(Architecture::X64),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            _ => Err(DistroError::UnknownArchitecture(s.to_string())),
        }
    }
}

/// A validated distro release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub distro: Distro,
    pub major: u32,
    /// Raw minor component; numeric, empty, or `r2` for Windows Server.
    pub minor: String,
    pub architecture: Architecture,
}

impl Release {
    pub fn from_components(
        distro: &str,
        major: &str,
        minor: &str,
        architecture: &str,
    ) -> Result<Self, DistroError> {
        let distro: Distro = distro.parse()?;
        if major.is_empty() {
            return Err(DistroError::MissingMajor(distro.to_string()));
        }
        let invalid = |version: &str| DistroError::InvalidVersion {
            distro: distro.to_string(),
            version: version.to_string(),
        };
        let major_num: u32 = major.parse().map_err(|_| invalid(major))?;
        let minor = minor.to_ascii_lowercase();
        let minor_ok = minor.is_empty()
            || minor.parse::<u32>().is_ok()
            || (distro == Distro::Windows && minor == "r2");
        if !minor_ok {
            return Err(invalid(&minor));
        }
        if distro == Distro::Ubuntu && minor.is_empty() {
            return Err(DistroError::MissingMinor(distro.to_string()));
        }
        if architecture.trim().is_empty() {
            return Err(DistroError::MissingArchitecture(distro.to_string()));
        }
        Ok(Self {
            distro,
            major: major_num,
            minor,
            architecture: architecture.parse()?,
        })
    }

    fn is_windows_server(&self) -> bool {
        self.major >= 2000
    }
}

impl ReleaseDescriptor for Release {
    fn as_gcloud_arg(&self) -> String {
        match self.distro {
            Distro::Windows if self.is_windows_server() => {
                let suffix = if self.minor == "r2" { "r2" } else { "" };
                format!("windows-{}{}", self.major, suffix)
            }
            Distro::Windows => match self.architecture {
                Architecture::X64 => format!("windows-{}-x64", self.major),
                Architecture::X86 => format!("windows-{}-x86", self.major),
                Architecture::Arm64 => String::new(),
            },
            // Only 64-bit x86 Linux disks have import identifiers.
            _ if self.architecture != Architecture::X64 => String::new(),
            Distro::Ubuntu => {
                let minor: u32 = self.minor.parse().unwrap_or_default();
                format!("ubuntu-{}{:02}", self.major, minor)
            }
            distro => format!("{}-{}", distro, self.major),
        }
    }
}

/// Canonicalizer backed by [`Release`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCanonicalizer;

impl DistroCanonicalizer for BuiltinCanonicalizer {
    fn from_components(
        &self,
        short_name: &str,
        major: &str,
        minor: &str,
        architecture: &str,
    ) -> Result<Box<dyn ReleaseDescriptor>, DistroError> {
        let release = Release::from_components(short_name, major, minor, architecture)?;
        Ok(Box::new(release))
    }
}
