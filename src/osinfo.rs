use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Short name reported when a Linux system matches no specific distro.
pub const LINUX: &str = "linux";
/// Short name reported for Windows systems.
pub const WINDOWS: &str = "windows";

/// Operating system detection results for one disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsInfo {
    pub short_name: String,
    pub version: String,
    pub architecture: String,
}

impl OsInfo {
    pub fn new(
        short_name: impl Into<String>,
        version: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            version: version.into(),
            architecture: architecture.into(),
        }
    }

    /// Detect from `<root>/etc/os-release`.
    ///
    /// Missing file yields an empty short name; a file without `ID` yields the
    /// generic [`LINUX`] marker. The architecture is the host's for `/` and
    /// is read from the disk's own binaries otherwise (empty if none match).
    pub fn detect(root: &Path) -> Result<Self> {
        let path = root.join("etc/os-release");
        let architecture = if root == Path::new("/") {
            host_architecture().to_string()
        } else {
            disk_architecture(root).unwrap_or_default().to_string()
        };
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "os-release not found");
                return Ok(Self {
                    architecture,
                    ..Default::default()
                });
            }
            Err(e) => {
                return Err(Error::OsRelease {
                    path: path.display().to_string(),
                    details: e.to_string(),
                })
            }
        };
        let fields = parse_os_release(&text);
        let info = Self {
            short_name: fields
                .get("ID")
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_else(|| LINUX.to_string()),
            version: fields.get("VERSION_ID").cloned().unwrap_or_default(),
            architecture,
        };
        tracing::debug!(short_name = %info.short_name, version = %info.version, arch = %info.architecture, "os detected");
        Ok(info)
    }

    /// Replace detected fields with explicit values where given.
    pub fn with_overrides(
        mut self,
        short_name: Option<&str>,
        version: Option<&str>,
        architecture: Option<&str>,
    ) -> Self {
        if let Some(s) = short_name {
            self.short_name = s.to_ascii_lowercase();
        }
        if let Some(v) = version {
            self.version = v.to_string();
        }
        if let Some(a) = architecture {
            self.architecture = a.to_string();
        }
        self
    }
}

fn parse_os_release(text: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim().trim_matches('"').trim_matches('\'');
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    map
}

/// Binaries present on practically every Linux disk.
const ELF_PROBES: [&str; 4] = ["usr/bin/ls", "usr/bin/sh", "bin/ls", "bin/sh"];

/// Architecture of the first regular ELF file found under `root`.
fn disk_architecture(root: &Path) -> Option<&'static str> {
    for rel in ELF_PROBES {
        let p = root.join(rel);
        // Absolute links would resolve against the host, not the disk.
        match fs::symlink_metadata(&p) {
            Ok(md) if md.file_type().is_file() => {}
            _ => continue,
        }
        let mut header = [0u8; 20];
        let read = fs::File::open(&p).and_then(|mut f| f.read_exact(&mut header));
        if read.is_err() {
            continue;
        }
        if let Some(arch) = elf_machine(&header) {
            tracing::debug!(path = %p.display(), arch, "disk architecture");
            return Some(arch);
        }
    }
    None
}

fn elf_machine(header: &[u8; 20]) -> Option<&'static str> {
    if header[..4] != *b"\x7fELF" {
        return None;
    }
    let raw = [header[18], header[19]];
    let machine = match header[5] {
        1 => u16::from_le_bytes(raw),
        2 => u16::from_be_bytes(raw),
        _ => return None,
    };
    match machine {
        0x03 => Some("x86_32"),
        0x3e => Some("x86_64"),
        0xb7 => Some("aarch64"),
        _ => None,
    }
}

fn host_architecture() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x86_64",
        "x86" => "x86_32",
        "aarch64" => "aarch64",
        other => other,
    }
}
