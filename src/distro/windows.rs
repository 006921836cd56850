use super::{DistroError, WindowsVersionTranslator};

/// NT kernel version -> Windows Server (major, minor).
///
/// NT 10.0 is shared by Server 2016 onwards and by Windows 10/11; it maps to
/// the oldest matching server release.
const NT_TO_SERVER: [(&str, &str, &str, &str); 5] = [
    ("6", "0", "2008", ""),
    ("6", "1", "2008", "r2"),
    ("6", "2", "2012", ""),
    ("6", "3", "2012", "r2"),
    ("10", "0", "2016", ""),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct NtVersionTranslator;

impl WindowsVersionTranslator for NtVersionTranslator {
    fn marketing_version(
        &self,
        nt_major: &str,
        nt_minor: &str,
    ) -> Result<(String, String), DistroError> {
        // A bare "10" is reported by some detectors for 10.0.
        let minor = if nt_minor.is_empty() { "0" } else { nt_minor };
        NT_TO_SERVER
            .iter()
            .find(|(maj, min, _, _)| *maj == nt_major && *min == minor)
            .map(|(_, _, major, minor)| (major.to_string(), minor.to_string()))
            .ok_or_else(|| DistroError::UnknownNtVersion {
                major: nt_major.to_string(),
                minor: nt_minor.to_string(),
            })
    }
}
