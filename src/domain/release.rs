//! Remote release information

use crate::domain::DriverVersion;
use std::fmt;

/// The latest release published by the vendor: a version paired with
/// the installer download URL
///
/// Produced once per check cycle by a resolver; immutable and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    /// The published driver version
    pub version: DriverVersion,
    /// Absolute HTTPS URL of the installer
    pub download_url: String,
}

impl RemoteRelease {
    /// Creates a new remote release
    pub fn new(version: DriverVersion, download_url: impl Into<String>) -> Self {
        Self {
            version,
            download_url: download_url.into(),
        }
    }
}

impl fmt::Display for RemoteRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.download_url)
    }
}
