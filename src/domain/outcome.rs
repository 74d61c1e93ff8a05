//! Terminal outcomes of one update cycle

use crate::domain::DriverVersion;
use std::path::PathBuf;

/// The result of a completed update cycle
///
/// Aborted states are not represented here; they surface as `AppError`
/// from the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The installed driver already matches (or exceeds) the published
    /// version; no download was attempted
    UpToDate {
        /// The published version that was compared against
        version: DriverVersion,
    },

    /// A newer installer was downloaded to disk
    Downloaded {
        /// The previously installed version, if any driver was present
        previous: Option<DriverVersion>,
        /// The downloaded version
        version: DriverVersion,
        /// Where the installer was written
        path: PathBuf,
        /// Total bytes written
        bytes: u64,
    },

    /// Check-only mode: an update is available but nothing was
    /// downloaded
    UpdateAvailable {
        /// The previously installed version, if any driver was present
        previous: Option<DriverVersion>,
        /// The published version
        version: DriverVersion,
        /// Where the installer would be written
        path: PathBuf,
    },
}

impl UpdateOutcome {
    /// Returns true when a download actually took place
    pub fn downloaded(&self) -> bool {
        matches!(self, UpdateOutcome::Downloaded { .. })
    }
}
