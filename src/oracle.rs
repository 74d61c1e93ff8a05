//! Local driver version oracle
//!
//! Queries the installed driver version through a single external
//! command invocation (`nvidia-smi` by default). This is a narrow
//! synchronous leaf: exactly one child process per call, no retries,
//! and no generalization into a process-management layer.

use crate::domain::DriverVersion;
use crate::error::OracleError;
use std::io::ErrorKind;
use std::process::Command;

/// Default program used to query the installed driver version
pub const DEFAULT_QUERY_PROGRAM: &str = "nvidia-smi";

/// Arguments producing a one-line, comma-free version string on stdout
const QUERY_ARGS: &[&str] = &["--query-gpu=driver_version", "--format=csv,noheader"];

/// The installed-driver state reported by an oracle
///
/// A missing query tool means no driver is installed, which is a
/// legitimate state (the caller proceeds to a fresh download), not a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalDriver {
    /// A driver is installed at this version
    Installed(DriverVersion),
    /// No driver (the query tool itself is absent)
    NotInstalled,
}

/// Trait for local version oracles
pub trait VersionQuery: Send + Sync {
    /// Query the installed driver version
    fn local_version(&self) -> Result<LocalDriver, OracleError>;
}

/// Oracle backed by the vendor's SMI query tool
pub struct SmiOracle {
    /// Program name or path of the query tool
    program: String,
}

impl SmiOracle {
    /// Create an oracle invoking the given query program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SmiOracle {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_PROGRAM)
    }
}

impl VersionQuery for SmiOracle {
    fn local_version(&self) -> Result<LocalDriver, OracleError> {
        let output = match Command::new(&self.program).args(QUERY_ARGS).output() {
            Ok(output) => output,
            // Absent tool, not a failed one
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LocalDriver::NotInstalled),
            Err(e) => {
                return Err(OracleError::Spawn {
                    program: self.program.clone(),
                    source: e,
                })
            }
        };

        if !output.status.success() {
            return Err(OracleError::QueryFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim();
        let version = text
            .parse::<DriverVersion>()
            .map_err(|source| OracleError::InvalidOutput {
                output: text.to_string(),
                source,
            })?;

        Ok(LocalDriver::Installed(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_installed() {
        let oracle = SmiOracle::new("drvup-test-no-such-query-tool");
        let result = oracle.local_version().unwrap();
        assert_eq!(result, LocalDriver::NotInstalled);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_query_failed() {
        let oracle = SmiOracle::new("false");
        let err = oracle.local_version().unwrap_err();
        assert!(matches!(err, OracleError::QueryFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unparsable_output_is_invalid_output() {
        // echo prints the query arguments back, which is not a version
        let oracle = SmiOracle::new("echo");
        let err = oracle.local_version().unwrap_err();
        assert!(matches!(err, OracleError::InvalidOutput { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_valid_output_parses() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-smi");
        fs::write(&script, "#!/bin/sh\necho 560.35.03\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let oracle = SmiOracle::new(script.to_str().unwrap());
        let result = oracle.local_version().unwrap();
        assert_eq!(
            result,
            LocalDriver::Installed(DriverVersion::parse("560.35.3").unwrap())
        );
    }

    #[test]
    fn test_default_program() {
        let oracle = SmiOracle::default();
        assert_eq!(oracle.program, DEFAULT_QUERY_PROGRAM);
    }
}
