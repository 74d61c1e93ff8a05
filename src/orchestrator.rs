//! Update orchestrator for coordinating one check-and-download cycle
//!
//! Workflow: query local version → resolve remote release → compare →
//! stream download when warranted → report a single terminal outcome.
//!
//! Every collaborator sits behind a trait seam (oracle, resolver,
//! downloader), so the cycle is testable without a GPU, a vendor
//! service, or a network. No step is retried automatically; retry
//! policy belongs to the caller.

use crate::domain::{should_upgrade, DriverVersion, UpdateOutcome};
use crate::download::Downloader;
use crate::error::AppError;
use crate::oracle::{LocalDriver, VersionQuery};
use crate::progress::{ProgressPrinter, Spinner, DEFAULT_BAR_WIDTH};
use crate::resolver::RemoteResolver;
use colored::Colorize;
use std::path::PathBuf;

/// Fixed installer extension; the `<major>_<minor...>.exe` filename
/// shape is preserved for compatibility with existing automation
const INSTALLER_EXTENSION: &str = "exe";

/// Default download directory under the user's home
pub fn default_download_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Desktop").join("GPU_UPDATE"))
}

/// Configuration for one update cycle
///
/// Explicit configuration passed in at construction; there is no
/// process-wide mutable state.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Base directory the installer is written under
    pub download_dir: PathBuf,
    /// Decide only; skip the download
    pub check_only: bool,
    /// Suppress status lines and progress output
    pub quiet: bool,
    /// Progress bar width in glyphs
    pub bar_width: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir().unwrap_or_else(|| PathBuf::from("GPU_UPDATE")),
            check_only: false,
            quiet: false,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

/// Orchestrator composing the oracle, resolver and downloader
pub struct UpdateOrchestrator {
    config: OrchestratorConfig,
    oracle: Box<dyn VersionQuery>,
    resolver: Box<dyn RemoteResolver>,
    downloader: Box<dyn Downloader>,
}

impl UpdateOrchestrator {
    /// Create an orchestrator from its collaborators
    pub fn new(
        config: OrchestratorConfig,
        oracle: Box<dyn VersionQuery>,
        resolver: Box<dyn RemoteResolver>,
        downloader: Box<dyn Downloader>,
    ) -> Self {
        Self {
            config,
            oracle,
            resolver,
            downloader,
        }
    }

    /// Run one update cycle to a terminal outcome
    ///
    /// Aborted states surface as the error variant; every other
    /// terminal state is an `UpdateOutcome`.
    pub async fn run(&self) -> Result<UpdateOutcome, AppError> {
        let previous = self.resolve_local()?;

        let mut spinner = Spinner::new(!self.config.quiet);
        spinner.start("Resolving latest driver version...");
        let resolved = self.resolver.resolve_latest().await;
        spinner.finish_and_clear();
        let release = resolved?;

        self.status(
            format!("Online available driver version found: {}", release.version)
                .magenta()
                .to_string(),
        );

        if !should_upgrade(previous.as_ref(), &release.version) {
            return Ok(UpdateOutcome::UpToDate {
                version: release.version,
            });
        }

        let path = self.destination_path(&release.version);

        if self.config.check_only {
            return Ok(UpdateOutcome::UpdateAvailable {
                previous,
                version: release.version,
                path,
            });
        }

        let printer = ProgressPrinter::new(!self.config.quiet, self.config.bar_width, "Downloading: ");
        let mut sink = move |done: u64, total: Option<u64>| printer.update(done, total);

        let bytes = self
            .downloader
            .download(&release.download_url, &path, &mut sink)
            .await?;

        Ok(UpdateOutcome::Downloaded {
            previous,
            version: release.version,
            path,
            bytes,
        })
    }

    /// Query the oracle and report the installed state
    fn resolve_local(&self) -> Result<Option<DriverVersion>, AppError> {
        match self.oracle.local_version()? {
            LocalDriver::Installed(version) => {
                self.status(
                    format!("Installed driver version found: {}", version)
                        .cyan()
                        .to_string(),
                );
                Ok(Some(version))
            }
            LocalDriver::NotInstalled => {
                self.status(
                    "No installed driver found - fetching a fresh installer"
                        .yellow()
                        .to_string(),
                );
                Ok(None)
            }
        }
    }

    /// Destination filename: version components joined by underscores
    /// plus the fixed installer extension, under the download directory
    fn destination_path(&self, version: &DriverVersion) -> PathBuf {
        self.config
            .download_dir
            .join(format!("{}.{}", version.underscored(), INSTALLER_EXTENSION))
    }

    fn status(&self, line: String) {
        if !self.config.quiet {
            println!("{}", line);
        }
    }
}
