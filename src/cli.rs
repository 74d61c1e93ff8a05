//! CLI argument parsing module for drvup

use crate::error::ConfigError;
use crate::orchestrator::{default_download_dir, OrchestratorConfig};
use crate::progress::DEFAULT_BAR_WIDTH;
use crate::resolver::DEFAULT_FEED_URL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a byte size with an optional unit suffix: N (bytes), Nk
/// (KiB), Nm (MiB)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".to_string());
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix(&['k', 'K'][..]) {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix(&['m', 'M'][..]) {
        (n, 1024 * 1024)
    } else {
        (s, 1)
    };

    let num: usize = num_str
        .parse()
        .map_err(|_| format!("invalid number in size: {}", num_str))?;

    let size = num * multiplier;
    if size == 0 {
        return Err("size must be greater than zero".to_string());
    }

    Ok(size)
}

/// NVIDIA GPU driver update checker and downloader
#[derive(Parser, Debug, Clone)]
#[command(
    name = "drvup",
    version,
    about = "NVIDIA GPU driver update checker and downloader"
)]
pub struct CliArgs {
    /// Directory the installer is written to (default: ~/Desktop/GPU_UPDATE)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Chunk size for the streaming download (e.g. 64k, 1m, 524288)
    #[arg(long, value_name = "SIZE", default_value = "1m", value_parser = parse_size)]
    pub chunk_size: usize,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    /// Release feed URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Program used to query the installed driver version
    #[arg(long, value_name = "PROGRAM", default_value = "nvidia-smi")]
    pub query_cmd: String,

    /// Check for an update without downloading it
    #[arg(short = 'n', long)]
    pub check: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - only the final summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Progress bar width in characters
    #[arg(long, value_name = "WIDTH", default_value_t = DEFAULT_BAR_WIDTH)]
    pub width: usize,
}

impl CliArgs {
    /// Resolve the download directory, falling back to the per-user
    /// default
    pub fn resolve_download_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_download_dir().ok_or(ConfigError::NoDownloadDir),
        }
    }

    /// Build the orchestrator configuration from the arguments
    pub fn orchestrator_config(&self) -> Result<OrchestratorConfig, ConfigError> {
        Ok(OrchestratorConfig {
            download_dir: self.resolve_download_dir()?,
            check_only: self.check,
            quiet: self.quiet,
            bar_width: self.width,
        })
    }

    /// The configured HTTP timeout
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
