//! Application error types using thiserror
//!
//! Error hierarchy:
//! - OracleError: Issues with querying the installed driver version
//! - ResolveError: Issues with resolving the latest published release
//! - VersionParseError: Malformed version strings
//! - DownloadError: Issues with the streaming installer download
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Local version query related errors
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Remote release resolution related errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Version string parsing errors
    #[error(transparent)]
    Version(#[from] VersionParseError),

    /// Installer download related errors
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to querying the installed driver version
///
/// A missing query tool is not an error: it is the legitimate
/// "no driver installed" state and is reported as
/// `LocalDriver::NotInstalled` instead.
#[derive(Error, Debug)]
pub enum OracleError {
    /// The query tool exists but could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The query tool exited with a non-zero status
    #[error("driver version query exited with status {status:?}: {stderr}")]
    QueryFailed { status: Option<i32>, stderr: String },

    /// The query tool produced output that is not a version string
    #[error("driver version query produced unparsable output '{output}': {source}")]
    InvalidOutput {
        output: String,
        #[source]
        source: VersionParseError,
    },
}

/// Errors related to resolving the latest published release
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Network request for the release feed failed
    #[error("failed to resolve latest release from {provider}: {message}")]
    Failed { provider: String, message: String },

    /// The release feed request timed out
    #[error("timeout while resolving latest release from {provider}")]
    Timeout { provider: String },

    /// The release feed document could not be decoded
    #[error("invalid release feed from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// The release feed carried a malformed version string
    #[error("invalid version '{text}' in release feed: {source}")]
    InvalidVersion {
        text: String,
        #[source]
        source: VersionParseError,
    },

    /// The release feed carried a non-HTTPS download URL
    #[error("insecure download URL in release feed: {url}")]
    InsecureUrl { url: String },
}

/// Errors related to parsing dotted numeric version strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// The version string contained no components
    #[error("empty version string")]
    Empty,

    /// A component was not a non-negative integer
    #[error("invalid version component '{component}'")]
    InvalidComponent { component: String },
}

/// Errors related to the streaming installer download
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The download URL was empty or malformed
    #[error("invalid download URL '{url}'")]
    InvalidUrl { url: String },

    /// The HTTP transfer failed
    #[error("HTTP error while downloading: {message}")]
    Http { message: String },

    /// A filesystem operation on the destination failed
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream ended before the declared content length was reached
    #[error("incomplete transfer: expected {expected} bytes, received {received}")]
    IncompleteTransfer { expected: u64, received: u64 },

    /// The transfer timed out
    #[error("timeout while downloading")]
    Timeout,
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Chunk size of zero is not usable
    #[error("invalid chunk size: must be greater than zero")]
    InvalidChunkSize,

    /// No download directory could be determined
    #[error("could not determine a download directory: home directory unknown")]
    NoDownloadDir,

    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

impl ResolveError {
    /// Creates a new Failed error
    pub fn failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::Failed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(provider: impl Into<String>) -> Self {
        ResolveError::Timeout {
            provider: provider.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::InvalidResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl DownloadError {
    /// Creates a new Http error
    pub fn http(message: impl Into<String>) -> Self {
        DownloadError::Http {
            message: message.into(),
        }
    }

    /// Creates a new Filesystem error
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
