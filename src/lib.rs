//! drvup - NVIDIA GPU driver update checker and downloader library
//!
//! This library provides the core functionality for one update cycle:
//! - Query the installed driver version via the vendor's SMI tool
//! - Resolve the latest published release (version + download URL)
//! - Compare versions under a component-wise total order
//! - Stream the installer to disk with chunked progress reporting

pub mod cli;
pub mod client;
pub mod domain;
pub mod download;
pub mod error;
pub mod oracle;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolver;
