//! Core domain models for drvup
//!
//! This module contains the fundamental types used throughout the
//! application:
//! - Driver version identifiers and their total ordering
//! - Remote release information (version + download URL)
//! - Terminal outcomes of an update cycle

mod outcome;
mod release;
mod version;

pub use outcome::UpdateOutcome;
pub use release::RemoteRelease;
pub use version::{should_upgrade, DriverVersion};
