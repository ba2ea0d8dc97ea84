//! Export of room snapshots.
//!
//! This module provides the [`Exporter`] trait, the interface for turning a
//! [`Snapshot`] into an output format.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SnapshotBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`HuddleError::Export`] at the crate
//! boundary.
//!
//! [`HuddleError::Export`]: crate::HuddleError::Export

/// SVG export backend.
pub mod svg;

use crate::snapshot::Snapshot;

/// Abstraction for snapshot export backends.
pub trait Exporter {
    /// Exports one frame of a room to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the snapshot cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Error>;
}

/// Errors that can occur during snapshot export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
