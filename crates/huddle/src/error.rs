//! Error types for Huddle operations.
//!
//! This module provides the main error type [`HuddleError`]. The layout
//! engine itself never fails; errors come from configuration validation and
//! from exporting snapshots.

use std::io;

use thiserror::Error;

/// The main error type for Huddle operations.
#[derive(Debug, Error)]
pub enum HuddleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for HuddleError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
