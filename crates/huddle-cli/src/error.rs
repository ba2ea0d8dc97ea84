//! Errors reported by the CLI.

use std::io;

use thiserror::Error;

use huddle::HuddleError;

use crate::{config::ConfigError, room::RoomError};

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Huddle(#[from] HuddleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<huddle::export::Error> for CliError {
    fn from(err: huddle::export::Error) -> Self {
        Self::Huddle(err.into())
    }
}
