//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the standard error types used by
//! the library and the CLI, and miette's rich diagnostic formatting.
//!
//! Room file errors carry the file content and byte spans, so they render
//! with a source snippet. Everything else renders as a plain message with a
//! diagnostic code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use huddle::HuddleError;

use crate::{CliError, room::RoomError};

/// Adapter for a room file error, with source snippet and labels.
pub struct RoomAdapter<'a>(pub &'a RoomError);

impl fmt::Debug for RoomAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoomAdapter").field(&self.0).finish()
    }
}

impl fmt::Display for RoomAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for RoomAdapter<'_> {}

impl MietteDiagnostic for RoomAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            RoomError::Syntax { .. } => "huddle::room::syntax",
            RoomError::DuplicateId { .. } => "huddle::room::duplicate_id",
            RoomError::Viewport { .. } => "huddle::room::viewport",
            RoomError::PartialSeed { .. } => "huddle::room::partial_seed",
            RoomError::NonFiniteSeed { .. } => "huddle::room::non_finite_seed",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        let src = match self.0 {
            RoomError::Syntax { src, .. }
            | RoomError::DuplicateId { src, .. }
            | RoomError::Viewport { src, .. }
            | RoomError::PartialSeed { src, .. }
            | RoomError::NonFiniteSeed { src, .. } => src,
        };
        Some(src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.0.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.into_iter().enumerate().map(
            |(index, (span, message))| {
                let span = SourceSpan::new(span.start.into(), span.len());
                if index == 0 {
                    LabeledSpan::new_primary_with_span(Some(message.to_string()), span)
                } else {
                    LabeledSpan::new_with_span(Some(message.to_string()), span)
                }
            },
        )))
    }
}

/// Adapter for errors without source locations.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Huddle(HuddleError::Io(_)) | CliError::Io(_) => "huddle::io",
            CliError::Huddle(HuddleError::Config(_)) | CliError::Config(_) => "huddle::config",
            CliError::Huddle(HuddleError::Export(_)) => "huddle::export",
            CliError::Room(_) => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A room file error with source location information.
    Room(RoomAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Room(r) => fmt::Display::fmt(r, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Room(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Room(r) => r.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Room(r) => r.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Room(r) => r.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Room(r) => r.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into the diagnostics to render.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Room(room) => vec![Reportable::Room(RoomAdapter(room))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
