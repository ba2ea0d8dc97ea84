//! Room files: the participants and viewport to simulate.
//!
//! A room file is TOML with one `[viewport]` table and any number of
//! `[[participant]]` entries:
//!
//! ```toml
//! [viewport]
//! width = 400.0
//! height = 400.0
//!
//! [[participant]]
//! id = "ana"
//! speaking = true
//! audio_level = 0.7
//! x = 150.0
//! y = 150.0
//! ```
//!
//! `x` and `y` are optional and seed the participant's starting position.

use std::{fs, ops::Range, path::Path};

use log::debug;
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use huddle::{
    Participant,
    geometry::{Point, Size},
    identifier::Id,
};

/// Errors found while loading a room file.
///
/// Every variant keeps the file content and, when known, the byte range of
/// the offending text so it can be shown in a diagnostic.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("{message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("duplicate participant id `{id}`")]
    DuplicateId {
        id: String,
        span: Range<usize>,
        first: Range<usize>,
        src: String,
    },

    #[error("viewport must have a positive width and height, got {width}x{height}")]
    Viewport {
        width: f32,
        height: f32,
        span: Range<usize>,
        src: String,
    },

    #[error("participant `{id}` sets only one of `x` and `y`")]
    PartialSeed {
        id: String,
        span: Range<usize>,
        src: String,
    },

    #[error("participant `{id}` has a non-finite position ({x}, {y})")]
    NonFiniteSeed {
        id: String,
        x: f32,
        y: f32,
        span: Range<usize>,
        src: String,
    },
}

impl RoomError {
    /// The room file content the error refers to.
    pub fn src(&self) -> &str {
        match self {
            Self::Syntax { src, .. }
            | Self::DuplicateId { src, .. }
            | Self::Viewport { src, .. }
            | Self::PartialSeed { src, .. }
            | Self::NonFiniteSeed { src, .. } => src,
        }
    }

    /// Labelled byte ranges to highlight, primary label first.
    pub fn labels(&self) -> Vec<(Range<usize>, &'static str)> {
        match self {
            Self::Syntax { span, .. } => span
                .iter()
                .map(|span| (span.clone(), "here"))
                .collect(),
            Self::DuplicateId { span, first, .. } => vec![
                (span.clone(), "duplicate id"),
                (first.clone(), "first used here"),
            ],
            Self::Viewport { span, .. } => vec![(span.clone(), "invalid viewport")],
            Self::PartialSeed { span, .. } | Self::NonFiniteSeed { span, .. } => {
                vec![(span.clone(), "in this participant")]
            }
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::Syntax { .. } => None,
            Self::DuplicateId { .. } => Some("participant ids must be unique within a room"),
            Self::Viewport { .. } => Some("set both `width` and `height` to values above zero"),
            Self::PartialSeed { .. } => {
                Some("give both `x` and `y` to seed a position, or neither")
            }
            Self::NonFiniteSeed { .. } => Some("`x` and `y` must be finite numbers"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoomFile {
    viewport: Spanned<ViewportEntry>,

    #[serde(default, rename = "participant")]
    participants: Vec<ParticipantEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewportEntry {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParticipantEntry {
    id: Spanned<String>,

    #[serde(default)]
    speaking: bool,

    #[serde(default)]
    audio_level: f32,

    x: Option<f32>,
    y: Option<f32>,
}

/// A validated room, ready to be simulated.
#[derive(Debug, Clone)]
pub struct Room {
    viewport: Size,
    participants: Vec<Participant>,
    seeds: Vec<(Id, Point)>,
}

impl Room {
    /// Read and parse a room file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a [`RoomError`]
    /// if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::CliError> {
        let src = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&src)?)
    }

    /// Parse room file content.
    pub fn parse(src: &str) -> Result<Self, RoomError> {
        let file: RoomFile = toml::from_str(src).map_err(|err| RoomError::Syntax {
            message: err.message().to_string(),
            span: err.span(),
            src: src.to_string(),
        })?;

        let viewport_span = file.viewport.span();
        let viewport = file.viewport.into_inner();
        let size = Size::new(viewport.width, viewport.height);
        if size.is_empty() || !viewport.width.is_finite() || !viewport.height.is_finite() {
            return Err(RoomError::Viewport {
                width: viewport.width,
                height: viewport.height,
                span: viewport_span,
                src: src.to_string(),
            });
        }

        let mut participants: Vec<Participant> = Vec::with_capacity(file.participants.len());
        let mut spans: Vec<Range<usize>> = Vec::with_capacity(file.participants.len());
        let mut seeds = Vec::new();

        for entry in file.participants {
            let span = entry.id.span();
            let name = entry.id.into_inner();
            let id = Id::new(&name);

            if let Some(index) = participants.iter().position(|p| p.id() == id) {
                return Err(RoomError::DuplicateId {
                    id: name,
                    span,
                    first: spans[index].clone(),
                    src: src.to_string(),
                });
            }

            match (entry.x, entry.y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                    seeds.push((id, Point::new(x, y)));
                }
                (Some(x), Some(y)) => {
                    return Err(RoomError::NonFiniteSeed {
                        id: name,
                        x,
                        y,
                        span,
                        src: src.to_string(),
                    });
                }
                (None, None) => {}
                _ => {
                    return Err(RoomError::PartialSeed {
                        id: name,
                        span,
                        src: src.to_string(),
                    });
                }
            }

            participants.push(
                Participant::new(id)
                    .with_speaking(entry.speaking)
                    .with_audio_level(entry.audio_level),
            );
            spans.push(span);
        }

        debug!(
            participants = participants.len(),
            seeded = seeds.len();
            "Room parsed"
        );

        Ok(Self {
            viewport: size,
            participants,
            seeds,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Explicit starting positions, in file order.
    pub fn seeds(&self) -> &[(Id, Point)] {
        &self.seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room() {
        let room = Room::parse(
            r#"
            [viewport]
            width = 400.0
            height = 300.0

            [[participant]]
            id = "ana"
            speaking = true
            audio_level = 0.7
            x = 150.0
            y = 150.0

            [[participant]]
            id = "ben"
            "#,
        )
        .unwrap();

        assert_eq!(room.viewport(), Size::new(400.0, 300.0));
        assert_eq!(room.participants().len(), 2);
        assert!(room.participants()[0].speaking());
        assert_eq!(room.participants()[0].audio_level(), 0.7);
        assert!(!room.participants()[1].speaking());
        assert_eq!(room.seeds(), &[(Id::new("ana"), Point::new(150.0, 150.0))]);
    }

    #[test]
    fn test_room_without_participants() {
        let room = Room::parse("[viewport]\nwidth = 10.0\nheight = 10.0\n").unwrap();
        assert!(room.participants().is_empty());
    }

    #[test]
    fn test_duplicate_ids_point_at_both_entries() {
        let src = r#"
[viewport]
width = 400.0
height = 400.0

[[participant]]
id = "ana"

[[participant]]
id = "ana"
"#;
        let err = Room::parse(src).unwrap_err();

        let RoomError::DuplicateId { id, span, first, .. } = &err else {
            panic!("expected a duplicate id error, got {err:?}");
        };
        assert_eq!(id, "ana");
        assert!(first.start < span.start);
        assert_eq!(&src[span.clone()], r#""ana""#);
        assert_eq!(err.labels().len(), 2);
    }

    #[test]
    fn test_non_positive_viewport() {
        let err = Room::parse("[viewport]\nwidth = 0.0\nheight = 400.0\n").unwrap_err();
        assert!(matches!(err, RoomError::Viewport { width, .. } if width == 0.0));
        assert!(err.help().is_some());
    }

    #[test]
    fn test_partial_seed() {
        let src = "[viewport]\nwidth = 100.0\nheight = 100.0\n\n[[participant]]\nid = \"x\"\nx = 5.0\n";
        let err = Room::parse(src).unwrap_err();
        assert!(matches!(err, RoomError::PartialSeed { .. }));
    }

    #[test]
    fn test_non_finite_seed() {
        let src = "[viewport]\nwidth = 100.0\nheight = 100.0\n\n[[participant]]\nid = \"x\"\nx = nan\ny = 10.0\n";
        let err = Room::parse(src).unwrap_err();

        let RoomError::NonFiniteSeed { id, x, span, .. } = &err else {
            panic!("expected a non-finite seed error, got {err:?}");
        };
        assert_eq!(id, "x");
        assert!(x.is_nan());
        assert_eq!(&src[span.clone()], r#""x""#);

        let src = "[viewport]\nwidth = 100.0\nheight = 100.0\n\n[[participant]]\nid = \"y\"\nx = 1.0\ny = -inf\n";
        assert!(matches!(Room::parse(src), Err(RoomError::NonFiniteSeed { .. })));
    }

    #[test]
    fn test_syntax_error_keeps_span() {
        let src = "[viewport]\nwidth = \"wide\"\nheight = 100.0\n";
        let err = Room::parse(src).unwrap_err();

        let RoomError::Syntax { span, .. } = &err else {
            panic!("expected a syntax error, got {err:?}");
        };
        assert!(span.is_some());
        assert_eq!(err.src(), src);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let src = "[viewport]\nwidth = 100.0\nheight = 100.0\n\n[[participant]]\nid = \"x\"\nmuted = true\n";
        assert!(matches!(Room::parse(src), Err(RoomError::Syntax { .. })));
    }
}
