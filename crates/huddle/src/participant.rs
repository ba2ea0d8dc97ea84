//! Participants fed into the layout and the positions it produces.

use huddle_core::{geometry::Point, identifier::Id};

/// A room member to be positioned.
///
/// Owned by the host; the engine reads it once per tick and never mutates
/// it.
///
/// # Examples
///
/// ```
/// use huddle::Participant;
///
/// let ana = Participant::new("ana").with_speaking(true).with_audio_level(1.7);
/// assert!(ana.speaking());
/// assert_eq!(ana.audio_level(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
    id: Id,
    speaking: bool,
    audio_level: f32,
}

impl Participant {
    /// Creates a silent participant with a zero audio level.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            speaking: false,
            audio_level: 0.0,
        }
    }

    pub fn with_speaking(mut self, speaking: bool) -> Self {
        self.speaking = speaking;
        self
    }

    /// Sets the audio level, clamped into `[0, 1]`. NaN reads as silence.
    pub fn with_audio_level(mut self, audio_level: f32) -> Self {
        self.audio_level = if audio_level.is_nan() {
            0.0
        } else {
            audio_level.clamp(0.0, 1.0)
        };
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn speaking(&self) -> bool {
        self.speaking
    }

    pub fn audio_level(&self) -> f32 {
        self.audio_level
    }
}

/// Where a participant should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    id: Id,
    point: Point,
}

impl Position {
    pub fn new(id: Id, point: Point) -> Self {
        Self { id, point }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn x(&self) -> f32 {
        self.point.x()
    }

    pub fn y(&self) -> f32 {
        self.point.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_is_silent() {
        let p = Participant::new("quiet");
        assert_eq!(p.id(), "quiet");
        assert!(!p.speaking());
        assert_eq!(p.audio_level(), 0.0);
    }

    #[test]
    fn test_audio_level_is_clamped() {
        assert_eq!(Participant::new("a").with_audio_level(-0.5).audio_level(), 0.0);
        assert_eq!(Participant::new("a").with_audio_level(0.4).audio_level(), 0.4);
        assert_eq!(Participant::new("a").with_audio_level(3.0).audio_level(), 1.0);
        assert_eq!(Participant::new("a").with_audio_level(f32::NAN).audio_level(), 0.0);
    }

    #[test]
    fn test_position_accessors() {
        let position = Position::new(Id::new("pos"), Point::new(3.0, 4.0));
        assert_eq!(position.id(), "pos");
        assert_eq!(position.x(), 3.0);
        assert_eq!(position.y(), 4.0);
    }
}
