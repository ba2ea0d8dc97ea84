//! A frozen frame of a room, ready to be rendered.

use huddle_core::geometry::{Bounds, Point, Size};

use crate::participant::Participant;

/// One participant and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    participant: Participant,
    point: Point,
}

impl Avatar {
    pub fn new(participant: Participant, point: Point) -> Self {
        Self { participant, point }
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

/// The state of a room at one instant.
///
/// Produced by [`LayoutEngine::snapshot`](crate::LayoutEngine::snapshot).
/// Avatars are listed in participant order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    viewport: Size,
    bounds: Bounds,
    avatars: Vec<Avatar>,
}

impl Snapshot {
    pub fn new(viewport: Size, bounds: Bounds, avatars: Vec<Avatar>) -> Self {
        Self {
            viewport,
            bounds,
            avatars,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Region the layout keeps avatar centers in.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn avatars(&self) -> &[Avatar] {
        &self.avatars
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }
}
