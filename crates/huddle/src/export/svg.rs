//! SVG rendering of room snapshots.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use huddle_core::{color::Color, geometry::Bounds};

use crate::{
    HuddleError,
    config::StyleConfig,
    export,
    snapshot::{Avatar, Snapshot},
};

/// Radius of an avatar circle, in pixels.
pub const AVATAR_RADIUS: f32 = 28.0;

/// Gap between an avatar and its speaking ring at zero audio level.
const RING_GAP: f32 = 4.0;

/// How far the speaking ring grows at full audio level.
const RING_GROWTH: f32 = 10.0;

const LABEL_OFFSET: f32 = AVATAR_RADIUS + 18.0;

/// Builder for [`Svg`] exporters.
///
/// # Examples
///
/// ```
/// use huddle::{LayoutEngine, Participant, config::{LayoutConfig, StyleConfig}, geometry::Size};
/// use huddle::export::svg::SnapshotBuilder;
///
/// let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 3);
/// engine.compute_layout(&[Participant::new("ana")], Size::new(400.0, 400.0));
///
/// let svg = SnapshotBuilder::new("room.svg")
///     .with_style(&StyleConfig::default())
///     .build()
///     .unwrap();
/// let doc = svg.render_snapshot(&engine.snapshot());
/// assert!(doc.to_string().contains("ana"));
/// ```
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    file_name: String,
    style: StyleConfig,
}

impl SnapshotBuilder {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            style: StyleConfig::default(),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolve the style colors and create the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`HuddleError::Config`] if a configured color does not parse.
    pub fn build(self) -> Result<Svg, HuddleError> {
        Ok(Svg {
            file_name: self.file_name,
            background: self.style.background_color()?,
            avatar: self.style.avatar_color()?,
            speaking: self.style.speaking_color()?,
            label: self.style.label_color()?,
        })
    }
}

/// SVG exporter for room snapshots.
#[derive(Debug)]
pub struct Svg {
    file_name: String,
    background: Color,
    avatar: Color,
    speaking: Color,
    label: Color,
}

impl Svg {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Renders one frame to an SVG document sized like the viewport.
    pub fn render_snapshot(&self, snapshot: &Snapshot) -> Document {
        let viewport = snapshot.viewport();
        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", viewport.width(), viewport.height()),
            )
            .set("width", viewport.width())
            .set("height", viewport.height());

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", viewport.width())
            .set("height", viewport.height())
            .set("fill", &self.background);

        let mut avatars = svg_element::Group::new().set("class", "avatars");
        for avatar in snapshot.avatars() {
            avatars = avatars.add(self.render_avatar(avatar));
        }

        debug!(avatars = snapshot.avatars().len(); "Snapshot rendered");

        doc.add(background)
            .add(self.render_bounds(snapshot.bounds()))
            .add(avatars)
    }

    /// Renders one frame to an SVG string.
    pub fn render_to_string(&self, snapshot: &Snapshot) -> String {
        self.render_snapshot(snapshot).to_string()
    }

    /// The allowed region, as a dashed outline.
    fn render_bounds(&self, bounds: Bounds) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", "none")
            .set("stroke", &self.label.with_alpha(0.25))
            .set("stroke-width", 1)
            .set("stroke-dasharray", "6 4")
    }

    fn render_avatar(&self, avatar: &Avatar) -> svg_element::Group {
        let participant = avatar.participant();
        let point = avatar.point();

        let mut group = svg_element::Group::new()
            .set("class", "avatar")
            .set("data-id", participant.id().to_string());

        if participant.speaking() {
            let radius = AVATAR_RADIUS + RING_GAP + RING_GROWTH * participant.audio_level();
            let ring = svg_element::Circle::new()
                .set("cx", point.x())
                .set("cy", point.y())
                .set("r", radius)
                .set("fill", "none")
                .set("stroke", &self.speaking)
                .set("stroke-width", 3);
            group = group.add(ring);
        }

        let body = svg_element::Circle::new()
            .set("cx", point.x())
            .set("cy", point.y())
            .set("r", AVATAR_RADIUS)
            .set("fill", &self.avatar);

        let label = svg_element::Text::new(participant.id().to_string())
            .set("x", point.x())
            .set("y", point.y() + LABEL_OFFSET)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 13)
            .set("fill", &self.label);

        group.add(body).add(label)
    }

    /// Writes an SVG document to the exporter's file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), export::Error> {
        if snapshot.viewport().is_empty() {
            return Err(export::Error::Render(
                "cannot render a snapshot with an empty viewport".to_string(),
            ));
        }
        let doc = self.render_snapshot(snapshot);
        self.write_document(&doc)
    }
}
