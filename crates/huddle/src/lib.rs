//! Huddle - force-directed avatar layout for voice rooms.
//!
//! Places participant avatars inside a viewport so that they cluster
//! around the center without overlapping, leave extra room around whoever
//! is speaking, and stay clear of the viewport edges and fixed UI chrome.
//!
//! The core is [`LayoutEngine`], a small physics simulation advanced one
//! step per frame. [`animation`] drives it continuously, [`config`] tunes it
//! (including the canned [`config::Preset`]s), and [`export`] renders a
//! frame to SVG.
//!
//! # Examples
//!
//! ```
//! use huddle::{LayoutEngine, Participant, config::{Preset, StyleConfig}, geometry::Size};
//!
//! let mut engine = LayoutEngine::seeded(Preset::Compact.config(), 11);
//! let room: Vec<_> = ["ana", "ben", "cy"].into_iter().map(Participant::new).collect();
//!
//! for _ in 0..120 {
//!     engine.compute_layout(&room, Size::new(640.0, 480.0));
//! }
//!
//! let svg = huddle::render_svg(&engine.snapshot(), &StyleConfig::default()).unwrap();
//! assert!(svg.contains("cy"));
//! ```

pub mod animation;
pub mod config;
pub mod engine;
pub mod export;
pub mod participant;
pub mod snapshot;

mod error;

pub use huddle_core::{color, geometry, identifier};

pub use engine::LayoutEngine;
pub use error::HuddleError;
pub use participant::{Participant, Position};

use log::debug;

use config::StyleConfig;
use snapshot::Snapshot;

/// Render one frame of a room to an SVG string.
///
/// # Errors
///
/// Returns [`HuddleError::Config`] if `style` holds an invalid color.
pub fn render_svg(snapshot: &Snapshot, style: &StyleConfig) -> Result<String, HuddleError> {
    let svg = export::svg::SnapshotBuilder::default()
        .with_style(style)
        .build()?;
    let rendered = svg.render_to_string(snapshot);
    debug!(bytes = rendered.len(); "Rendered SVG in memory");
    Ok(rendered)
}
