//! Huddle CLI library
//!
//! This module contains the core CLI logic: load a room file and the
//! configuration, run the layout headlessly for a number of frames, and
//! write the final frame as an SVG snapshot.

pub mod error_adapter;
pub mod room;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::time::Duration;

use log::{debug, info, warn};

use huddle::{
    LayoutEngine, Participant, Position,
    animation::{CancelToken, FrameLoop, LoopExit, ManualFrames, Scene},
    export::{Exporter, svg::SnapshotBuilder},
    geometry::Size,
};

use room::Room;

/// Speed under which a body counts as at rest, in pixels per tick.
const SETTLED_SPEED: f32 = 0.05;

/// A room with no display: keeps the latest frame only.
struct HeadlessScene {
    room: Room,
    latest: Vec<Position>,
}

impl Scene for HeadlessScene {
    fn participants(&self) -> &[Participant] {
        self.room.participants()
    }

    fn viewport(&self) -> Size {
        self.room.viewport()
    }

    fn present(&mut self, positions: &[Position]) {
        self.latest.clear();
        self.latest.extend_from_slice(positions);
    }
}

/// Run the Huddle CLI application
///
/// This function simulates the room described by the input file and writes
/// the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid room files
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing room"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.preset.is_some() {
        app_config = app_config.with_preset(args.preset);
    }
    let layout = app_config.effective_layout();
    layout.validate()?;

    let room = Room::load(&args.input)?;

    let mut engine = match args.seed {
        Some(seed) => LayoutEngine::seeded(layout, seed),
        None => LayoutEngine::new(layout),
    };
    engine.set_viewport(room.viewport());
    engine.set_participants(room.participants());
    for (id, point) in room.seeds() {
        engine.place(*id, *point);
    }
    // Spawn unseeded participants even when no frame is run.
    engine.tick(Duration::ZERO);

    let mut scene = HeadlessScene {
        room,
        latest: Vec::new(),
    };
    let mut frame_loop = FrameLoop::new(ManualFrames::sixty_hz(args.ticks), CancelToken::new());
    match frame_loop.run(&mut engine, &mut scene) {
        LoopExit::Empty => warn!("Room has no participants, writing an empty snapshot"),
        exit => debug!(exit:?, frames = frame_loop.frames(); "Simulation finished"),
    }

    if engine.is_settled(SETTLED_SPEED) {
        info!(frames = frame_loop.frames(); "Layout settled");
    } else {
        info!(frames = frame_loop.frames(); "Layout still moving");
    }

    let mut exporter = SnapshotBuilder::new(&args.output)
        .with_style(app_config.style())
        .build()?;
    exporter.export_snapshot(&engine.snapshot())?;

    info!(
        output_file = args.output,
        avatars = scene.latest.len();
        "SVG exported successfully"
    );

    Ok(())
}
