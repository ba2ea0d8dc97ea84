//! Frame driver for continuous layout.
//!
//! [`FrameLoop`] pulls frame deltas from a [`FrameSource`], reads the
//! current room from a [`Scene`], advances a [`LayoutEngine`] with
//! [`LayoutEngine::tick`] and hands the positions back to the scene. Ticks
//! run strictly one after another on the calling thread.
//!
//! The loop stops when its [`CancelToken`] is cancelled, when the frame
//! source runs dry, or when the room becomes empty.
//!
//! ```
//! use std::time::Duration;
//!
//! use huddle::{LayoutEngine, Participant, Position, config::LayoutConfig, geometry::Size};
//! use huddle::animation::{CancelToken, FrameLoop, LoopExit, ManualFrames, Scene};
//!
//! struct Room {
//!     participants: Vec<Participant>,
//!     drawn: Vec<Position>,
//! }
//!
//! impl Scene for Room {
//!     fn participants(&self) -> &[Participant] {
//!         &self.participants
//!     }
//!
//!     fn viewport(&self) -> Size {
//!         Size::new(640.0, 480.0)
//!     }
//!
//!     fn present(&mut self, positions: &[Position]) {
//!         self.drawn = positions.to_vec();
//!     }
//! }
//!
//! let mut room = Room {
//!     participants: vec![Participant::new("ana"), Participant::new("ben")],
//!     drawn: Vec::new(),
//! };
//! let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 1);
//! let mut frames = FrameLoop::new(ManualFrames::sixty_hz(30), CancelToken::new());
//!
//! assert_eq!(frames.run(&mut engine, &mut room), LoopExit::Exhausted);
//! assert_eq!(frames.frames(), 30);
//! assert_eq!(room.drawn.len(), 2);
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use log::{info, trace};
use rand::Rng;

use huddle_core::geometry::Size;

use crate::{
    engine::{LayoutEngine, NOMINAL_FRAME},
    participant::{Participant, Position},
};

/// A source of frame timing.
pub trait FrameSource {
    /// Waits for the next frame if needed and returns the time elapsed since
    /// the previous one, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Duration>;
}

/// Real-time frames paced by a deadline clock.
///
/// Each frame sleeps until its deadline. A frame that overruns its deadline
/// does not try to catch up; the schedule restarts from the current time.
#[derive(Debug, Clone)]
pub struct IntervalFrames {
    interval: Duration,
    remaining: Option<u64>,
    last: Option<Instant>,
    next_deadline: Option<Instant>,
}

impl IntervalFrames {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            remaining: None,
            last: None,
            next_deadline: None,
        }
    }

    /// Frames at the nominal 60 Hz display rate.
    pub fn sixty_hz() -> Self {
        Self::new(NOMINAL_FRAME)
    }

    /// Stop after `frames` frames.
    pub fn limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameSource for IntervalFrames {
    fn next_frame(&mut self) -> Option<Duration> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let start = Instant::now();
        let last = *self.last.get_or_insert(start);
        let deadline = *self.next_deadline.get_or_insert(start + self.interval);

        if start < deadline {
            thread::sleep(deadline - start);
            self.next_deadline = Some(deadline + self.interval);
        } else {
            trace!("Frame overrun");
            self.next_deadline = Some(start + self.interval);
        }

        let now = Instant::now();
        self.last = Some(now);
        Some(now.duration_since(last))
    }
}

/// Frames with a fixed delta that never sleep.
///
/// Drives the engine as fast as possible, for headless runs and tests.
#[derive(Debug, Clone)]
pub struct ManualFrames {
    delta: Duration,
    remaining: u64,
}

impl ManualFrames {
    pub fn new(delta: Duration, frames: u64) -> Self {
        Self {
            delta,
            remaining: frames,
        }
    }

    /// `frames` frames of exactly one nominal frame each.
    pub fn sixty_hz(frames: u64) -> Self {
        Self::new(NOMINAL_FRAME, frames)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameSource for ManualFrames {
    fn next_frame(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.delta)
    }
}

/// Shared flag that stops a [`FrameLoop`].
///
/// Clones share the same flag, so a handle can be given to another thread
/// or to the scene itself. Cancelling is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop scheduling further ticks. The tick in progress, if any, completes.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The host view that owns the room and draws the avatars.
pub trait Scene {
    /// Current room members, read before every tick.
    fn participants(&self) -> &[Participant];

    /// Current viewport size, read before every tick.
    fn viewport(&self) -> Size;

    /// Receives the positions computed by a tick.
    fn present(&mut self, positions: &[Position]);
}

/// Why a [`FrameLoop`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The [`CancelToken`] was cancelled.
    Cancelled,
    /// The [`FrameSource`] ran out of frames.
    Exhausted,
    /// The room had no participants; the engine state was cleared.
    Empty,
}

/// Drives a [`LayoutEngine`] from a [`FrameSource`].
#[derive(Debug)]
pub struct FrameLoop<F> {
    frames: F,
    cancel: CancelToken,
    ticks: u64,
}

impl<F: FrameSource> FrameLoop<F> {
    pub fn new(frames: F, cancel: CancelToken) -> Self {
        Self {
            frames,
            cancel,
            ticks: 0,
        }
    }

    /// A handle to this loop's cancel flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Number of ticks run so far, over all calls to [`FrameLoop::run`].
    pub fn frames(&self) -> u64 {
        self.ticks
    }

    /// Run until cancelled, out of frames, or the room empties.
    pub fn run<R: Rng, S: Scene>(&mut self, engine: &mut LayoutEngine<R>, scene: &mut S) -> LoopExit {
        info!(participants = scene.participants().len(); "Frame loop started");
        let started = self.ticks;

        let exit = loop {
            if self.cancel.is_cancelled() {
                break LoopExit::Cancelled;
            }
            let Some(delta) = self.frames.next_frame() else {
                break LoopExit::Exhausted;
            };
            // Cancelled while waiting for the frame.
            if self.cancel.is_cancelled() {
                break LoopExit::Cancelled;
            }

            let participants = scene.participants();
            if participants.is_empty() {
                engine.clear();
                break LoopExit::Empty;
            }
            engine.set_participants(participants);
            engine.set_viewport(scene.viewport());

            let positions = engine.tick(delta);
            scene.present(&positions);
            self.ticks += 1;
        };

        info!(frames = self.ticks - started, exit:? = exit; "Frame loop stopped");
        exit
    }
}
