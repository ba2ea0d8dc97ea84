//! Force-directed room layout engine
//!
//! This module positions room participants inside a bounded viewport with a
//! small physics simulation. Every participant is pulled toward the viewport
//! center, pushed away from nearby participants, and kept inside the
//! viewport by a soft boundary force followed by a hard clamp.
//!
//! The engine is a state object. It owns one [`Body`] (position and
//! velocity) per participant, keyed by the participant's [`Id`], and
//! advances them one step per frame. The host drives it: either
//! [`LayoutEngine::compute_layout`] once per frame, or
//! [`LayoutEngine::tick`] with the elapsed time (see [`crate::animation`]).
//!
//! # Step
//!
//! For every participant `i`, from a snapshot of the previous positions:
//!
//! 1. Gravity: `(center - p_i) * center_gravity`.
//! 2. Repulsion from every `j` closer than twice the pair's effective
//!    minimum distance: `(p_i - p_j) / d * repulsion_strength / d²`,
//!    amplified by `(eff / d)²` once the pair is closer than `eff`.
//! 3. Boundary push-back proportional to how far `p_i` lies outside the
//!    allowed region.
//! 4. `v = (v + f) * damping`, each axis clamped to [`MAX_VELOCITY`].
//! 5. `p += v`, clamped into the allowed region.

use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use huddle_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    config::{BOUNDARY_STIFFNESS, LayoutConfig, MAX_VELOCITY, Preset},
    snapshot::{Avatar, Snapshot},
    participant::{Participant, Position},
};

/// Simulated duration of one physics step.
pub const NOMINAL_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Upper bound on physics steps run by a single [`LayoutEngine::tick`].
pub const MAX_STEPS_PER_TICK: u32 = 5;

/// Maximum offset from the viewport center, per axis, of a newly spawned body.
pub const SPAWN_SPREAD: f32 = 50.0;

/// Maximum initial speed, per axis, of a newly spawned body.
pub const SPAWN_SPEED: f32 = 2.0;

/// Ceiling on a single pair's repulsion, keeping force sums finite when
/// bodies almost coincide.
const MAX_REPULSION: f32 = 1.0e12;

/// Position and velocity of one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    position: Point,
    velocity: Point,
}

impl Body {
    pub fn new(position: Point, velocity: Point) -> Self {
        Self { position, velocity }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }
}

/// Force layout engine for voice rooms.
///
/// `R` is the randomness source used to place newly joined participants.
/// Inject a seeded generator with [`LayoutEngine::with_rng`] or
/// [`LayoutEngine::seeded`] to make trajectories reproducible.
///
/// # Examples
///
/// ```
/// use huddle::{LayoutEngine, Participant, config::LayoutConfig, geometry::Size};
///
/// let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 7);
/// let room = [
///     Participant::new("ana").with_speaking(true),
///     Participant::new("ben"),
/// ];
///
/// let mut positions = Vec::new();
/// for _ in 0..60 {
///     positions = engine.compute_layout(&room, Size::new(800.0, 600.0));
/// }
///
/// assert_eq!(positions.len(), 2);
/// assert_eq!(positions[0].id(), "ana");
///
/// // No viewport yet, nothing to draw.
/// assert!(engine.compute_layout(&room, Size::new(0.0, 600.0)).is_empty());
/// ```
pub struct LayoutEngine<R = StdRng> {
    config: LayoutConfig,
    rng: R,
    bodies: IndexMap<Id, Body>,
    participants: Vec<Participant>,
    viewport: Size,
    accumulator: Duration,
}

impl LayoutEngine<StdRng> {
    /// Create an engine seeded from the operating system.
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an engine whose spawn positions are derived from `seed`.
    pub fn seeded(config: LayoutConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for LayoutEngine<StdRng> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<R: Rng> LayoutEngine<R> {
    /// Create an engine drawing spawn positions from `rng`.
    pub fn with_rng(config: LayoutConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            bodies: IndexMap::new(),
            participants: Vec::new(),
            viewport: Size::default(),
            accumulator: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the layout configuration. Bodies keep their state.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Switch to the configuration of `preset`.
    pub fn apply_preset(&mut self, preset: Preset) {
        debug!(preset:% = preset; "Applying layout preset");
        self.set_config(preset.config());
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size, typically from a resize observer between
    /// ticks.
    pub fn set_viewport(&mut self, viewport: Size) {
        if viewport != self.viewport {
            debug!(width = viewport.width(), height = viewport.height(); "Viewport changed");
            self.viewport = viewport;
        }
    }

    /// The participants used by [`LayoutEngine::step`] and [`LayoutEngine::tick`].
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Replace the participant list.
    ///
    /// Bodies of participants no longer present are dropped. Bodies of
    /// remaining participants are kept regardless of their new order. When a
    /// participant id appears more than once, only the first entry is kept.
    pub fn set_participants(&mut self, participants: &[Participant]) {
        self.participants.clear();
        for participant in participants {
            if self
                .participants
                .iter()
                .any(|kept| kept.id() == participant.id())
            {
                warn!(participant:% = participant.id(); "Ignoring duplicate participant");
                continue;
            }
            self.participants.push(*participant);
        }

        let before = self.bodies.len();
        let present = &self.participants;
        self.bodies
            .retain(|id, _| present.iter().any(|participant| participant.id() == *id));
        if self.bodies.len() != before {
            debug!(dropped = before - self.bodies.len(); "Dropped bodies of departed participants");
        }
    }

    /// Put a participant's body at `point` with zero velocity.
    ///
    /// Useful to restore a saved arrangement or to start from a known state.
    /// The point is clamped into the allowed region on the next step. A
    /// point with a NaN or infinite coordinate is ignored, and the
    /// participant spawns as usual.
    ///
    /// A body placed for an id outside the current participant list is
    /// kept but not simulated until that participant joins. The next
    /// [`LayoutEngine::set_participants`] without it drops the body.
    pub fn place(&mut self, id: Id, point: Point) {
        if !point.is_finite() {
            warn!(participant:% = id, x = point.x(), y = point.y(); "Ignoring non-finite placement");
            return;
        }
        self.bodies.insert(id, Body::new(point, Point::default()));
    }

    /// Current state of a participant's body, if it has one.
    pub fn body(&self, id: Id) -> Option<Body> {
        self.bodies.get(&id).copied()
    }

    /// Number of bodies currently simulated.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Discard all simulation state.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.participants.clear();
        self.accumulator = Duration::ZERO;
    }

    /// The region bodies are kept in for the current viewport.
    pub fn bounds(&self) -> Bounds {
        Bounds::inset_viewport(self.viewport, self.config.boundary_insets())
    }

    /// Advance the simulation by one step for `participants` in `viewport`.
    ///
    /// Returns one position per participant, in input order. A viewport
    /// with no area yields no positions and leaves the state untouched; the
    /// caller should simply not draw avatars yet.
    pub fn compute_layout(&mut self, participants: &[Participant], viewport: Size) -> Vec<Position> {
        if viewport.is_empty() {
            return Vec::new();
        }
        self.set_viewport(viewport);
        self.set_participants(participants);
        self.step()
    }

    /// Advance the simulation by the time elapsed since the last frame.
    ///
    /// Time is accumulated and consumed in [`NOMINAL_FRAME`] steps, so the
    /// motion is the same whatever the host refresh rate. At most
    /// [`MAX_STEPS_PER_TICK`] steps run per call; a longer stall (a
    /// backgrounded tab, a debugger) is dropped rather than replayed.
    pub fn tick(&mut self, delta: Duration) -> Vec<Position> {
        if self.viewport.is_empty() {
            self.accumulator = Duration::ZERO;
            return Vec::new();
        }

        self.accumulator += delta;
        let frames = self.accumulator.as_nanos() / NOMINAL_FRAME.as_nanos();
        let steps = if frames > u128::from(MAX_STEPS_PER_TICK) {
            trace!(frames; "Dropping stalled frames");
            self.accumulator = Duration::ZERO;
            MAX_STEPS_PER_TICK
        } else {
            // Bounded by MAX_STEPS_PER_TICK above.
            let steps = frames as u32;
            self.accumulator -= NOMINAL_FRAME * steps;
            steps
        };

        self.spawn_missing();
        for _ in 0..steps {
            self.advance();
        }
        self.positions()
    }

    /// Run exactly one physics step over the stored participants and viewport.
    pub fn step(&mut self) -> Vec<Position> {
        if self.viewport.is_empty() {
            return Vec::new();
        }
        self.spawn_missing();
        self.advance();
        self.positions()
    }

    /// Current positions, in participant order, without advancing.
    pub fn positions(&self) -> Vec<Position> {
        if self.viewport.is_empty() {
            return Vec::new();
        }
        self.participants
            .iter()
            .filter_map(|participant| {
                self.bodies
                    .get(&participant.id())
                    .map(|body| Position::new(participant.id(), body.position))
            })
            .collect()
    }

    /// Returns `true` when every body moves slower than `threshold` pixels
    /// per tick.
    pub fn is_settled(&self, threshold: f32) -> bool {
        self.bodies
            .values()
            .all(|body| body.velocity.hypot() < threshold)
    }

    /// Capture the current frame for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let avatars = self
            .participants
            .iter()
            .filter_map(|participant| {
                self.bodies
                    .get(&participant.id())
                    .map(|body| Avatar::new(*participant, body.position))
            })
            .collect();
        Snapshot::new(self.viewport, self.bounds(), avatars)
    }

    /// Give a body to every participant that does not have one yet.
    fn spawn_missing(&mut self) {
        let center = self.viewport.center();
        let bounds = self.bounds();
        for participant in &self.participants {
            if self.bodies.contains_key(&participant.id()) {
                continue;
            }
            let offset = Point::new(
                self.rng.random_range(-SPAWN_SPREAD..=SPAWN_SPREAD),
                self.rng.random_range(-SPAWN_SPREAD..=SPAWN_SPREAD),
            );
            let velocity = Point::new(
                self.rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
                self.rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
            );
            let position = bounds.clamp_point(center.add_point(offset));
            debug!(
                participant:% = participant.id(),
                x = position.x(),
                y = position.y();
                "Spawned body"
            );
            self.bodies
                .insert(participant.id(), Body::new(position, velocity));
        }
    }

    /// One explicit Euler step over all participants.
    fn advance(&mut self) {
        let center = self.viewport.center();
        let bounds = self.bounds();

        let snapshot: Vec<(Id, Point, bool)> = self
            .participants
            .iter()
            .filter_map(|participant| {
                self.bodies
                    .get(&participant.id())
                    .map(|body| (participant.id(), body.position, participant.speaking()))
            })
            .collect();

        let forces: Vec<Point> = snapshot
            .iter()
            .enumerate()
            .map(|(i, &(_, position, speaking))| {
                let gravity = center.sub_point(position).scale(self.config.center_gravity());

                let repulsion = snapshot
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(Point::default(), |acc, (j, &(_, other, other_speaking))| {
                        let min_distance = self
                            .config
                            .effective_min_distance(speaking || other_speaking);
                        acc.add_point(self.repulsion(position, other, min_distance, i < j))
                    });

                let boundary = bounds.penetration(position).scale(BOUNDARY_STIFFNESS);

                gravity.add_point(repulsion).add_point(boundary)
            })
            .collect();

        for ((id, _, _), force) in snapshot.iter().zip(forces) {
            if let Some(body) = self.bodies.get_mut(id) {
                body.velocity = body
                    .velocity
                    .add_point(force)
                    .scale(self.config.damping())
                    .clamp_axes(MAX_VELOCITY);
                body.position = bounds.clamp_point(body.position.add_point(body.velocity));
            }
        }

        trace!(bodies = snapshot.len(); "Advanced layout step");
    }

    /// Force pushing a body at `position` away from one at `other`.
    ///
    /// `first` tells whether `position` belongs to the earlier participant
    /// of the pair; it orients the push when both points coincide.
    fn repulsion(&self, position: Point, other: Point, min_distance: f32, first: bool) -> Point {
        let delta = position.sub_point(other);
        let distance = delta.hypot();
        if distance > 2.0 * min_distance {
            return Point::default();
        }

        let (direction, distance) = if distance == 0.0 {
            let nominal = if first { -1.0 } else { 1.0 };
            (Point::new(nominal, 0.0), 1.0)
        } else {
            (delta.scale(1.0 / distance), distance)
        };

        // Stronger repulsion when participants are too close
        let mut magnitude = self.config.repulsion_strength() / (distance * distance);
        if distance < min_distance {
            let overlap = min_distance / distance;
            magnitude *= overlap * overlap;
        }

        direction.scale(magnitude.min(MAX_REPULSION))
    }
}
