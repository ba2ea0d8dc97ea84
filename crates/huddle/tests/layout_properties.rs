//! Behavioural tests for the layout engine, driven through the public API.

use std::time::Duration;

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use huddle::{
    LayoutEngine, Participant, Position,
    config::{LayoutConfig, MAX_VELOCITY, Preset},
    engine::SPAWN_SPREAD,
    geometry::{Point, Size},
    identifier::Id,
};

fn room(ids: &[&str]) -> Vec<Participant> {
    ids.iter().map(|id| Participant::new(*id)).collect()
}

fn separation(positions: &[Position]) -> f32 {
    positions[0].point().distance(positions[1].point())
}

#[test]
fn positions_stay_bounded_and_velocities_clamped() {
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 5);
    let participants = room(&["a", "b", "c", "d", "e", "f", "g", "h"]);
    let viewport = Size::new(500.0, 400.0);

    for _ in 0..300 {
        let positions = engine.compute_layout(&participants, viewport);
        let bounds = engine.bounds();

        for position in &positions {
            assert!(bounds.contains(position.point()), "{position:?} outside {bounds:?}");
            let velocity = engine.body(position.id()).unwrap().velocity();
            assert!(velocity.x().abs() <= MAX_VELOCITY);
            assert!(velocity.y().abs() <= MAX_VELOCITY);
        }
    }
}

#[test]
fn coincident_participants_separate() {
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 0);
    let participants = room(&["first", "second"]);
    let viewport = Size::new(800.0, 600.0);
    engine.place(Id::new("first"), Point::new(400.0, 300.0));
    engine.place(Id::new("second"), Point::new(400.0, 300.0));

    // The initial push widens the gap until the pair overshoots, near tick 10.
    let mut previous = 0.0;
    for _ in 0..8 {
        let current = separation(&engine.compute_layout(&participants, viewport));
        assert!(current >= previous, "{current} < {previous}");
        previous = current;
    }

    let min_distance = engine.config().min_distance();
    for tick in 8..200 {
        let current = separation(&engine.compute_layout(&participants, viewport));
        if tick >= 40 {
            assert!(
                (0.5 * min_distance..=1.5 * min_distance).contains(&current),
                "separation {current} at tick {tick}"
            );
        }
    }
}

#[test]
fn speaking_widens_equilibrium_spacing() {
    fn settle(participants: &[Participant]) -> f32 {
        let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 0);
        engine.place(participants[0].id(), Point::new(350.0, 300.0));
        engine.place(participants[1].id(), Point::new(450.0, 300.0));

        let mut positions = Vec::new();
        for _ in 0..300 {
            positions = engine.compute_layout(participants, Size::new(800.0, 600.0));
        }
        separation(&positions)
    }

    let silent = settle(&room(&["x", "y"]));
    let speaking = settle(&[Participant::new("x").with_speaking(true), Participant::new("y")]);

    assert!(
        speaking > silent + 3.0,
        "speaking {speaking} vs silent {silent}"
    );
}

#[test]
fn zero_sized_viewports_yield_nothing() {
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 0);
    let participants = room(&["a", "b"]);

    for viewport in [
        Size::new(0.0, 0.0),
        Size::new(0.0, 600.0),
        Size::new(800.0, 0.0),
        Size::new(-10.0, 600.0),
    ] {
        assert!(engine.compute_layout(&participants, viewport).is_empty());
        assert!(engine.tick(Duration::from_millis(100)).is_empty());
    }
    assert!(engine.is_empty());
}

#[test]
fn compact_preset_with_seed_is_deterministic() {
    let participants = room(&["a", "b", "c", "d"]);
    let viewport = Size::new(640.0, 480.0);

    let run = || {
        let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 1234);
        engine.apply_preset(Preset::Compact);
        engine.apply_preset(Preset::Compact);

        let mut trace = Vec::new();
        for _ in 0..150 {
            trace.push(engine.compute_layout(&participants, viewport));
        }
        trace
    };

    assert_eq!(run(), run());
}

#[test]
fn three_participants_in_small_room() {
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 0);
    let participants = room(&["a", "b", "c"]);
    engine.place(Id::new("a"), Point::new(150.0, 150.0));
    engine.place(Id::new("b"), Point::new(250.0, 150.0));
    engine.place(Id::new("c"), Point::new(200.0, 250.0));

    let mut positions = Vec::new();
    for _ in 0..100 {
        positions = engine.compute_layout(&participants, Size::new(400.0, 400.0));
    }

    assert_eq!(positions.len(), 3);
    for position in &positions {
        assert!(position.point().is_finite());
        assert!((80.0..=320.0).contains(&position.x()), "{position:?}");
        assert!((140.0..=320.0).contains(&position.y()), "{position:?}");
    }
}

#[test]
fn reordering_participants_keeps_trajectories() {
    let viewport = Size::new(800.0, 600.0);
    let ordered = room(&["a", "b", "c"]);
    let shuffled = [
        room(&["c", "a", "b"]),
        room(&["b", "c", "a"]),
        room(&["a", "c", "b"]),
    ];

    let start = [
        ("a", Point::new(380.0, 290.0)),
        ("b", Point::new(420.0, 300.0)),
        ("c", Point::new(400.0, 330.0)),
    ];
    let mut steady = LayoutEngine::seeded(LayoutConfig::default(), 0);
    let mut reordered = LayoutEngine::seeded(LayoutConfig::default(), 0);
    for (id, point) in start {
        steady.place(Id::new(id), point);
        reordered.place(Id::new(id), point);
    }

    for tick in 0..90 {
        steady.compute_layout(&ordered, viewport);
        reordered.compute_layout(&shuffled[tick % shuffled.len()], viewport);
    }

    for id in ["a", "b", "c"] {
        let expected = steady.body(Id::new(id)).unwrap().position();
        let actual = reordered.body(Id::new(id)).unwrap().position();
        assert_approx_eq!(f32, expected.x(), actual.x(), epsilon = 0.01);
        assert_approx_eq!(f32, expected.y(), actual.y(), epsilon = 0.01);
    }
}

#[test]
fn joins_spawn_near_center_and_leaves_are_forgotten() {
    let viewport = Size::new(800.0, 600.0);
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 77);

    for _ in 0..50 {
        engine.compute_layout(&room(&["host", "guest"]), viewport);
    }

    // A zero-length tick spawns the newcomer without moving anyone.
    engine.set_participants(&room(&["host", "guest", "late"]));
    let positions = engine.tick(Duration::ZERO);
    assert_eq!(positions.len(), 3);

    let late = engine.body(Id::new("late")).unwrap().position();
    let offset = late.sub_point(viewport.center());
    assert!(offset.x().abs() <= SPAWN_SPREAD);
    assert!(offset.y().abs() <= SPAWN_SPREAD);

    let positions = engine.compute_layout(&room(&["late", "host"]), viewport);
    assert_eq!(engine.len(), 2);
    assert!(engine.body(Id::new("guest")).is_none());
    assert_eq!(positions[0].id(), "late");
    assert_eq!(positions[1].id(), "host");

    // Emptying the room clears the state entirely.
    assert!(engine.compute_layout(&[], viewport).is_empty());
    assert!(engine.is_empty());
}

#[test]
fn crowded_room_settles_apart() {
    let mut engine = LayoutEngine::seeded(Preset::Cozy.config(), 3);
    let participants = room(&["a", "b", "c", "d"]);

    for _ in 0..600 {
        engine.compute_layout(&participants, Size::new(1200.0, 900.0));
    }

    let positions = engine.positions();
    for (i, left) in positions.iter().enumerate() {
        for right in &positions[i + 1..] {
            assert!(left.point().distance(right.point()) > 60.0);
        }
    }
}

// ===================
// Property tests
// ===================

fn participants_strategy() -> impl Strategy<Value = Vec<Participant>> {
    prop::collection::vec((any::<bool>(), 0.0f32..1.0), 1..10).prop_map(|flags| {
        flags
            .into_iter()
            .enumerate()
            .map(|(i, (speaking, level))| {
                Participant::new(Id::from_anonymous(i))
                    .with_speaking(speaking)
                    .with_audio_level(level)
            })
            .collect()
    })
}

fn viewport_strategy() -> impl Strategy<Value = Size> {
    (1.0f32..2000.0, 1.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn preset_strategy() -> impl Strategy<Value = Option<Preset>> {
    prop::option::of(prop::sample::select(Preset::ALL.to_vec()))
}

/// Every tick keeps bodies inside the bounds and under the speed limit.
fn check_bounded_and_clamped(
    participants: Vec<Participant>,
    viewport: Size,
    preset: Option<Preset>,
    seed: u64,
) -> Result<(), TestCaseError> {
    let config = preset.map(Preset::config).unwrap_or_default();
    let mut engine = LayoutEngine::seeded(config, seed);

    for _ in 0..60 {
        let positions = engine.compute_layout(&participants, viewport);
        prop_assert_eq!(positions.len(), participants.len());

        let bounds = engine.bounds();
        for position in &positions {
            prop_assert!(position.point().is_finite());
            prop_assert!(bounds.contains(position.point()));

            let velocity = engine.body(position.id()).unwrap().velocity();
            prop_assert!(velocity.x().abs() <= MAX_VELOCITY);
            prop_assert!(velocity.y().abs() <= MAX_VELOCITY);
        }
    }
    Ok(())
}

/// Resizing mid-run pulls every body back inside the new bounds.
fn check_resize_recovers(
    participants: Vec<Participant>,
    before: Size,
    after: Size,
    seed: u64,
) -> Result<(), TestCaseError> {
    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), seed);
    for _ in 0..20 {
        engine.compute_layout(&participants, before);
    }

    let positions = engine.compute_layout(&participants, after);
    let bounds = engine.bounds();
    for position in &positions {
        prop_assert!(bounds.contains(position.point()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bounded_and_clamped(
        participants in participants_strategy(),
        viewport in viewport_strategy(),
        preset in preset_strategy(),
        seed in any::<u64>(),
    ) {
        check_bounded_and_clamped(participants, viewport, preset, seed)?;
    }

    #[test]
    fn resize_recovers(
        participants in participants_strategy(),
        before in viewport_strategy(),
        after in viewport_strategy(),
        seed in any::<u64>(),
    ) {
        check_resize_recovers(participants, before, after, seed)?;
    }
}
