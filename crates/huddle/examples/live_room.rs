//! Example: driving a room in real time
//!
//! Runs the layout at 60 Hz for three seconds while the active speaker
//! changes every second, and prints the positions twice per second.

use huddle::{
    LayoutEngine, Participant, Position,
    animation::{CancelToken, FrameLoop, IntervalFrames, LoopExit, Scene},
    config::Preset,
    geometry::Size,
};

struct Terminal {
    participants: Vec<Participant>,
    frame: u64,
}

impl Scene for Terminal {
    fn participants(&self) -> &[Participant] {
        &self.participants
    }

    fn viewport(&self) -> Size {
        Size::new(960.0, 540.0)
    }

    fn present(&mut self, positions: &[Position]) {
        self.frame += 1;

        if self.frame % 60 == 0 {
            let speaker = (self.frame / 60) as usize % self.participants.len();
            for (i, participant) in self.participants.iter_mut().enumerate() {
                *participant = participant
                    .with_speaking(i == speaker)
                    .with_audio_level(if i == speaker { 0.9 } else { 0.0 });
            }
            println!("-- {} is now speaking", self.participants[speaker].id());
        }

        if self.frame % 30 == 0 {
            let line: Vec<String> = positions
                .iter()
                .map(|p| format!("{}=({:.0}, {:.0})", p.id(), p.x(), p.y()))
                .collect();
            println!("frame {:>3}: {}", self.frame, line.join("  "));
        }
    }
}

fn main() {
    let mut scene = Terminal {
        participants: ["ana", "ben", "chloe", "dev"]
            .into_iter()
            .map(Participant::new)
            .collect(),
        frame: 0,
    };

    let mut engine = LayoutEngine::seeded(Preset::Cozy.config(), 2024);
    let mut frame_loop = FrameLoop::new(IntervalFrames::sixty_hz().limit(180), CancelToken::new());

    match frame_loop.run(&mut engine, &mut scene) {
        LoopExit::Exhausted => println!("done after {} frames", frame_loop.frames()),
        exit => println!("stopped early: {exit:?}"),
    }
}
