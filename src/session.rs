use crate::engine::{Engine, StepOutcome, TickReport};
use crate::events::RenderSink;
use crate::input::{InputSnapshot, direction_change_is_valid};

/// High-level session mode.
///
/// `GameOver` and `Won` are terminal until a restart; `Won` is the distinct
/// board-full outcome (the body covers every cell).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Running,
    Paused,
    GameOver,
    Won,
}

/// Owns the engine plus everything pacing-related: mode, edge detection for
/// pause/restart, and the per-skill tick divisor.
///
/// Driven by [`pulse`] at a fixed external rate; the engine only ticks every
/// `tick_divisor` pulses while the mode is `Running`, which is the sole
/// speed-control mechanism.
///
/// [`pulse`]: Session::pulse
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    mode: Mode,
    pulses_until_tick: u32,
    pause_held: bool,
    restart_held: bool,
}

impl Session {
    /// Wraps a freshly constructed engine in a running session.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            mode: Mode::Running,
            pulses_until_tick: 1,
            pause_held: false,
            restart_held: false,
        }
    }

    /// Processes one timing pulse with the input sampled for it.
    ///
    /// Input is consumed in a fixed order: restart edge first (honored in
    /// any mode), then direction latching and the pause edge, then at most
    /// one gated simulation tick.
    pub fn pulse<S: RenderSink>(&mut self, input: InputSnapshot, sink: &mut S) {
        let restart_edge = input.restart && !self.restart_held;
        self.restart_held = input.restart;
        if restart_edge {
            self.restart(sink);
            return;
        }

        if matches!(self.mode, Mode::GameOver | Mode::Won) {
            return;
        }

        if let Some(direction) = input.pressed_direction() {
            if direction_change_is_valid(self.engine.current_direction(), direction) {
                self.engine.set_pending(direction);
            }
        }

        let pause_edge = input.pause && !self.pause_held;
        self.pause_held = input.pause;
        if pause_edge {
            self.mode = match self.mode {
                Mode::Running => Mode::Paused,
                Mode::Paused => Mode::Running,
                other => other,
            };
            sink.mode_changed(self.mode);
        }

        if self.mode != Mode::Running {
            return;
        }

        self.pulses_until_tick -= 1;
        if self.pulses_until_tick > 0 {
            return;
        }
        self.pulses_until_tick = self.engine.difficulty().tick_divisor.max(1);

        match self.engine.step() {
            StepOutcome::Moved(report) => self.forward_report(&report, sink),
            StepOutcome::Collision => {
                self.mode = Mode::GameOver;
                sink.mode_changed(self.mode);
            }
            StepOutcome::BoardFull(report) => {
                self.forward_report(&report, sink);
                self.mode = Mode::Won;
                sink.mode_changed(self.mode);
            }
        }
    }

    /// Restarts the session from any mode.
    pub fn restart<S: RenderSink>(&mut self, sink: &mut S) {
        self.engine.restart();
        self.mode = Mode::Running;
        self.pulses_until_tick = 1;

        sink.mode_changed(self.mode);
        sink.fruit_placed(self.engine.fruit());
        sink.score_changed(0);
    }

    fn forward_report<S: RenderSink>(&self, report: &TickReport, sink: &mut S) {
        sink.tick_delta(&report.delta);
        if let Some(score) = report.new_score {
            sink.score_changed(score);
        }
        if let Some(cell) = report.new_fruit {
            sink.fruit_placed(cell);
        }
    }

    /// Current session mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Read access to the owned engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access for scripted scenarios.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
