//! A labyrinth play session
//!
//! Owns the simulation, both input sources and the user's settings. The
//! host forwards raw browser events here and plays whatever cues come back
//! from [`LabyrinthSession::drain_cues`].

use anyhow::Result;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::feedback::{self, Cue, Trigger};
use crate::input::{DeltaSource, DragInput, TiltInput};
use crate::settings::Settings;
use crate::sim::{self, Ball, MazePhase, MazeState, Rect, StepOutcome, TickInput, Wall};
use crate::tuning::MazeTuning;

/// Which input source moves the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Device orientation, stepped every frame
    #[default]
    Tilt,
    /// Pointer/touch drag, stepped on every move event
    Drag,
}

pub struct LabyrinthSession {
    state: MazeState,
    mode: ControlMode,
    tilt: TiltInput,
    drag: DragInput,
    settings: Settings,
    cues: Vec<Cue>,
}

impl LabyrinthSession {
    /// Start a session in tilt mode
    pub fn new(tuning: MazeTuning, settings: Settings, seed: u64) -> Result<Self> {
        let tilt = TiltInput::from_tuning(&tuning);
        let drag = DragInput::from_tuning(&tuning);
        let state = MazeState::new(tuning, seed)?;
        Ok(Self {
            state,
            mode: ControlMode::Tilt,
            tilt,
            drag,
            settings,
            cues: Vec::new(),
        })
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch input source; any gesture in progress is dropped
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        log::info!("Control mode: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.tilt.reset();
        self.drag.reset();
        self.emit(Trigger::ModeChanged);
    }

    /// Device orientation reading in degrees (ignored outside tilt mode)
    pub fn on_orientation(&mut self, beta: Option<f32>, gamma: Option<f32>) {
        if self.mode == ControlMode::Tilt {
            self.tilt.observe(beta, gamma);
        }
    }

    /// Pointer pressed at container-local `(x, y)`
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.mode == ControlMode::Drag {
            self.drag.press(Vec2::new(x, y));
        }
    }

    /// Pointer moved; in an active drag this steps the ball immediately
    pub fn pointer_move(&mut self, x: f32, y: f32) -> StepOutcome {
        if self.mode != ControlMode::Drag || self.drag.drag_to(Vec2::new(x, y)).is_none() {
            return StepOutcome::Ignored;
        }
        let delta = self.drag.take_delta();
        let outcome = sim::step(&mut self.state, delta);
        self.collect_events();
        outcome
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    /// Animation frame: advance timers and, in tilt mode, roll the ball
    pub fn frame(&mut self, dt: f32) {
        let delta = match self.mode {
            ControlMode::Tilt => self.tilt.take_delta(),
            ControlMode::Drag => Vec2::ZERO,
        };
        sim::tick(&mut self.state, &TickInput { delta }, dt);
        self.collect_events();
    }

    /// Put the ball back at the start (reset button)
    pub fn reset_ball(&mut self) {
        self.state.reset_ball();
        self.collect_events();
    }

    /// New wall layout
    pub fn regenerate(&mut self, seed: u64) {
        self.state.regenerate(seed);
        self.collect_events();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Take feedback cues produced since the last call
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn walls(&self) -> &[Wall] {
        &self.state.walls
    }

    pub fn goal(&self) -> Rect {
        self.state.goal
    }

    pub fn phase(&self) -> MazePhase {
        self.state.phase
    }

    pub fn success_count(&self) -> u32 {
        self.state.success_count
    }

    pub fn time_spent_secs(&self) -> u64 {
        self.state.time_spent_secs()
    }

    fn emit(&mut self, trigger: Trigger) {
        self.cues.extend(feedback::cues(trigger, &self.settings));
    }

    fn collect_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(trigger) = Trigger::from_maze_event(&event) {
                self.emit(trigger);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{BUMP_HAPTIC, Cue, GOAL_HAPTIC, MODE_TONE, RESET_HAPTIC};

    fn session() -> LabyrinthSession {
        let settings = Settings {
            sound_enabled: true,
            haptic_enabled: true,
            ..Default::default()
        };
        let mut session = LabyrinthSession::new(MazeTuning::default(), settings, 5).unwrap();
        session.state.walls.truncate(4);
        session
    }

    #[test]
    fn test_starts_in_tilt_mode() {
        let s = session();
        assert_eq!(s.mode(), ControlMode::Tilt);
        assert_eq!(s.ball().pos, Vec2::splat(30.0));
    }

    #[test]
    fn test_tilt_rolls_ball_each_frame() {
        let mut s = session();
        // Full weight so one reading lands exactly
        s.tilt = TiltInput::new(1.0, 20.0);
        s.on_orientation(Some(20.0), Some(40.0));
        s.frame(0.016);
        assert_eq!(s.ball().pos, Vec2::new(32.0, 31.0));
        s.frame(0.016);
        assert_eq!(s.ball().pos, Vec2::new(34.0, 32.0));
    }

    #[test]
    fn test_pointer_ignored_in_tilt_mode() {
        let mut s = session();
        s.pointer_down(0.0, 0.0);
        assert_eq!(s.pointer_move(20.0, 20.0), StepOutcome::Ignored);
        assert_eq!(s.ball().pos, Vec2::splat(30.0));
    }

    #[test]
    fn test_drag_steps_on_move() {
        let mut s = session();
        s.set_mode(ControlMode::Drag);
        assert_eq!(s.drain_cues(), vec![Cue::Tone(MODE_TONE)]);

        s.pointer_down(100.0, 100.0);
        assert_eq!(s.pointer_move(120.0, 110.0), StepOutcome::Moved);
        assert_eq!(s.ball().pos, Vec2::new(40.0, 35.0));

        // Frames don't move the ball in drag mode
        s.on_orientation(Some(45.0), Some(45.0));
        s.frame(0.016);
        assert_eq!(s.ball().pos, Vec2::new(40.0, 35.0));

        s.pointer_up();
        assert_eq!(s.pointer_move(200.0, 200.0), StepOutcome::Ignored);
    }

    #[test]
    fn test_bump_produces_haptic() {
        let mut s = session();
        s.set_mode(ControlMode::Drag);
        s.drain_cues();
        s.pointer_down(0.0, 0.0);
        assert_eq!(s.pointer_move(-40.0, 0.0), StepOutcome::Bumped);
        assert_eq!(s.drain_cues(), vec![Cue::Haptic(BUMP_HAPTIC)]);
    }

    #[test]
    fn test_reselecting_mode_is_noop() {
        let mut s = session();
        s.set_mode(ControlMode::Tilt);
        assert!(s.drain_cues().is_empty());
    }

    #[test]
    fn test_switching_mode_cancels_drag() {
        let mut s = session();
        s.set_mode(ControlMode::Drag);
        s.pointer_down(0.0, 0.0);
        s.set_mode(ControlMode::Tilt);
        s.set_mode(ControlMode::Drag);
        assert_eq!(s.pointer_move(10.0, 10.0), StepOutcome::Ignored);
    }

    #[test]
    fn test_goal_flow() {
        let mut s = session();
        s.state.ball.pos = Vec2::new(295.0, 295.0);
        s.set_mode(ControlMode::Drag);
        s.drain_cues();

        s.pointer_down(0.0, 0.0);
        assert_eq!(s.pointer_move(20.0, 20.0), StepOutcome::GoalReached);
        assert_eq!(s.success_count(), 1);
        let cues = s.drain_cues();
        assert!(cues.contains(&Cue::Haptic(GOAL_HAPTIC)));

        s.frame(1.6);
        assert_eq!(s.phase(), MazePhase::Running);
        assert_eq!(s.ball().pos, Vec2::splat(30.0));
        assert_eq!(s.drain_cues(), vec![Cue::Haptic(RESET_HAPTIC)]);
    }

    #[test]
    fn test_settings_apply_to_later_cues() {
        let mut s = session();
        s.set_settings(Settings {
            haptic_enabled: false,
            sound_enabled: false,
            ..Default::default()
        });
        s.reset_ball();
        assert!(s.drain_cues().is_empty());
    }

    #[test]
    fn test_regenerate_keeps_count() {
        let mut s = session();
        s.state.success_count = 4;
        s.regenerate(99);
        assert_eq!(s.success_count(), 4);
        assert_eq!(s.state().seed, 99);
    }
}
