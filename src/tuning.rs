//! Data-driven labyrinth configuration
//!
//! Every field has a default from [`crate::consts`], so a tuning file only
//! needs to name what it changes.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Arena geometry and input scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    /// Side of the square arena (px)
    pub arena_size: f32,
    pub wall_thickness: f32,
    pub ball_size: f32,
    /// Ball reset position (top-left)
    pub ball_start: Vec2,
    pub goal_size: f32,
    /// Distance from the far corner to the goal's top-left
    pub goal_inset: f32,
    pub interior_wall_attempts: u32,
    pub interior_wall_thickness: f32,
    pub interior_wall_min_len: f32,
    pub interior_wall_max_len: f32,
    pub tilt_smoothing: f32,
    pub tilt_divisor: f32,
    pub drag_scale: f32,
    pub celebration_secs: f32,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            arena_size: ARENA_SIZE,
            wall_thickness: WALL_THICKNESS,
            ball_size: BALL_SIZE,
            ball_start: Vec2::splat(BALL_START),
            goal_size: GOAL_SIZE,
            goal_inset: GOAL_INSET,
            interior_wall_attempts: INTERIOR_WALL_ATTEMPTS,
            interior_wall_thickness: INTERIOR_WALL_THICKNESS,
            interior_wall_min_len: INTERIOR_WALL_MIN_LEN,
            interior_wall_max_len: INTERIOR_WALL_MAX_LEN,
            tilt_smoothing: TILT_SMOOTHING,
            tilt_divisor: TILT_DIVISOR,
            drag_scale: DRAG_SCALE,
            celebration_secs: CELEBRATION_SECS,
        }
    }
}

impl MazeTuning {
    /// Tuning for an arena of the given side, everything else default
    pub fn with_arena_size(arena_size: f32) -> Self {
        Self {
            arena_size,
            ..Self::default()
        }
    }

    /// Parse tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("parse maze tuning")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read tuning {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("tuning {}", path.display()))
    }

    /// Ball bounding square at its reset position
    pub fn start_rect(&self) -> Rect {
        Rect::square(self.ball_start, self.ball_size)
    }

    /// Goal square near the corner opposite the start
    pub fn goal_rect(&self) -> Rect {
        let origin = self.arena_size - self.goal_inset;
        Rect::square(Vec2::splat(origin), self.goal_size)
    }

    /// Region around the start that interior walls must leave open
    pub fn start_zone(&self) -> Rect {
        Rect::square(Vec2::splat(START_ZONE_ORIGIN), START_ZONE_SIZE)
    }

    /// Region around the goal that interior walls must leave open
    pub fn goal_zone(&self) -> Rect {
        self.goal_rect().expand(GOAL_ZONE_PADDING)
    }

    /// Check geometry once, at configuration time
    ///
    /// The simulation assumes these hold and never re-checks them per step.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("arena_size", self.arena_size),
            ("wall_thickness", self.wall_thickness),
            ("ball_size", self.ball_size),
            ("goal_size", self.goal_size),
            ("interior_wall_thickness", self.interior_wall_thickness),
            ("interior_wall_min_len", self.interior_wall_min_len),
            ("interior_wall_max_len", self.interior_wall_max_len),
            ("tilt_divisor", self.tilt_divisor),
            ("drag_scale", self.drag_scale),
        ];
        for (name, value) in positive {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be positive and finite, got {value}"
            );
        }
        ensure!(
            self.interior_wall_max_len > self.interior_wall_min_len,
            "interior_wall_max_len ({}) must exceed interior_wall_min_len ({})",
            self.interior_wall_max_len,
            self.interior_wall_min_len
        );
        ensure!(
            self.interior_wall_attempts <= MAX_INTERIOR_WALL_ATTEMPTS,
            "interior_wall_attempts must be at most {MAX_INTERIOR_WALL_ATTEMPTS}, got {}",
            self.interior_wall_attempts
        );
        ensure!(
            (0.0..=1.0).contains(&self.tilt_smoothing),
            "tilt_smoothing must be within [0, 1], got {}",
            self.tilt_smoothing
        );
        ensure!(
            self.celebration_secs.is_finite() && self.celebration_secs >= 0.0,
            "celebration_secs must be non-negative, got {}",
            self.celebration_secs
        );
        ensure!(
            self.arena_size > INTERIOR_WALL_MARGIN + INTERIOR_WALL_SPAN_TRIM,
            "arena_size {} too small for interior walls",
            self.arena_size
        );

        let playable = Rect::new(
            self.wall_thickness,
            self.wall_thickness,
            self.arena_size - 2.0 * self.wall_thickness,
            self.arena_size - 2.0 * self.wall_thickness,
        );
        let start = self.start_rect();
        let goal = self.goal_rect();
        ensure!(
            self.ball_start.is_finite() && playable.contains_rect(&start),
            "ball start {:?} (size {}) must sit inside the walls",
            self.ball_start,
            self.ball_size
        );
        ensure!(
            playable.contains_rect(&goal),
            "goal {:?} must sit inside the walls",
            goal
        );
        ensure!(!start.overlaps(&goal), "ball start overlaps the goal");
        ensure!(
            self.start_zone().contains_rect(&start),
            "ball start {:?} must lie inside the protected start zone",
            self.ball_start
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        MazeTuning::default().validate().unwrap();
    }

    #[test]
    fn test_default_goal_placement() {
        let tuning = MazeTuning::default();
        assert_eq!(tuning.goal_rect(), Rect::new(330.0, 330.0, 40.0, 40.0));
        assert_eq!(tuning.goal_zone(), Rect::new(310.0, 310.0, 80.0, 80.0));
    }

    #[test]
    fn test_rejects_degenerate_arena() {
        assert!(MazeTuning::with_arena_size(0.0).validate().is_err());
        assert!(MazeTuning::with_arena_size(-50.0).validate().is_err());
        assert!(MazeTuning::with_arena_size(f32::NAN).validate().is_err());
        // No room left for interior walls
        assert!(MazeTuning::with_arena_size(110.0).validate().is_err());
    }

    #[test]
    fn test_rejects_ball_inside_boundary_wall() {
        let tuning = MazeTuning {
            wall_thickness: 40.0,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("ball start"));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let tuning = MazeTuning::from_json(r#"{ "arena_size": 600.0 }"#).unwrap();
        assert_eq!(tuning.arena_size, 600.0);
        assert_eq!(tuning.ball_size, BALL_SIZE);
        assert_eq!(tuning.goal_rect().x, 530.0);
    }

    #[test]
    fn test_from_json_validates() {
        assert!(MazeTuning::from_json(r#"{ "ball_size": 0.0 }"#).is_err());
        assert!(MazeTuning::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_rejects_overflowing_wall_length() {
        // Out-of-range f32 parses to inf
        let err = MazeTuning::from_json(r#"{ "interior_wall_max_len": 1e300 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("interior_wall_max_len"));
    }

    #[test]
    fn test_from_json_caps_wall_attempts() {
        let err = MazeTuning::from_json(r#"{ "interior_wall_attempts": 4294967295 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("interior_wall_attempts"));

        let tuning = MazeTuning::from_json(r#"{ "interior_wall_attempts": 64 }"#).unwrap();
        assert_eq!(tuning.interior_wall_attempts, MAX_INTERIOR_WALL_ATTEMPTS);
    }
}
