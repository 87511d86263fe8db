//! Labyrinth state and core simulation types

use anyhow::{Context, Result};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::generate_walls;
use super::rect::Rect;
use crate::tuning::MazeTuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MazePhase {
    /// Ball responds to input
    Running,
    /// Goal reached; ball frozen until the countdown ends and it resets
    Celebrating { remaining: f32 },
}

/// Wall origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Lines an arena edge
    Boundary,
    /// Randomly placed obstacle
    Interior,
}

/// An immutable wall rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub kind: WallKind,
    pub rect: Rect,
}

impl Wall {
    pub fn boundary(rect: Rect) -> Self {
        Self {
            kind: WallKind::Boundary,
            rect,
        }
    }

    pub fn interior(rect: Rect) -> Self {
        Self {
            kind: WallKind::Interior,
            rect,
        }
    }
}

/// The ball, tracked by the top-left of its bounding square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Side effects of simulation calls, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MazeEvent {
    /// Ball committed a move to `pos`
    Moved { pos: Vec2 },
    /// Move rejected by a wall
    Bump,
    /// Ball touched the goal; `count` is the new success total
    GoalReached { count: u32 },
    /// Ball returned to its start position
    BallReset,
    /// Walls were re-rolled
    WallsRegenerated,
}

/// Complete labyrinth state (deterministic for a given seed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub tuning: MazeTuning,
    /// Layout seed
    pub seed: u64,
    pub ball: Ball,
    /// Boundary walls first, then interior walls
    pub walls: Vec<Wall>,
    pub goal: Rect,
    pub phase: MazePhase,
    /// Goals reached this session
    pub success_count: u32,
    /// Session time (seconds)
    pub elapsed_secs: f64,
    /// Pending side effects
    #[serde(skip)]
    pub events: Vec<MazeEvent>,
}

impl MazeState {
    /// Validate the tuning and lay out a fresh arena
    pub fn new(tuning: MazeTuning, seed: u64) -> Result<Self> {
        tuning.validate().context("invalid maze tuning")?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let walls = generate_walls(&tuning, &mut rng);
        log::info!(
            "Labyrinth {}px seed {}: {} walls",
            tuning.arena_size,
            seed,
            walls.len()
        );

        Ok(Self {
            ball: Ball::new(tuning.ball_start, tuning.ball_size),
            goal: tuning.goal_rect(),
            tuning,
            seed,
            walls,
            phase: MazePhase::Running,
            success_count: 0,
            elapsed_secs: 0.0,
            events: Vec::new(),
        })
    }

    /// Re-roll the walls with a new seed and put the ball back at the start
    ///
    /// The success counter and session time carry over.
    pub fn regenerate(&mut self, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
        self.walls = generate_walls(&self.tuning, &mut rng);
        self.events.push(MazeEvent::WallsRegenerated);
        self.reset_ball();
    }

    /// Return the ball to its start position, cancelling any celebration
    pub fn reset_ball(&mut self) {
        self.ball.pos = self.tuning.ball_start;
        self.phase = MazePhase::Running;
        self.events.push(MazeEvent::BallReset);
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.phase, MazePhase::Celebrating { .. })
    }

    /// Whole seconds spent in the session
    pub fn time_spent_secs(&self) -> u64 {
        self.elapsed_secs.floor() as u64
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<MazeEvent> {
        std::mem::take(&mut self.events)
    }
}
