//! Ball stepping and the per-frame tick
//!
//! `step` is the single place the ball moves. Tilt input reaches it once per
//! frame through `tick`; drag input calls it directly from pointer events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ball_goal_collision, ball_wall_collision, clamp_to_arena};
use super::rect::Rect;
use super::state::{MazeEvent, MazePhase, MazeState};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement produced by the active input source this frame
    pub delta: Vec2,
}

/// What a call to [`step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Zero/non-finite delta, or the ball is frozen while celebrating
    Ignored,
    /// Candidate overlapped a wall; ball stays put
    Bumped,
    Moved,
    /// Moved onto the goal; celebration started
    GoalReached,
}

/// Try to move the ball by `delta`
///
/// The candidate is clamped to the arena and rejected whole if it overlaps
/// any wall. The ball never slides along a wall.
pub fn step(state: &mut MazeState, delta: Vec2) -> StepOutcome {
    if state.is_celebrating() || !delta.is_finite() || delta == Vec2::ZERO {
        return StepOutcome::Ignored;
    }

    let candidate = clamp_to_arena(
        state.ball.pos + delta,
        state.ball.size,
        state.tuning.arena_size,
    );
    if candidate == state.ball.pos {
        // Pinned against the arena edge; nothing changes and nothing was hit
        return StepOutcome::Ignored;
    }

    let candidate_rect = Rect::square(candidate, state.ball.size);
    if ball_wall_collision(&candidate_rect, &state.walls) {
        state.events.push(MazeEvent::Bump);
        return StepOutcome::Bumped;
    }

    state.ball.pos = candidate;
    state.events.push(MazeEvent::Moved { pos: candidate });

    if ball_goal_collision(&candidate_rect, &state.goal) {
        state.success_count += 1;
        state.phase = MazePhase::Celebrating {
            remaining: state.tuning.celebration_secs,
        };
        state.events.push(MazeEvent::GoalReached {
            count: state.success_count,
        });
        log::info!("Goal reached ({} total)", state.success_count);
        return StepOutcome::GoalReached;
    }

    StepOutcome::Moved
}

/// Advance the labyrinth by one frame
pub fn tick(state: &mut MazeState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.elapsed_secs += dt as f64;

    if let MazePhase::Celebrating { remaining } = state.phase {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.reset_ball();
        } else {
            state.phase = MazePhase::Celebrating { remaining };
        }
        return;
    }

    step(state, input.delta);
}
