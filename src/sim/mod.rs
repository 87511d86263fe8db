//! Labyrinth simulation module
//!
//! All maze logic lives here. This module must stay pure:
//! - Seeded RNG only (same seed, same walls)
//! - One ball, moved only by `step`
//! - No DOM, audio or platform dependencies

pub mod collision;
pub mod layout;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ball_goal_collision, ball_wall_collision, clamp_to_arena, first_wall_hit};
pub use layout::{blocks_start_or_goal, boundary_walls, generate_walls};
pub use rect::Rect;
pub use state::{Ball, MazeEvent, MazePhase, MazeState, Wall, WallKind};
pub use tick::{StepOutcome, TickInput, step, tick};
