//! Stress Ball - small stress relief toys for the browser
//!
//! Core modules:
//! - `sim`: Labyrinth simulation (walls, ball, goal, step function)
//! - `input`: Tilt and drag input reduced to per-step deltas
//! - `session`: Control mode state machine driving the simulation
//! - `settings`: Theme/sound/haptic preferences
//! - `feedback`: Haptic patterns and synthesized tones for sim events
//! - `bubbles`: Bubble wrap sheet
//! - `tuning`: Data-driven arena configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod bubbles;
pub mod feedback;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{ControlMode, LabyrinthSession};
pub use settings::{Settings, Theme};
pub use tuning::MazeTuning;

/// Labyrinth configuration constants
pub mod consts {
    /// Nominal frame length used when the host has no timestamp yet (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Arena side length (px)
    pub const ARENA_SIZE: f32 = 400.0;
    /// Boundary wall thickness
    pub const WALL_THICKNESS: f32 = 15.0;

    /// Ball bounding square side
    pub const BALL_SIZE: f32 = 30.0;
    /// Ball reset position (top-left of its square)
    pub const BALL_START: f32 = 30.0;

    /// Goal square side
    pub const GOAL_SIZE: f32 = 40.0;
    /// Goal top-left sits this far in from the far corner
    pub const GOAL_INSET: f32 = 70.0;

    /// Interior walls attempted per layout (rejected ones are not retried)
    pub const INTERIOR_WALL_ATTEMPTS: u32 = 8;
    /// Upper bound accepted from tuning files
    pub const MAX_INTERIOR_WALL_ATTEMPTS: u32 = 64;
    pub const INTERIOR_WALL_THICKNESS: f32 = 10.0;
    pub const INTERIOR_WALL_MIN_LEN: f32 = 80.0;
    pub const INTERIOR_WALL_MAX_LEN: f32 = 200.0;
    /// Interior wall origins are drawn from [margin, size - margin - span_trim)
    pub const INTERIOR_WALL_MARGIN: f32 = 20.0;
    pub const INTERIOR_WALL_SPAN_TRIM: f32 = 100.0;

    /// Start zone kept free of interior walls
    pub const START_ZONE_ORIGIN: f32 = 10.0;
    pub const START_ZONE_SIZE: f32 = 60.0;
    /// Padding around the goal kept free of interior walls
    pub const GOAL_ZONE_PADDING: f32 = 20.0;

    /// Weight of a new tilt reading in the exponential filter
    pub const TILT_SMOOTHING: f32 = 0.3;
    /// Smoothed tilt degrees per pixel of movement per frame
    pub const TILT_DIVISOR: f32 = 20.0;
    /// Pointer movement to ball movement ratio in drag mode
    pub const DRAG_SCALE: f32 = 0.5;

    /// Celebration length after reaching the goal (seconds)
    pub const CELEBRATION_SECS: f32 = 1.5;
}
