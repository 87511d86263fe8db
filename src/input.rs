//! Input sources for the labyrinth
//!
//! Tilt and drag both reduce to a movement delta handed to
//! [`crate::sim::step`], so the simulation never knows which one is active.

use glam::Vec2;

use crate::tuning::MazeTuning;

/// A producer of ball movement deltas
pub trait DeltaSource {
    /// Take the movement accumulated since the last call (zero if none)
    fn take_delta(&mut self) -> Vec2;

    /// Drop any in-progress gesture or accumulated state
    fn reset(&mut self);
}

/// Exponential smoothing step for one tilt axis
///
/// A missing or non-finite reading, or a non-finite result, settles the axis
/// at rest instead of poisoning later frames.
#[inline]
pub fn smooth_axis(old: f32, reading: Option<f32>, weight: f32) -> f32 {
    match reading {
        Some(r) if r.is_finite() => {
            let next = old * (1.0 - weight) + r * weight;
            if next.is_finite() { next } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Device orientation input
///
/// `beta` is front-back tilt (drives y), `gamma` is left-right tilt
/// (drives x), both in degrees.
#[derive(Debug, Clone)]
pub struct TiltInput {
    beta: f32,
    gamma: f32,
    smoothing: f32,
    divisor: f32,
}

impl TiltInput {
    pub fn new(smoothing: f32, divisor: f32) -> Self {
        Self {
            beta: 0.0,
            gamma: 0.0,
            smoothing,
            divisor,
        }
    }

    pub fn from_tuning(tuning: &MazeTuning) -> Self {
        Self::new(tuning.tilt_smoothing, tuning.tilt_divisor)
    }

    /// Fold in a new orientation reading
    pub fn observe(&mut self, beta: Option<f32>, gamma: Option<f32>) {
        self.beta = smooth_axis(self.beta, beta, self.smoothing);
        self.gamma = smooth_axis(self.gamma, gamma, self.smoothing);
    }

    /// Smoothed (beta, gamma)
    pub fn angles(&self) -> (f32, f32) {
        (self.beta, self.gamma)
    }
}

impl DeltaSource for TiltInput {
    /// Continuous: the same smoothed tilt keeps rolling the ball every frame
    fn take_delta(&mut self) -> Vec2 {
        Vec2::new(self.gamma, self.beta) / self.divisor
    }

    fn reset(&mut self) {
        self.beta = 0.0;
        self.gamma = 0.0;
    }
}

/// Pointer/touch drag input
#[derive(Debug, Clone)]
pub struct DragInput {
    last: Option<Vec2>,
    pending: Vec2,
    scale: f32,
}

impl DragInput {
    pub fn new(scale: f32) -> Self {
        Self {
            last: None,
            pending: Vec2::ZERO,
            scale,
        }
    }

    pub fn from_tuning(tuning: &MazeTuning) -> Self {
        Self::new(tuning.drag_scale)
    }

    /// Pointer went down at `pos` (container-local)
    pub fn press(&mut self, pos: Vec2) {
        self.last = Some(pos);
    }

    /// Pointer moved to `pos`; returns the scaled delta if a drag is active
    pub fn drag_to(&mut self, pos: Vec2) -> Option<Vec2> {
        let last = self.last?;
        let delta = (pos - last) * self.scale;
        self.last = Some(pos);
        self.pending += delta;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.last = None;
    }
}

impl DeltaSource for DragInput {
    fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }

    fn reset(&mut self) {
        self.last = None;
        self.pending = Vec2::ZERO;
    }
}
