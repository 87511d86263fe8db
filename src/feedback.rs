//! Haptic and audio feedback cues
//!
//! Toys report what happened as a [`Trigger`]; this module decides which
//! vibration patterns and tones to play, honoring the user's settings. Cues
//! are plain data so the browser layer only has to play them.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::MazeEvent;

/// Something worth feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Ball move rejected by a wall
    Bump,
    /// Ball reached the labyrinth goal
    GoalReached,
    /// Ball returned to start
    BallReset,
    /// Labyrinth control mode switched
    ModeChanged,
    /// A bubble popped
    BubblePop,
    /// Bubble sheet reset by the user
    BubbleSheetReset,
    /// Haptics just turned on (test buzz)
    HapticEnabled,
}

impl Trigger {
    /// Labyrinth events that have feedback
    pub fn from_maze_event(event: &MazeEvent) -> Option<Self> {
        match event {
            MazeEvent::Bump => Some(Trigger::Bump),
            MazeEvent::GoalReached { .. } => Some(Trigger::GoalReached),
            MazeEvent::BallReset => Some(Trigger::BallReset),
            MazeEvent::Moved { .. } | MazeEvent::WallsRegenerated => None,
        }
    }
}

/// Vibration pattern: alternating on/off durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HapticPattern(pub &'static [u32]);

/// Frequency ramp shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepCurve {
    Linear,
    Exponential,
}

/// One oscillator sweeping from `from_hz` to `to_hz` over the tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sweep {
    pub from_hz: f32,
    pub to_hz: f32,
}

impl Sweep {
    pub const fn steady(hz: f32) -> Self {
        Self {
            from_hz: hz,
            to_hz: hz,
        }
    }
}

/// A short synthesized sine tone
///
/// Gain starts at `peak_gain` (or ramps linearly up to it over
/// `attack_secs`) then decays exponentially to `end_gain` at `duration_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub voices: &'static [Sweep],
    pub curve: SweepCurve,
    pub attack_secs: f32,
    pub peak_gain: f32,
    pub end_gain: f32,
    pub duration_secs: f32,
}

/// A single thing to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Cue {
    Haptic(HapticPattern),
    Tone(Tone),
}

pub const BUMP_HAPTIC: HapticPattern = HapticPattern(&[10]);
pub const GOAL_HAPTIC: HapticPattern = HapticPattern(&[50, 30, 50, 30, 50]);
pub const RESET_HAPTIC: HapticPattern = HapticPattern(&[30]);
pub const POP_HAPTIC: HapticPattern = HapticPattern(&[30]);
pub const SHEET_RESET_HAPTIC: HapticPattern = HapticPattern(&[50, 30, 50]);
pub const HAPTIC_TEST: HapticPattern = HapticPattern(&[50]);

/// C5 + E5 chime
pub const GOAL_TONE: Tone = Tone {
    voices: &[Sweep::steady(523.25), Sweep::steady(659.25)],
    curve: SweepCurve::Linear,
    attack_secs: 0.1,
    peak_gain: 0.1,
    end_gain: 0.001,
    duration_secs: 0.5,
};

/// Rising blip
pub const MODE_TONE: Tone = Tone {
    voices: &[Sweep {
        from_hz: 400.0,
        to_hz: 600.0,
    }],
    curve: SweepCurve::Linear,
    attack_secs: 0.0,
    peak_gain: 0.05,
    end_gain: 0.001,
    duration_secs: 0.1,
};

/// Falling thump
pub const POP_TONE: Tone = Tone {
    voices: &[Sweep {
        from_hz: 200.0,
        to_hz: 50.0,
    }],
    curve: SweepCurve::Exponential,
    attack_secs: 0.0,
    peak_gain: 0.2,
    end_gain: 0.01,
    duration_secs: 0.1,
};

/// Cues for a trigger, filtered by settings
pub fn cues(trigger: Trigger, settings: &Settings) -> Vec<Cue> {
    let (haptic, tone) = match trigger {
        Trigger::Bump => (Some(BUMP_HAPTIC), None),
        Trigger::GoalReached => (Some(GOAL_HAPTIC), Some(GOAL_TONE)),
        Trigger::BallReset => (Some(RESET_HAPTIC), None),
        Trigger::ModeChanged => (None, Some(MODE_TONE)),
        Trigger::BubblePop => (Some(POP_HAPTIC), Some(POP_TONE)),
        Trigger::BubbleSheetReset => (Some(SHEET_RESET_HAPTIC), None),
        Trigger::HapticEnabled => (Some(HAPTIC_TEST), None),
    };

    let mut out = Vec::with_capacity(2);
    if let Some(pattern) = haptic.filter(|_| settings.haptic_enabled) {
        out.push(Cue::Haptic(pattern));
    }
    if let Some(tone) = tone.filter(|_| settings.sound_enabled) {
        out.push(Cue::Tone(tone));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_on() -> Settings {
        Settings {
            sound_enabled: true,
            haptic_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_goal_gets_chime_and_buzz() {
        let out = cues(Trigger::GoalReached, &all_on());
        assert_eq!(out, vec![Cue::Haptic(GOAL_HAPTIC), Cue::Tone(GOAL_TONE)]);
    }

    #[test]
    fn test_settings_filter_cues() {
        let quiet = Settings {
            sound_enabled: false,
            haptic_enabled: false,
            ..Default::default()
        };
        assert!(cues(Trigger::GoalReached, &quiet).is_empty());

        // Defaults: haptics on, sound off
        let out = cues(Trigger::BubblePop, &Settings::default());
        assert_eq!(out, vec![Cue::Haptic(POP_HAPTIC)]);
        assert!(cues(Trigger::ModeChanged, &Settings::default()).is_empty());
    }

    #[test]
    fn test_sheet_reset_buzzes() {
        assert_eq!(
            cues(Trigger::BubbleSheetReset, &all_on()),
            vec![Cue::Haptic(SHEET_RESET_HAPTIC)]
        );
    }

    #[test]
    fn test_maze_event_triggers() {
        assert_eq!(
            Trigger::from_maze_event(&MazeEvent::Bump),
            Some(Trigger::Bump)
        );
        assert_eq!(
            Trigger::from_maze_event(&MazeEvent::GoalReached { count: 2 }),
            Some(Trigger::GoalReached)
        );
        assert_eq!(
            Trigger::from_maze_event(&MazeEvent::Moved {
                pos: glam::Vec2::ONE
            }),
            None
        );
    }
}
