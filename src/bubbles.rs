//! Bubble wrap sheet
//!
//! A sheet of randomly sized, slightly tinted bubbles. Popping is one-way;
//! popping the last bubble schedules a refill that [`BubbleSheet::tick`]
//! carries out after a short pause. The user can also refill at any time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::feedback::Trigger;

/// Bubbles per sheet (5x4 grid)
pub const DEFAULT_BUBBLE_COUNT: usize = 20;
pub const BUBBLE_MIN_SIZE: f32 = 70.0;
pub const BUBBLE_MAX_SIZE: f32 = 90.0;
/// Hue band (degrees) for the cyan-blue tint
pub const BUBBLE_MIN_HUE: f32 = 190.0;
pub const BUBBLE_MAX_HUE: f32 = 210.0;
/// Pause between popping the last bubble and the automatic refill
pub const REFILL_DELAY_SECS: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    /// Diameter (px)
    pub size: f32,
    pub hue: f32,
    pub popped: bool,
}

/// What a call to [`BubbleSheet::pop`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopOutcome {
    /// Unknown id or already popped
    Ignored,
    Popped,
    /// Popped the last bubble; a refill is now pending
    SheetComplete,
}

impl PopOutcome {
    pub fn trigger(self) -> Option<Trigger> {
        match self {
            PopOutcome::Ignored => None,
            PopOutcome::Popped | PopOutcome::SheetComplete => Some(Trigger::BubblePop),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleSheet {
    pub bubbles: Vec<Bubble>,
    /// Pops since the last refill
    pub popped_count: u32,
    /// Seed of the current sheet; refills advance it
    pub seed: u64,
    /// Countdown to the automatic refill, once every bubble is popped
    pub refill_in: Option<f32>,
}

impl BubbleSheet {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            bubbles: generate_bubbles(count, seed),
            popped_count: 0,
            seed,
            refill_in: None,
        }
    }

    pub fn pop(&mut self, id: u32) -> PopOutcome {
        let Some(bubble) = self.bubbles.iter_mut().find(|b| b.id == id) else {
            return PopOutcome::Ignored;
        };
        if bubble.popped {
            return PopOutcome::Ignored;
        }
        bubble.popped = true;
        self.popped_count += 1;

        if self.all_popped() {
            self.refill_in = Some(REFILL_DELAY_SECS);
            log::debug!("Bubble sheet complete, refilling in {}s", REFILL_DELAY_SECS);
            return PopOutcome::SheetComplete;
        }
        PopOutcome::Popped
    }

    pub fn all_popped(&self) -> bool {
        self.bubbles.iter().all(|b| b.popped)
    }

    /// User-requested refill
    pub fn reset(&mut self) -> Trigger {
        self.refill();
        Trigger::BubbleSheetReset
    }

    /// Run down a pending refill; returns its trigger when the sheet is refilled
    pub fn tick(&mut self, dt: f32) -> Option<Trigger> {
        let remaining = self.refill_in? - dt.max(0.0);
        if remaining > 0.0 {
            self.refill_in = Some(remaining);
            return None;
        }
        Some(self.reset())
    }

    /// Fresh sheet of the same size from the next seed, counter back to zero
    fn refill(&mut self) {
        let count = self.bubbles.len();
        self.seed = self.seed.wrapping_add(1);
        self.bubbles = generate_bubbles(count, self.seed);
        self.popped_count = 0;
        self.refill_in = None;
        log::debug!("Bubble sheet refilled ({} bubbles)", count);
    }
}

fn generate_bubbles(count: usize, seed: u64) -> Vec<Bubble> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count as u32)
        .map(|id| Bubble {
            id,
            size: rng.random_range(BUBBLE_MIN_SIZE..BUBBLE_MAX_SIZE),
            hue: rng.random_range(BUBBLE_MIN_HUE..BUBBLE_MAX_HUE),
            popped: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_generation() {
        let sheet = BubbleSheet::new(DEFAULT_BUBBLE_COUNT, 3);
        assert_eq!(sheet.bubbles.len(), 20);
        for (i, b) in sheet.bubbles.iter().enumerate() {
            assert_eq!(b.id, i as u32);
            assert!((BUBBLE_MIN_SIZE..=BUBBLE_MAX_SIZE).contains(&b.size));
            assert!((BUBBLE_MIN_HUE..=BUBBLE_MAX_HUE).contains(&b.hue));
            assert!(!b.popped);
        }
        assert_eq!(BubbleSheet::new(20, 3).bubbles, sheet.bubbles);
    }

    #[test]
    fn test_pop_once() {
        let mut sheet = BubbleSheet::new(3, 1);
        assert_eq!(sheet.pop(1), PopOutcome::Popped);
        assert_eq!(sheet.pop(1), PopOutcome::Ignored);
        assert_eq!(sheet.pop(42), PopOutcome::Ignored);
        assert_eq!(sheet.popped_count, 1);
        assert!(!sheet.all_popped());
        assert_eq!(sheet.refill_in, None);
        assert_eq!(PopOutcome::Ignored.trigger(), None);
        assert_eq!(PopOutcome::Popped.trigger(), Some(Trigger::BubblePop));
    }

    #[test]
    fn test_last_pop_completes_sheet_and_refills() {
        let mut sheet = BubbleSheet::new(4, 1);
        for id in 0..3 {
            assert_eq!(sheet.pop(id), PopOutcome::Popped);
        }
        assert_eq!(sheet.tick(10.0), None);
        assert_eq!(sheet.pop(3), PopOutcome::SheetComplete);
        assert_eq!(PopOutcome::SheetComplete.trigger(), Some(Trigger::BubblePop));
        assert!(sheet.all_popped());

        assert_eq!(sheet.tick(0.25), None);
        assert!(sheet.all_popped());
        assert_eq!(sheet.tick(0.3), Some(Trigger::BubbleSheetReset));
        assert_eq!(sheet.bubbles.len(), 4);
        assert_eq!(sheet.popped_count, 0);
        assert_eq!(sheet.refill_in, None);
        assert!(!sheet.all_popped());
        assert_eq!(sheet.seed, 2);
    }

    #[test]
    fn test_user_reset_mid_sheet() {
        let mut sheet = BubbleSheet::new(DEFAULT_BUBBLE_COUNT, 7);
        sheet.pop(0);
        sheet.pop(5);
        assert_eq!(sheet.reset(), Trigger::BubbleSheetReset);
        assert_eq!(sheet.popped_count, 0);
        assert!(sheet.bubbles.iter().all(|b| !b.popped));
        assert_eq!(sheet.bubbles, BubbleSheet::new(DEFAULT_BUBBLE_COUNT, 8).bubbles);
    }
}
