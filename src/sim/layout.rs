//! Wall layout generation
//!
//! Four boundary walls line the arena, then a fixed number of interior walls
//! are attempted. Candidates that would cover the start or the goal are
//! dropped rather than retried, so a layout usually ends up with fewer
//! interior walls than attempts.

use rand::Rng;

use super::rect::Rect;
use super::state::Wall;
use crate::consts::{INTERIOR_WALL_MARGIN, INTERIOR_WALL_SPAN_TRIM};
use crate::tuning::MazeTuning;

/// The four walls lining the arena edges (top, left, right, bottom)
pub fn boundary_walls(size: f32, thickness: f32) -> [Wall; 4] {
    [
        Wall::boundary(Rect::new(0.0, 0.0, size, thickness)),
        Wall::boundary(Rect::new(0.0, 0.0, thickness, size)),
        Wall::boundary(Rect::new(size - thickness, 0.0, thickness, size)),
        Wall::boundary(Rect::new(0.0, size - thickness, size, thickness)),
    ]
}

/// Whether a candidate wall would cover the start or goal zone
pub fn blocks_start_or_goal(tuning: &MazeTuning, candidate: &Rect) -> bool {
    candidate.overlaps(&tuning.start_zone()) || candidate.overlaps(&tuning.goal_zone())
}

/// Roll one interior wall candidate
fn random_interior_wall<R: Rng>(tuning: &MazeTuning, rng: &mut R) -> Rect {
    let span = tuning.arena_size - INTERIOR_WALL_SPAN_TRIM;
    let horizontal = rng.random_bool(0.5);
    let x = rng.random::<f32>() * span + INTERIOR_WALL_MARGIN;
    let y = rng.random::<f32>() * span + INTERIOR_WALL_MARGIN;
    let len = rng.random_range(tuning.interior_wall_min_len..tuning.interior_wall_max_len);
    let thickness = tuning.interior_wall_thickness;

    if horizontal {
        Rect::new(x, y, len, thickness)
    } else {
        Rect::new(x, y, thickness, len)
    }
}

/// Generate a full layout: boundary walls first, then surviving interior walls
pub fn generate_walls<R: Rng>(tuning: &MazeTuning, rng: &mut R) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(4 + tuning.interior_wall_attempts as usize);
    walls.extend(boundary_walls(tuning.arena_size, tuning.wall_thickness));

    let mut rejected = 0;
    for _ in 0..tuning.interior_wall_attempts {
        let candidate = random_interior_wall(tuning, rng);
        if blocks_start_or_goal(tuning, &candidate) {
            rejected += 1;
            continue;
        }
        walls.push(Wall::interior(candidate));
    }

    if rejected > 0 {
        log::debug!(
            "Dropped {} of {} interior walls covering start/goal",
            rejected,
            tuning.interior_wall_attempts
        );
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WallKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_boundary_walls_line_edges() {
        let walls = boundary_walls(400.0, 15.0);
        assert_eq!(walls[0].rect, Rect::new(0.0, 0.0, 400.0, 15.0));
        assert_eq!(walls[1].rect, Rect::new(0.0, 0.0, 15.0, 400.0));
        assert_eq!(walls[2].rect, Rect::new(385.0, 0.0, 15.0, 400.0));
        assert_eq!(walls[3].rect, Rect::new(0.0, 385.0, 400.0, 15.0));
        assert!(walls.iter().all(|w| w.kind == WallKind::Boundary));
    }

    #[test]
    fn test_blocks_start_or_goal() {
        let tuning = MazeTuning::default();
        assert!(blocks_start_or_goal(&tuning, &Rect::new(50.0, 20.0, 10.0, 100.0)));
        assert!(blocks_start_or_goal(&tuning, &Rect::new(300.0, 320.0, 80.0, 10.0)));
        assert!(!blocks_start_or_goal(&tuning, &Rect::new(100.0, 100.0, 80.0, 10.0)));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let tuning = MazeTuning::default();
        let a = generate_walls(&tuning, &mut Pcg32::seed_from_u64(42));
        let b = generate_walls(&tuning, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_interior_wall_shape() {
        let tuning = MazeTuning::default();
        for seed in 0..50 {
            let walls = generate_walls(&tuning, &mut Pcg32::seed_from_u64(seed));
            for wall in walls.iter().filter(|w| w.kind == WallKind::Interior) {
                let r = wall.rect;
                let (long, short) = if r.width > r.height {
                    (r.width, r.height)
                } else {
                    (r.height, r.width)
                };
                assert_eq!(short, 10.0);
                assert!((80.0..=200.0).contains(&long));
                assert!(r.x >= 20.0 && r.x <= 320.0);
                assert!(r.y >= 20.0 && r.y <= 320.0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_interior_walls_avoid_start_and_goal(seed in any::<u64>(), size in 200.0f32..900.0) {
            let tuning = MazeTuning::with_arena_size(size);
            let walls = generate_walls(&tuning, &mut Pcg32::seed_from_u64(seed));
            let interior: Vec<_> = walls.iter().filter(|w| w.kind == WallKind::Interior).collect();
            prop_assert!(interior.len() <= tuning.interior_wall_attempts as usize);
            for wall in interior {
                prop_assert!(!wall.rect.overlaps(&tuning.start_zone()));
                prop_assert!(!wall.rect.overlaps(&tuning.goal_zone()));
            }
        }
    }
}
