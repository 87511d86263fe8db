//! Collision queries for the labyrinth
//!
//! Everything is axis-aligned: the ball is a square, walls and goal are
//! rectangles. A move is either accepted whole or rejected whole, so there is
//! no penetration depth or normal to compute.

use glam::Vec2;

use super::rect::Rect;
use super::state::Wall;

/// Clamp a ball position so its square stays inside `[0, arena_size]`
#[inline]
pub fn clamp_to_arena(pos: Vec2, ball_size: f32, arena_size: f32) -> Vec2 {
    let max = (arena_size - ball_size).max(0.0);
    pos.clamp(Vec2::ZERO, Vec2::splat(max))
}

/// Index of the first wall overlapping `rect`, if any
pub fn first_wall_hit(rect: &Rect, walls: &[Wall]) -> Option<usize> {
    walls.iter().position(|wall| rect.overlaps(&wall.rect))
}

/// Check whether a ball square overlaps any wall
#[inline]
pub fn ball_wall_collision(ball: &Rect, walls: &[Wall]) -> bool {
    first_wall_hit(ball, walls).is_some()
}

/// Check whether a ball square touches the goal
#[inline]
pub fn ball_goal_collision(ball: &Rect, goal: &Rect) -> bool {
    ball.overlaps(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_arena() {
        assert_eq!(
            clamp_to_arena(Vec2::new(-5.0, 500.0), 30.0, 400.0),
            Vec2::new(0.0, 370.0)
        );
        assert_eq!(
            clamp_to_arena(Vec2::new(100.0, 200.0), 30.0, 400.0),
            Vec2::new(100.0, 200.0)
        );
    }

    #[test]
    fn test_first_wall_hit() {
        let walls = [
            Wall::boundary(Rect::new(0.0, 0.0, 400.0, 15.0)),
            Wall::interior(Rect::new(100.0, 100.0, 80.0, 10.0)),
        ];
        let ball = Rect::square(Vec2::new(90.0, 85.0), 30.0);
        assert_eq!(first_wall_hit(&ball, &walls), Some(1));

        let clear = Rect::square(Vec2::new(30.0, 30.0), 30.0);
        assert_eq!(first_wall_hit(&clear, &walls), None);
        assert!(!ball_wall_collision(&clear, &walls));
    }

    #[test]
    fn test_ball_resting_on_wall_edge_is_clear() {
        let walls = [Wall::interior(Rect::new(100.0, 100.0, 80.0, 10.0))];
        // Bottom of the ball exactly on the wall's top edge
        let ball = Rect::square(Vec2::new(110.0, 70.0), 30.0);
        assert!(!ball_wall_collision(&ball, &walls));
    }

    #[test]
    fn test_goal_collision() {
        let goal = Rect::new(330.0, 330.0, 40.0, 40.0);
        assert!(ball_goal_collision(
            &Rect::square(Vec2::new(305.0, 305.0), 30.0),
            &goal
        ));
        assert!(!ball_goal_collision(
            &Rect::square(Vec2::new(300.0, 300.0), 30.0),
            &goal
        ));
    }
}
