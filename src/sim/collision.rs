//! Collision predicates
//!
//! The avatar is a circle at a fixed x; obstacles are full-height columns
//! with a rectangular gap. The circle is tested by its bounding extents, so a
//! hit is any horizontal overlap with the column while the circle pokes
//! above or below the gap.

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Which world boundary the avatar touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Ceiling,
    Ground,
}

/// Horizontal overlap between the avatar's extent and the obstacle column
#[inline]
pub fn overlaps_column(avatar_x: f32, radius: f32, obstacle: &Obstacle, width: f32) -> bool {
    avatar_x + radius > obstacle.x && avatar_x - radius < obstacle.right(width)
}

/// True if the avatar's vertical extent leaves the gap
#[inline]
pub fn outside_gap(y: f32, radius: f32, obstacle: &Obstacle, gap_height: f32) -> bool {
    y - radius < obstacle.gap_top(gap_height) || y + radius > obstacle.gap_bottom(gap_height)
}

/// Full avatar-vs-obstacle test
pub fn hits_obstacle(y: f32, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    overlaps_column(tuning.avatar_x, tuning.avatar_radius, obstacle, tuning.obstacle_width)
        && outside_gap(y, tuning.avatar_radius, obstacle, tuning.gap_height)
}

/// True once the obstacle's trailing edge has passed the avatar's leading edge
#[inline]
pub fn cleared(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.right(tuning.obstacle_width) < tuning.avatar_x + tuning.avatar_radius
}

/// Check the ceiling first, then the ground band
pub fn boundary_contact(y: f32, tuning: &Tuning) -> Option<Boundary> {
    if y - tuning.avatar_radius <= 0.0 {
        Some(Boundary::Ceiling)
    } else if y + tuning.avatar_radius >= tuning.ground_y() {
        Some(Boundary::Ground)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_at_avatar(t: &Tuning, gap_center: f32) -> Obstacle {
        // Column centered on the avatar
        Obstacle::new(t.avatar_x - t.obstacle_width / 2.0, gap_center)
    }

    #[test]
    fn test_centered_pass_is_safe() {
        let t = Tuning::default();
        let o = column_at_avatar(&t, 300.0);
        assert!(!hits_obstacle(300.0, &o, &t));
    }

    #[test]
    fn test_touching_gap_top_hits() {
        let t = Tuning::default();
        let o = column_at_avatar(&t, 300.0);
        // gap top = 215; avatar top at 214
        assert!(hits_obstacle(230.0, &o, &t));
        // gap bottom = 385; avatar bottom at 386
        assert!(hits_obstacle(370.0, &o, &t));
    }

    #[test]
    fn test_no_hit_without_horizontal_overlap() {
        let t = Tuning::default();
        let ahead = Obstacle::new(t.avatar_x + t.avatar_radius + 1.0, 300.0);
        let behind = Obstacle::new(t.avatar_x - t.avatar_radius - t.obstacle_width - 1.0, 300.0);
        assert!(!hits_obstacle(0.0, &ahead, &t));
        assert!(!hits_obstacle(0.0, &behind, &t));
    }

    #[test]
    fn test_cleared_at_leading_edge() {
        let t = Tuning::default();
        // Trailing edge exactly at the avatar's leading edge: not yet cleared
        let o = Obstacle::new(t.avatar_x + t.avatar_radius - t.obstacle_width, 300.0);
        assert!(!cleared(&o, &t));
        let o = Obstacle::new(o.x - 0.5, 300.0);
        assert!(cleared(&o, &t));
    }

    #[test]
    fn test_boundary_contact() {
        let t = Tuning::default();
        assert_eq!(boundary_contact(16.0, &t), Some(Boundary::Ceiling));
        assert_eq!(boundary_contact(504.0, &t), Some(Boundary::Ground));
        assert_eq!(boundary_contact(300.0, &t), None);
    }
}
