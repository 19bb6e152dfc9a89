//! Axis-aligned collision detection
//!
//! The arcade rule: two sprites collide when their center-to-center
//! distances fit inside the sums of their half extents on both axes.
//! No pixel masks, no rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored center-radius style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Box center in screen coordinates.
    pub center: Vec2,
    /// Half extents (half width, half height).
    pub half: Vec2,
}

impl Aabb {
    /// Build a box from its center and full sprite extents.
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// Center-radius AABB overlap test.
///
/// Deterministic and side-effect free; called pairwise across the entity
/// pools every frame. Boxes that exactly touch count as overlapping.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    if (a.center.x - b.center.x).abs() > a.half.x + b.half.x {
        return false;
    }
    if (a.center.y - b.center.y).abs() > a.half.y + b.half.y {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_when_intersecting() {
        let a = Aabb::new(Vec2::new(100.0, 100.0), 40.0, 40.0);
        let b = Aabb::new(Vec2::new(120.0, 110.0), 40.0, 40.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_miss_when_separated_horizontally() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 40.0, 40.0);
        let b = Aabb::new(Vec2::new(100.0, 0.0), 40.0, 40.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_miss_when_separated_vertically() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 40.0, 40.0);
        let b = Aabb::new(Vec2::new(0.0, 100.0), 40.0, 40.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        // Center distance exactly equals the sum of half widths.
        let a = Aabb::new(Vec2::new(0.0, 0.0), 40.0, 40.0);
        let b = Aabb::new(Vec2::new(40.0, 0.0), 40.0, 40.0);
        assert!(overlaps(&a, &b));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0,
            bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), aw, ah);
            let b = Aabb::new(Vec2::new(bx, by), bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn box_always_overlaps_itself(
            x in -2000.0f32..2000.0, y in -2000.0f32..2000.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = Aabb::new(Vec2::new(x, y), w, h);
            prop_assert!(overlaps(&a, &a));
        }
    }
}
