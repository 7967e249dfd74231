//! Collision primitives
//!
//! Two tests cover every cabinet: axis-aligned bounding-box overlap for the
//! continuous games (pong, invaders) and cell-exact grid occupancy for the
//! grid games (snake, tetris). Simultaneous multi-target hits are resolved
//! in entity-list order by the callers - the first match consumes the
//! projectile, remaining targets are unaffected that tick.

use glam::Vec2;

/// Axis-aligned bounding box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict-inequality overlap test; touching edges do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Rectangular cell grid used for occupancy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub cols: i32,
    pub rows: i32,
}

impl GridBounds {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, cell: (i32, i32)) -> bool {
        cell.0 >= 0 && cell.0 < self.cols && cell.1 >= 0 && cell.1 < self.rows
    }
}

/// Cell-exact membership test against an occupied-cell list.
pub fn occupies(cells: &[(i32, i32)], cell: (i32, i32)) -> bool {
    cells.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn disjoint_boxes_miss() {
        let a = Aabb::new(0.0, 0.0, 4.0, 4.0);
        let b = Aabb::new(100.0, 100.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn grid_bounds_reject_out_of_range_cells() {
        let grid = GridBounds::new(20, 20);
        assert!(grid.contains((0, 0)));
        assert!(grid.contains((19, 19)));
        assert!(!grid.contains((-1, 5)));
        assert!(!grid.contains((20, 5)));
        assert!(!grid.contains((5, 20)));
    }

    #[test]
    fn occupancy_is_cell_exact() {
        let body = [(10, 10), (9, 10), (8, 10)];
        assert!(occupies(&body, (9, 10)));
        assert!(!occupies(&body, (10, 9)));
    }
}
