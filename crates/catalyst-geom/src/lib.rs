//! Minimal 2D geometry types shared by the world, lighting and collision crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Edge length of one tile in world units.
pub const TILE_SIZE: f32 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True when both components are within `eps` of zero.
    #[inline]
    pub fn is_near_zero(self, eps: f32) -> bool {
        self.x.abs() < eps && self.y.abs() < eps
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Integer cell coordinate. Row 0 is the top of the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance. Exact for any pair of cells.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Saturates at `u32::MAX`.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

impl Add for GridPos {
    type Output = GridPos;
    #[inline]
    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Cell containing a world-space point. Floors, so negative positions land in negative cells.
#[inline]
pub fn world_to_grid(pos: Vec2) -> GridPos {
    GridPos::new(
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.y / TILE_SIZE).floor() as i32,
    )
}

/// World-space position of a cell's top-left corner.
#[inline]
pub fn grid_to_world(cell: GridPos) -> Vec2 {
    Vec2::new(cell.x as f32 * TILE_SIZE, cell.y as f32 * TILE_SIZE)
}

/// Inclusive range of cells overlapped by the half-open interval `[min, max)`.
///
/// Returns an empty range (`first > last`) when the interval has no extent.
#[inline]
pub fn cell_span(min: f32, max: f32) -> (i32, i32) {
    let first = (min / TILE_SIZE).floor() as i32;
    let last = (max / TILE_SIZE).ceil() as i32 - 1;
    (first, last)
}

/// Rectangle of cells, `width × height` starting at `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TileRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * radius + 1` centred on `center`.
    pub fn centered(center: GridPos, radius: i32) -> Self {
        let r = radius.max(0);
        Self::new(center.x - r, center.y - r, 2 * r + 1, 2 * r + 1)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Grows the rectangle by `pad` cells on every side.
    pub fn padded(&self, pad: i32) -> Self {
        Self::new(
            self.x - pad,
            self.y - pad,
            self.width + 2 * pad,
            self.height + 2 * pad,
        )
    }

    pub fn intersect(&self, other: &TileRect) -> Option<TileRect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(TileRect::new(left, top, right - left, bottom - top))
    }

    /// Clips to `[0, width) × [0, height)`; `None` when nothing remains.
    #[inline]
    pub fn clamp_to(&self, width: i32, height: i32) -> Option<TileRect> {
        self.intersect(&TileRect::new(0, 0, width, height))
    }
}

/// World-space box. `max` is exclusive when mapped onto cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn translated(&self, delta: Vec2) -> Aabb {
        Aabb::new(self.min + delta, self.max + delta)
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Inclusive column range covered by the box.
    #[inline]
    pub fn column_span(&self) -> (i32, i32) {
        cell_span(self.min.x, self.max.x)
    }

    /// Inclusive row range covered by the box.
    #[inline]
    pub fn row_span(&self) -> (i32, i32) {
        cell_span(self.min.y, self.max.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn vec2_add_sub_inverse(a in any::<Vec2>(), b in any::<Vec2>()) {
            prop_assume!(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite());
            prop_assume!(a.x.abs() < 1e6 && a.y.abs() < 1e6 && b.x.abs() < 1e6 && b.y.abs() < 1e6);
            let r = (a + b) - b;
            prop_assert!((r.x - a.x).abs() <= 1e-1);
            prop_assert!((r.y - a.y).abs() <= 1e-1);
        }
    }

    #[test]
    fn chebyshev_and_manhattan() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, -2);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(a.manhattan(b), 5);
    }

    #[test]
    fn distances_between_extreme_cells_do_not_overflow() {
        let lo = GridPos::new(i32::MIN, i32::MIN);
        let hi = GridPos::new(i32::MAX, 0);
        assert_eq!(lo.chebyshev(hi), u32::MAX);
        assert_eq!(hi.chebyshev(lo), u32::MAX);
        assert_eq!(lo.manhattan(hi), u32::MAX);
        assert_eq!(GridPos::new(i32::MIN, 0).chebyshev(GridPos::new(0, 0)), 1 << 31);
    }

    #[test]
    fn cell_span_excludes_max_edge() {
        assert_eq!(cell_span(0.0, 8.0), (0, 0));
        assert_eq!(cell_span(0.0, 8.5), (0, 1));
        assert_eq!(cell_span(-0.5, 8.0), (-1, 0));
    }
}
