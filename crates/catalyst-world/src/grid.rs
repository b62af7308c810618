use catalyst_geom::{GridPos, TileRect, Vec2};
use catalyst_tiles::{Tile, TileRegistry, TileTypeId};

/// Cell read/write seam used by generation passes.
pub trait TileStore {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn tile(&self, x: i32, y: i32) -> Tile;
    /// Returns whether the write landed.
    fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool;
}

/// Fixed-size tile array plus a parallel light array.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    light: Vec<f32>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::EMPTY; n],
            light: vec![0.0; n],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Out-of-bounds cells read as [`Tile::EMPTY`].
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.idx(x, y).map_or(Tile::EMPTY, |i| self.tiles[i])
    }

    #[inline]
    pub fn tile_type(&self, x: i32, y: i32) -> TileTypeId {
        self.get(x, y).ty
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Void counts as wall.
    #[inline]
    pub fn is_solid_at(&self, reg: &TileRegistry, x: i32, y: i32) -> bool {
        match self.idx(x, y) {
            Some(i) => reg.is_solid(self.tiles[i].ty),
            None => true,
        }
    }

    /// 0 outside the grid.
    #[inline]
    pub fn light(&self, x: i32, y: i32) -> f32 {
        self.idx(x, y).map_or(0.0, |i| self.light[i])
    }

    #[inline]
    pub fn set_light(&mut self, x: i32, y: i32, v: f32) {
        if let Some(i) = self.idx(x, y) {
            self.light[i] = v;
        }
    }

    #[inline]
    pub fn world_to_grid(pos: Vec2) -> GridPos {
        catalyst_geom::world_to_grid(pos)
    }

    #[inline]
    pub fn grid_to_world(cell: GridPos) -> Vec2 {
        catalyst_geom::grid_to_world(cell)
    }

    /// Topmost row in column `x` whose foreground is solid.
    pub fn first_solid_row(&self, reg: &TileRegistry, x: i32) -> Option<i32> {
        if x < 0 || x >= self.width {
            return None;
        }
        (0..self.height).find(|&y| reg.is_solid(self.get(x, y).ty))
    }
}

impl TileStore for TileGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn tile(&self, x: i32, y: i32) -> Tile {
        self.get(x, y)
    }

    fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        self.set(x, y, tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyst_tiles::Wall;

    #[test]
    fn out_of_bounds_reads_are_neutral() {
        let mut g = TileGrid::new(4, 3);
        assert_eq!(g.get(-1, 0), Tile::EMPTY);
        assert_eq!(g.get(4, 0), Tile::EMPTY);
        assert_eq!(g.light(0, 3), 0.0);
        assert!(!g.set(0, -1, Tile::plain(TileTypeId(1))));
        g.set_light(9, 9, 1.0);
        assert!(g.light.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn void_is_solid_for_collision() {
        let reg = TileRegistry::new();
        let g = TileGrid::new(2, 2);
        assert!(!g.is_solid_at(&reg, 0, 0));
        assert!(g.is_solid_at(&reg, -1, 0));
        assert!(g.is_solid_at(&reg, 0, 2));
    }

    #[test]
    fn writes_are_row_major() {
        let mut g = TileGrid::new(3, 2);
        let t = Tile::new(TileTypeId(2), Wall::Tile(TileTypeId(1)), 1);
        assert!(g.set(2, 1, t));
        assert_eq!(g.tiles[5], t);
        assert_eq!(g.get(2, 1), t);
    }

    #[test]
    fn negative_size_is_empty() {
        let g = TileGrid::new(-3, 5);
        assert_eq!(g.width(), 0);
        assert!(!g.in_bounds(0, 0));
    }
}
