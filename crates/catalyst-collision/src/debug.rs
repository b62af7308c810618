use std::collections::VecDeque;

use catalyst_geom::GridPos;

pub const DEFAULT_CAPACITY: usize = 512;
pub const DEFAULT_CLEAR_INTERVAL: f32 = 0.5;

/// Recently probed cells, kept only for visualisation.
#[derive(Clone, Debug)]
pub struct CollisionDebug {
    checked: VecDeque<GridPos>,
    hit: VecDeque<GridPos>,
    capacity: usize,
    clear_interval: f32,
    timer: f32,
}

impl Default for CollisionDebug {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_CLEAR_INTERVAL)
    }
}

impl CollisionDebug {
    pub fn new(capacity: usize, clear_interval: f32) -> Self {
        Self {
            checked: VecDeque::with_capacity(capacity),
            hit: VecDeque::with_capacity(capacity),
            capacity,
            clear_interval,
            timer: 0.0,
        }
    }

    pub fn record_checked(&mut self, cell: GridPos) {
        push_bounded(&mut self.checked, self.capacity, cell);
    }

    pub fn record_hit(&mut self, cell: GridPos) {
        push_bounded(&mut self.hit, self.capacity, cell);
    }

    pub fn checked(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.checked.iter().copied()
    }

    pub fn hit(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.hit.iter().copied()
    }

    pub fn clear(&mut self) {
        self.checked.clear();
        self.hit.clear();
    }

    /// Advances the clear timer; returns true when the queues were emptied.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer < self.clear_interval {
            return false;
        }
        self.timer = 0.0;
        self.clear();
        true
    }
}

fn push_bounded(q: &mut VecDeque<GridPos>, cap: usize, cell: GridPos) {
    if cap == 0 {
        return;
    }
    if q.len() == cap {
        q.pop_front();
    }
    q.push_back(cell);
}
