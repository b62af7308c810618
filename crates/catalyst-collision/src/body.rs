use catalyst_geom::{Aabb, Vec2};

/// Anything the resolver can move: a position, a velocity and a fixed collider size.
pub trait Body {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, vel: Vec2);
    fn collider_size(&self) -> Vec2;

    #[inline]
    fn shape(&self) -> CollisionShape {
        CollisionShape::new(self.position(), self.collider_size())
    }
}

/// Plain body with no behaviour of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }
}

impl Body for KinematicBody {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }
    #[inline]
    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
    #[inline]
    fn velocity(&self) -> Vec2 {
        self.vel
    }
    #[inline]
    fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }
    #[inline]
    fn collider_size(&self) -> Vec2 {
        self.size
    }
}

/// Collider box rebuilt from a body each time it is evaluated. `position` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionShape {
    pub position: Vec2,
    pub size: Vec2,
}

impl CollisionShape {
    #[inline]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.position + delta, self.size)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.position, self.size)
    }

    pub fn overlaps(&self, other: &CollisionShape) -> bool {
        self.aabb().overlaps(&other.aabb())
    }
}
