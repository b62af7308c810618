use catalyst_collision::{Body, CollisionSettings, KinematicBody, move_and_slide};
use catalyst_geom::{TILE_SIZE, Vec2};
use proptest::prelude::*;

const SIZE: Vec2 = Vec2::new(6.0, 14.0);

proptest! {
    #[test]
    fn never_sinks_into_floor(
        x in -100.0f32..100.0,
        bottom in 40.0f32..79.9,
        vx in -7.0f32..7.0,
        vy in 0.0f32..7.9,
    ) {
        let s = CollisionSettings::default();
        let floor = |_x: i32, y: i32| y >= 10;
        let mut body = KinematicBody::new(Vec2::new(x, bottom - SIZE.y), SIZE);
        body.vel = Vec2::new(vx, vy);
        let res = move_and_slide(&mut body, &s, &floor, None);
        prop_assert!(body.shape().bottom() <= 10.0 * TILE_SIZE + s.epsilon);
        prop_assert!(res.displacement.y >= 0.0);
        prop_assert!(!res.blocked_x);
    }

    #[test]
    fn never_passes_wall_near_edge(
        left in 0.0f32..33.9,
        y in 0.0f32..50.0,
        vx in 0.0f32..7.9,
    ) {
        let s = CollisionSettings::default();
        let wall = |x: i32, _y: i32| x == 5;
        let mut body = KinematicBody::new(Vec2::new(left, y), SIZE);
        body.vel.x = vx;
        let res = move_and_slide(&mut body, &s, &wall, None);
        prop_assert!(body.shape().right() <= 5.0 * TILE_SIZE + s.epsilon);
        prop_assert!(res.displacement.x >= 0.0);
    }
}
