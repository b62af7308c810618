use catalyst_geom::{GridPos, TileRect};
use proptest::prelude::*;

fn arb_rect() -> impl Strategy<Value = TileRect> {
    (-50i32..150, -50i32..150, 0i32..120, 0i32..120)
        .prop_map(|(x, y, w, h)| TileRect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn clamp_stays_in_bounds(r in arb_rect(), w in 1i32..100, h in 1i32..100) {
        if let Some(c) = r.clamp_to(w, h) {
            prop_assert!(c.left() >= 0 && c.top() >= 0);
            prop_assert!(c.right() <= w && c.bottom() <= h);
            prop_assert!(!c.is_empty());
            prop_assert!(c.area() <= r.area());
        } else {
            // Nothing of r lies inside the world.
            let overlaps = r.left() < w && r.right() > 0 && r.top() < h && r.bottom() > 0;
            prop_assert!(!overlaps || r.is_empty());
        }
    }

    #[test]
    fn clamp_preserves_inside_cells(r in arb_rect(), x in 0i32..100, y in 0i32..100) {
        let inside = r.contains(x, y);
        let clamped = r.clamp_to(100, 100);
        prop_assert_eq!(inside, clamped.map(|c| c.contains(x, y)).unwrap_or(false));
    }

    #[test]
    fn padded_contains_unpadded(r in arb_rect(), pad in 0i32..20) {
        let p = r.padded(pad);
        for (x, y) in [(r.left(), r.top()), (r.right() - 1, r.bottom() - 1)] {
            if r.contains(x, y) {
                prop_assert!(p.contains(x, y));
            }
        }
        prop_assert_eq!(p.width, r.width + 2 * pad);
    }
}

#[test]
fn centered_square() {
    let r = TileRect::centered(GridPos::new(10, 20), 3);
    assert_eq!(r, TileRect::new(7, 17, 7, 7));
    assert!(r.contains(10, 20));
    assert!(r.contains(13, 23));
    assert!(!r.contains(14, 20));
}

#[test]
fn disjoint_intersection_is_none() {
    let a = TileRect::new(0, 0, 4, 4);
    let b = TileRect::new(4, 0, 4, 4);
    assert_eq!(a.intersect(&b), None);
    assert_eq!(TileRect::new(-10, -10, 5, 5).clamp_to(10, 10), None);
}
