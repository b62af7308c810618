use catalyst_geom::{GridPos, TILE_SIZE, Vec2, cell_span};

use crate::body::{Body, CollisionShape};
use crate::debug::CollisionDebug;
use crate::CollisionSettings;

/// Outcome of one `move_and_slide` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Displacement actually applied to the body.
    pub displacement: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
    pub on_floor: bool,
}

/// Moves `body` by its velocity, vertical axis first, and damps the velocity afterwards.
///
/// Only the destination cells are tested, so a body covering more than a tile
/// per call can pass through one-tile walls.
pub fn move_and_slide<B, F>(
    body: &mut B,
    settings: &CollisionSettings,
    is_solid: &F,
    mut debug: Option<&mut CollisionDebug>,
) -> Resolution
where
    B: Body + ?Sized,
    F: Fn(i32, i32) -> bool,
{
    let shape = body.shape();
    let intended = body.velocity();

    let dy = resolve_vertical(&shape, intended.y, settings, is_solid, debug.as_deref_mut());
    let shape_y = shape.translated(Vec2::new(0.0, dy));
    let dx = resolve_horizontal(&shape_y, intended.x, settings, is_solid, debug.as_deref_mut());

    let mut displacement = Vec2::new(dx, dy);
    if displacement.is_near_zero(settings.near_zero) {
        displacement = Vec2::ZERO;
    }
    body.set_position(body.position() + displacement);

    let blocked_x = dx != intended.x;
    let blocked_y = dy != intended.y;
    let on_floor = probe_floor(&body.shape(), settings, is_solid);

    let mut vel = intended;
    if on_floor {
        vel.y = 0.0;
        vel.x *= settings.ground_friction;
    } else {
        vel.x *= settings.air_resistance;
        if blocked_y && intended.y < 0.0 {
            vel.y = 0.0;
        }
    }
    if blocked_x || vel.x.abs() < settings.min_velocity {
        vel.x = 0.0;
    }
    body.set_velocity(vel);

    if blocked_x || blocked_y {
        log::trace!(
            target: "collision",
            "blocked x={} y={} intended=({:.3}, {:.3}) moved=({:.3}, {:.3})",
            blocked_x,
            blocked_y,
            intended.x,
            intended.y,
            displacement.x,
            displacement.y
        );
    }

    Resolution {
        displacement,
        blocked_x,
        blocked_y,
        on_floor,
    }
}

/// Allowed vertical displacement for `shape` moving by `dy`.
///
/// Rows behind the leading edge are ignored, and the result never points
/// against the direction of travel.
pub fn resolve_vertical<F>(
    shape: &CollisionShape,
    dy: f32,
    settings: &CollisionSettings,
    is_solid: &F,
    debug: Option<&mut CollisionDebug>,
) -> f32
where
    F: Fn(i32, i32) -> bool,
{
    if dy == 0.0 || !dy.is_finite() {
        return 0.0;
    }
    let eps = settings.epsilon;
    let dest = shape.translated(Vec2::new(0.0, dy));
    let (c0, c1) = cell_span(shape.left(), shape.right());
    let (r0, r1) = cell_span(dest.top(), dest.bottom());
    let down = dy > 0.0;
    let leading = |r: i32| {
        if down {
            r as f32 * TILE_SIZE >= shape.bottom() - eps
        } else {
            (r + 1) as f32 * TILE_SIZE <= shape.top() + eps
        }
    };
    let hits = blocking_cells((c0, c1), (r0, r1), is_solid, debug, |_, r| leading(r));
    // Nearest row in the direction of travel.
    let nearest = if down {
        hits.iter().map(|p| p.y).min()
    } else {
        hits.iter().map(|p| p.y).max()
    };
    match nearest {
        None => dy,
        Some(r) if down => (r as f32 * TILE_SIZE - shape.bottom() - eps).clamp(0.0, dy),
        Some(r) => ((r + 1) as f32 * TILE_SIZE - shape.top() + eps).clamp(dy, 0.0),
    }
}

/// Allowed horizontal displacement for `shape` moving by `dx`, ignoring the
/// bottom `floor_clearance` strip so the floor underneath never walls the body.
pub fn resolve_horizontal<F>(
    shape: &CollisionShape,
    dx: f32,
    settings: &CollisionSettings,
    is_solid: &F,
    debug: Option<&mut CollisionDebug>,
) -> f32
where
    F: Fn(i32, i32) -> bool,
{
    if dx == 0.0 || !dx.is_finite() {
        return 0.0;
    }
    let eps = settings.epsilon;
    let dest = shape.translated(Vec2::new(dx, 0.0));
    let band_bottom = (shape.bottom() - settings.floor_clearance).max(shape.top());
    let (r0, r1) = cell_span(shape.top(), band_bottom);
    let (c0, c1) = cell_span(dest.left(), dest.right());
    let right = dx > 0.0;
    let leading = |c: i32| {
        if right {
            c as f32 * TILE_SIZE >= shape.right() - eps
        } else {
            (c + 1) as f32 * TILE_SIZE <= shape.left() + eps
        }
    };
    let hits = blocking_cells((c0, c1), (r0, r1), is_solid, debug, |c, _| leading(c));
    let nearest = if right {
        hits.iter().map(|p| p.x).min()
    } else {
        hits.iter().map(|p| p.x).max()
    };
    match nearest {
        None => dx,
        Some(c) if right => (c as f32 * TILE_SIZE - shape.right() - eps).clamp(0.0, dx),
        Some(c) => ((c + 1) as f32 * TILE_SIZE - shape.left() + eps).clamp(dx, 0.0),
    }
}

/// True when any cell in the row just below the collider is solid.
pub fn probe_floor<F>(shape: &CollisionShape, settings: &CollisionSettings, is_solid: &F) -> bool
where
    F: Fn(i32, i32) -> bool,
{
    let row = ((shape.bottom() + 2.0 * settings.epsilon) / TILE_SIZE).floor() as i32;
    let (c0, c1) = cell_span(shape.left(), shape.right());
    (c0..=c1).any(|c| is_solid(c, row))
}

fn blocking_cells<F, P>(
    cols: (i32, i32),
    rows: (i32, i32),
    is_solid: &F,
    mut debug: Option<&mut CollisionDebug>,
    ahead: P,
) -> Vec<GridPos>
where
    F: Fn(i32, i32) -> bool,
    P: Fn(i32, i32) -> bool,
{
    let mut hits = Vec::new();
    for c in cols.0..=cols.1 {
        for r in rows.0..=rows.1 {
            let cell = GridPos::new(c, r);
            if is_solid(c, r) {
                if let Some(d) = debug.as_deref_mut() {
                    d.record_hit(cell);
                }
                if ahead(c, r) {
                    hits.push(cell);
                }
            } else if let Some(d) = debug.as_deref_mut() {
                d.record_checked(cell);
            }
        }
    }
    hits
}
