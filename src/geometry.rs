//! Pure geometric primitives: ray-casting containment and envelope walks.
//!
//! These functions are stateless and deterministic; they are safe to call
//! from any number of concurrent callers without synchronization.

use geo::{Coord, Point};
use rstar::AABB;

/// A single polygon ring in (longitude, latitude) order.
///
/// Rings are treated as implicitly closed: the last vertex connects back to
/// the first whether or not the coordinates literally repeat.
pub type Ring = Vec<Coord<f64>>;

/// Even-odd ray-casting containment test over a single closed ring.
///
/// Casts a horizontal ray from the point toward +x and toggles an inside
/// flag on each edge crossing. An edge counts as crossed when exactly one
/// of its endpoints is strictly above the point's y and the edge's
/// x-intersection with the ray is strictly greater than the point's x. The
/// strict inequalities make vertex-on-ray and horizontal-edge cases land
/// deterministically on one side; a point exactly on the boundary gets an
/// implementation-defined but stable answer.
///
/// Degenerate rings (fewer than 3 vertices, duplicate points,
/// self-intersections) never panic; rings below 3 vertices are never
/// containing.
///
/// # Examples
///
/// ```rust
/// use geo::{coord, Point};
/// use gridpost::geometry::ring_contains;
///
/// let square = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 1.0, y: 0.0 },
///     coord! { x: 1.0, y: 1.0 },
///     coord! { x: 0.0, y: 1.0 },
/// ];
///
/// assert!(ring_contains(Point::new(0.5, 0.5), &square));
/// assert!(!ring_contains(Point::new(2.0, 2.0), &square));
/// ```
pub fn ring_contains(point: Point, ring: &[Coord<f64>]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let px = point.x();
    let py = point.y();

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];

        if (a.y > py) != (b.y > py) {
            let x_cross = (b.x - a.x) * (py - a.y) / (b.y - a.y) + a.x;
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Containment test for multi-part geometries.
///
/// Every ring is an independent solid region: the point is contained when
/// ANY ring contains it. Interior rings are not subtracted as holes.
pub fn any_ring_contains(point: Point, parts: &[Ring]) -> bool {
    parts.iter().any(|ring| ring_contains(point, ring))
}

/// Axis-aligned bounding box enclosing every coordinate of every part, in
/// (longitude, latitude) order. Returns `None` when there is nothing to
/// enclose.
pub fn envelope_of_parts(parts: &[Ring]) -> Option<AABB<[f64; 2]>> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut seen = false;

    for ring in parts {
        for coord in ring {
            min_x = min_x.min(coord.x);
            min_y = min_y.min(coord.y);
            max_x = max_x.max(coord.x);
            max_y = max_y.max(coord.y);
            seen = true;
        }
    }

    if seen {
        Some(AABB::from_corners([min_x, min_y], [max_x, max_y]))
    } else {
        None
    }
}
