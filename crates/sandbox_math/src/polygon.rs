//! Polygon helpers
//!
//! Polygons are plain vertex slices in order (either winding). They are
//! assumed simple (non self-intersecting), not necessarily convex.

use crate::Vec2;

/// Signed area of a polygon (positive for counter-clockwise winding in a y-up frame)
pub fn signed_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.cross(b);
    }
    sum * 0.5
}

/// Check if a point lies inside the polygon (even-odd rule)
///
/// Points exactly on an edge may report either side.
pub fn contains_point(vertices: &[Vec2], point: Vec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vj.x + (point.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from a point to the closest polygon edge
pub fn distance_to_edges(vertices: &[Vec2], point: Vec2) -> f32 {
    let mut best = f32::MAX;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let edge = b - *a;
        let len_sq = edge.length_squared();
        let t = if len_sq > 0.0 {
            ((point - *a).dot(edge) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = *a + edge * t;
        best = best.min((point - closest).length());
    }
    best
}

/// Largest distance from the origin to any vertex
pub fn bounding_radius(vertices: &[Vec2]) -> f32 {
    vertices.iter().map(|v| v.length()).fold(0.0, f32::max)
}
