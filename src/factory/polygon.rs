//! Regular polygons.

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::Triangle;
use crate::shape::Shape;

/// A regular polygon with `corners` vertices on the circumcircle of
/// `radius`, lying in the plane `z = depth` and facing +Z.
///
/// The first vertex is the topmost point; vertices proceed
/// counter-clockwise. The polygon is fan-triangulated from its center into
/// exactly `corners` triangles, colored cyclically from `colors`.
///
/// Returns `None` for fewer than 3 corners, a non-positive radius, or an
/// invalid color set.
pub fn regular_polygon(corners: u32, radius: f32, depth: f32, colors: &[Color]) -> Option<Shape> {
    let triangles = polygon_triangles(corners, radius, depth, colors)?;
    Shape::from_triangles(triangles)
}

/// The fan triangles of a regular polygon, for reuse by other builders.
pub(crate) fn polygon_triangles(
    corners: u32,
    radius: f32,
    depth: f32,
    colors: &[Color],
) -> Option<Vec<Triangle>> {
    if corners < 3 {
        log::warn!("polygon rejected: {corners} corners");
        return None;
    }
    if radius <= 0.0 || !radius.is_finite() || !depth.is_finite() {
        log::warn!("polygon rejected: radius {radius}");
        return None;
    }
    if !color::is_valid_color_set(colors) {
        log::warn!("polygon rejected: invalid color set");
        return None;
    }
    let points = math::circle_points(radius, corners, depth);
    let center = Vec3::new(0.0, 0.0, depth);
    let n = corners as usize;
    (0..n)
        .map(|i| {
            Triangle::uniform(
                [center, points[i], points[(i + 1) % n]],
                color::cycle(colors, i),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{GREEN, RED};
    use crate::primitive::Coloring;

    #[test]
    fn square_has_four_triangles_topmost_vertex_up() {
        let shape = regular_polygon(4, 1.0, 0.0, &[RED]).unwrap();
        assert_eq!(shape.triangle_count(), 4);
        let tris = shape.triangles().unwrap();
        // Second vertex of the first fan triangle is the topmost point.
        assert!((tris[0].positions()[1] - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        for t in &tris {
            assert_eq!(t.coloring(), Coloring::Uniform(RED));
        }
    }

    #[test]
    fn vertices_lie_on_circumcircle() {
        let radius = 2.5;
        let shape = regular_polygon(7, radius, 0.0, &[RED]).unwrap();
        for t in shape.triangles().unwrap() {
            // Skip the fan center (first vertex of every triangle).
            for p in &t.positions()[1..] {
                assert!((p.length() - radius).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn adjacent_triangles_share_one_edge() {
        let shape = regular_polygon(5, 1.0, 0.0, &[RED]).unwrap();
        let tris = shape.triangles().unwrap();
        for i in 0..tris.len() {
            let a = tris[i].positions();
            let b = tris[(i + 1) % tris.len()].positions();
            // Shared edge: fan center and the ring vertex between the two.
            assert!((a[0] - b[0]).length() < 1e-6);
            assert!((a[2] - b[1]).length() < 1e-6);
        }
    }

    #[test]
    fn faces_positive_z() {
        let shape = regular_polygon(6, 1.0, 0.0, &[RED]).unwrap();
        for t in shape.triangles().unwrap() {
            assert!((t.normal() - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn colors_cycle() {
        let shape = regular_polygon(5, 1.0, 0.0, &[RED, GREEN]).unwrap();
        let tris = shape.triangles().unwrap();
        assert_eq!(tris[0].coloring(), Coloring::Uniform(RED));
        assert_eq!(tris[1].coloring(), Coloring::Uniform(GREEN));
        assert_eq!(tris[4].coloring(), Coloring::Uniform(RED));
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(regular_polygon(2, 1.0, 0.0, &[RED]).is_none());
        assert!(regular_polygon(4, 0.0, 0.0, &[RED]).is_none());
        assert!(regular_polygon(4, -1.0, 0.0, &[RED]).is_none());
        assert!(regular_polygon(4, 1.0, 0.0, &[]).is_none());
        assert!(regular_polygon(4, 1.0, 0.0, &[[2.0, 0.0, 0.0, 1.0]]).is_none());
    }

    #[test]
    fn depth_offsets_all_vertices() {
        let shape = regular_polygon(3, 1.0, 4.0, &[RED]).unwrap();
        for t in shape.triangles().unwrap() {
            for p in t.positions() {
                assert!((p.z - 4.0).abs() < 1e-6);
            }
        }
    }
}
