//! Subdivision spheres and hemispheres.
//!
//! Both start from octagon-based pyramid seeds and iteratively replace
//! every triangle with four by connecting edge midpoints. After the
//! requested iteration count every vertex is rescaled to the sphere radius,
//! so the faceting decreases geometrically with each iteration.

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::Triangle;
use crate::shape::Shape;

use super::pyramid::pyramid_triangles;

/// Triangle count quadruples per iteration; beyond this the mesh stops
/// being a real-time asset.
const MAX_ITERATIONS: u32 = 8;

/// Corners of the seed polygon; two such pyramids joined base-to-base give
/// the 16-triangle starting bipyramid.
const SEED_CORNERS: u32 = 8;

/// A sphere approximation of `radius` centered at the origin.
///
/// Seed: a bipyramid of two octagon-based pyramids joined base-to-base
/// (16 triangles). Each iteration splits every triangle into four; the
/// final triangle count is `16 * 4^iterations`. Every vertex ends at
/// distance `radius` from the origin.
pub fn sphere(radius: f32, iterations: u32, colors: &[Color]) -> Option<Shape> {
    if !valid_sphere(radius, iterations, colors) {
        log::warn!("sphere rejected: radius {radius}, {iterations} iterations");
        return None;
    }
    // Upper half: octagon pyramid sides, apex at (0, 0, radius).
    let upper = pyramid_triangles(SEED_CORNERS, radius, radius, colors, true)?;
    // Lower half: the same sides mirrored through the base plane.
    let mut triangles = upper.clone();
    for t in upper {
        let mut mirrored = t;
        mirrored.map_positions(|p| Vec3::new(p.x, p.y, -p.z));
        // Mirroring reverses the winding.
        mirrored.flip_winding();
        triangles.push(mirrored);
    }

    for _ in 0..iterations {
        triangles = subdivide(&triangles);
    }
    normalize_to_radius(&mut triangles, radius);
    Shape::from_triangles(triangles)
}

/// A hemisphere (dome) of `radius`: the same subdivision applied to a
/// single hollow octagon pyramid.
///
/// Normalization assumes the origin is the sphere's center, so the mesh is
/// re-centered first — the flat base ring is moved into the plane through
/// the origin — and the original pivot restored afterwards.
pub fn hemisphere(radius: f32, iterations: u32, colors: &[Color]) -> Option<Shape> {
    if !valid_sphere(radius, iterations, colors) {
        log::warn!("hemisphere rejected: radius {radius}, {iterations} iterations");
        return None;
    }
    let mut triangles = pyramid_triangles(SEED_CORNERS, radius, radius, colors, true)?;
    for _ in 0..iterations {
        triangles = subdivide(&triangles);
    }

    // Re-center: shift the base plane onto z = 0 before normalizing.
    let base_z = triangles
        .iter()
        .flat_map(|t| t.positions())
        .map(|p| p.z)
        .fold(f32::INFINITY, f32::min);
    for t in &mut triangles {
        t.map_positions(|p| p - Vec3::new(0.0, 0.0, base_z));
    }
    normalize_to_radius(&mut triangles, radius);
    // Restore the original pivot.
    for t in &mut triangles {
        t.map_positions(|p| p + Vec3::new(0.0, 0.0, base_z));
    }
    Shape::from_triangles(triangles)
}

/// Replace every triangle with four by connecting its edge midpoints.
/// Children inherit the parent's winding and coloring.
fn subdivide(triangles: &[Triangle]) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(triangles.len() * 4);
    for t in triangles {
        let [a, b, c] = t.positions();
        let ab = (a + b) * 0.5;
        let bc = (b + c) * 0.5;
        let ca = (c + a) * 0.5;
        for positions in [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]] {
            let mut child = *t;
            let mut i = 0;
            child.map_positions(|_| {
                let p = positions[i];
                i += 1;
                p
            });
            out.push(child);
        }
    }
    out
}

/// Rescale every vertex to distance `radius` from the origin.
fn normalize_to_radius(triangles: &mut [Triangle], radius: f32) {
    for t in triangles {
        t.map_positions(|p| {
            let len = p.length();
            if len < math::EPSILON {
                p
            } else {
                p * (radius / len)
            }
        });
    }
}

fn valid_sphere(radius: f32, iterations: u32, colors: &[Color]) -> bool {
    radius > 0.0
        && radius.is_finite()
        && iterations <= MAX_ITERATIONS
        && color::is_valid_color_set(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};

    #[test]
    fn triangle_count_quadruples_per_iteration() {
        for k in 0..4 {
            let shape = sphere(1.0, k, &[RED]).unwrap();
            assert_eq!(shape.triangle_count(), 16 * 4usize.pow(k));
        }
    }

    #[test]
    fn all_vertices_on_sphere_surface() {
        let radius = 2.0;
        let shape = sphere(radius, 3, &[RED]).unwrap();
        for t in shape.triangles().unwrap() {
            for p in t.positions() {
                assert!((p.length() - radius).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn sphere_normals_point_away_from_center() {
        let shape = sphere(1.0, 2, &[RED]).unwrap();
        for t in shape.triangles().unwrap() {
            let c = super::super::centroid(&t);
            assert!(t.normal().dot(c) > 0.0, "inward normal at {c:?}");
        }
    }

    #[test]
    fn sphere_spans_both_hemispheres() {
        let shape = sphere(1.0, 1, &[RED]).unwrap();
        let size = shape.bounding_size();
        assert!((size - Vec3::splat(2.0)).length() < 1e-3);
    }

    #[test]
    fn hemisphere_count_and_base_plane() {
        let shape = hemisphere(1.0, 2, &[BLUE]).unwrap();
        assert_eq!(shape.triangle_count(), 8 * 16);
        let mut max_z: f32 = f32::NEG_INFINITY;
        for t in shape.triangles().unwrap() {
            for p in t.positions() {
                // Nothing below the base plane, everything on the sphere.
                assert!(p.z > -1e-4);
                assert!((p.length() - 1.0).abs() < 1e-4);
                max_z = max_z.max(p.z);
            }
        }
        assert!((max_z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(sphere(0.0, 2, &[RED]).is_none());
        assert!(sphere(-1.0, 2, &[RED]).is_none());
        assert!(sphere(1.0, MAX_ITERATIONS + 1, &[RED]).is_none());
        assert!(sphere(1.0, 2, &[]).is_none());
        assert!(hemisphere(1.0, 2, &[[0.0, 0.0, 0.0, 1.5]]).is_none());
    }

    #[test]
    fn seed_bipyramid_has_sixteen_triangles() {
        let shape = sphere(1.0, 0, &[RED]).unwrap();
        assert_eq!(shape.triangle_count(), 16);
    }
}
