//! Annular rings with optional axial thickness.

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::Triangle;
use crate::shape::Shape;

use super::polygon::polygon_triangles;
use super::{centroid, join, orient_outward, JoinPart};

/// An annulus in the XY plane, optionally extruded along Z by `width`.
///
/// Up to four sub-parts are built, each only if geometrically present, and
/// merged via [`join`]:
/// - front and back annular faces (only if `inner_radius < outer_radius`),
/// - inner and outer cylindrical walls (only if `width > 0`; the inner wall
///   additionally requires `inner_radius > 0`).
///
/// An `inner_radius` of zero collapses the faces to full discs. Parameter
/// combinations with no remaining parts return `None`.
pub fn ring(
    inner_radius: f32,
    outer_radius: f32,
    width: f32,
    segments: u32,
    colors: &[Color],
) -> Option<Shape> {
    if inner_radius < 0.0
        || !inner_radius.is_finite()
        || outer_radius <= 0.0
        || !outer_radius.is_finite()
        || inner_radius > outer_radius
        || width < 0.0
        || !width.is_finite()
        || segments < 3
        || !color::is_valid_color_set(colors)
    {
        log::warn!("ring rejected: invalid parameters");
        return None;
    }

    let half = width / 2.0;
    let has_faces = inner_radius < outer_radius;
    let has_walls = width > 0.0;

    let mut parts: Vec<Shape> = Vec::new();
    if has_faces {
        parts.push(annulus_face(
            inner_radius,
            outer_radius,
            segments,
            half,
            true,
            colors,
        )?);
        parts.push(annulus_face(
            inner_radius,
            outer_radius,
            segments,
            -half,
            false,
            colors,
        )?);
    }
    if has_walls {
        parts.push(wall(outer_radius, segments, half, true, colors)?);
        if inner_radius > 0.0 {
            parts.push(wall(inner_radius, segments, half, false, colors)?);
        }
    }
    if parts.is_empty() {
        log::warn!("ring rejected: fully degenerate parameters");
        return None;
    }

    let join_parts: Vec<JoinPart<'_>> = parts.iter().map(JoinPart::in_place).collect();
    join(&join_parts, None)
}

/// One flat annular face at `z`, facing +Z (`front`) or -Z.
fn annulus_face(
    inner: f32,
    outer: f32,
    segments: u32,
    z: f32,
    front: bool,
    colors: &[Color],
) -> Option<Shape> {
    // A zero inner radius degenerates the annulus to a disc.
    if inner < math::EPSILON {
        let mut triangles = polygon_triangles(segments, outer, z, colors)?;
        if !front {
            for t in &mut triangles {
                t.flip_winding();
            }
        }
        return Shape::from_triangles(triangles);
    }

    let inner_pts = math::circle_points(inner, segments, z);
    let outer_pts = math::circle_points(outer, segments, z);
    let n = segments as usize;
    let facing = if front { Vec3::Z } else { -Vec3::Z };

    let mut triangles = Vec::with_capacity(n * 2);
    let mut index = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        for positions in [
            [inner_pts[i], outer_pts[i], outer_pts[j]],
            [inner_pts[i], outer_pts[j], inner_pts[j]],
        ] {
            let mut t = Triangle::uniform(positions, color::cycle(colors, index))?;
            orient_outward(&mut t, facing);
            triangles.push(t);
            index += 1;
        }
    }
    Shape::from_triangles(triangles)
}

/// A cylindrical wall spanning `z` in `[-half, half]`, facing radially
/// outward (`outward`) or toward the axis.
fn wall(radius: f32, segments: u32, half: f32, outward: bool, colors: &[Color]) -> Option<Shape> {
    let bottom = math::circle_points(radius, segments, -half);
    let top = math::circle_points(radius, segments, half);
    let n = segments as usize;

    let mut triangles = Vec::with_capacity(n * 2);
    let mut index = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        for positions in [
            [bottom[i], bottom[j], top[j]],
            [bottom[i], top[j], top[i]],
        ] {
            let mut t = Triangle::uniform(positions, color::cycle(colors, index))?;
            let c = centroid(&t);
            let radial = Vec3::new(c.x, c.y, 0.0);
            orient_outward(&mut t, if outward { radial } else { -radial });
            triangles.push(t);
            index += 1;
        }
    }
    Shape::from_triangles(triangles)
}
