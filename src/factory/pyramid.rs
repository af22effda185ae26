//! Pyramids, frusta, and prisms built over regular polygon bases.
//!
//! All solids in this family stand along +Z: the base polygon lies in the
//! plane `z = 0` facing -Z, the top (apex or top polygon) at `z = height`.

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::Triangle;
use crate::shape::Shape;

use super::polygon::polygon_triangles;
use super::{centroid, orient_outward};

/// A pyramid: a regular polygon base and an apex at `(0, 0, height)`.
///
/// `hollow` omits the base polygon, leaving only the side faces — used as a
/// half-shape (and as the subdivision seed for hemispheres).
pub fn pyramid(
    corners: u32,
    radius: f32,
    height: f32,
    colors: &[Color],
    hollow: bool,
) -> Option<Shape> {
    Shape::from_triangles(pyramid_triangles(corners, radius, height, colors, hollow)?)
}

/// A frustum: two parallel regular polygons of possibly different radii
/// joined by side faces of two triangles each.
pub fn frustum(
    corners: u32,
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    colors: &[Color],
) -> Option<Shape> {
    if !valid_solid(corners, bottom_radius, height, colors) || top_radius <= 0.0 {
        log::warn!("frustum rejected: invalid parameters");
        return None;
    }
    let bottom = math::circle_points(bottom_radius, corners, 0.0);
    let top = math::circle_points(top_radius, corners, height);
    let n = corners as usize;

    // Base facing -Z, top facing +Z.
    let mut triangles = polygon_triangles(corners, bottom_radius, 0.0, colors)?;
    for t in &mut triangles {
        t.flip_winding();
    }
    triangles.extend(polygon_triangles(corners, top_radius, height, colors)?);

    let mut index = triangles.len();
    for i in 0..n {
        let j = (i + 1) % n;
        for positions in [
            [bottom[i], bottom[j], top[j]],
            [bottom[i], top[j], top[i]],
        ] {
            let mut t = Triangle::uniform(positions, color::cycle(colors, index))?;
            let outward = side_outward(&t);
            orient_outward(&mut t, outward);
            triangles.push(t);
            index += 1;
        }
    }
    Shape::from_triangles(triangles)
}

/// A prism: a frustum with equal bottom and top radii.
pub fn prism(corners: u32, radius: f32, height: f32, colors: &[Color]) -> Option<Shape> {
    frustum(corners, radius, radius, height, colors)
}

/// Side (and optionally base) triangles of a pyramid, for reuse by the
/// subdivision-sphere seeds.
pub(crate) fn pyramid_triangles(
    corners: u32,
    radius: f32,
    height: f32,
    colors: &[Color],
    hollow: bool,
) -> Option<Vec<Triangle>> {
    if !valid_solid(corners, radius, height, colors) {
        log::warn!("pyramid rejected: invalid parameters");
        return None;
    }
    let base = math::circle_points(radius, corners, 0.0);
    let apex = Vec3::new(0.0, 0.0, height);
    let n = corners as usize;

    let mut triangles = Vec::new();
    if !hollow {
        triangles = polygon_triangles(corners, radius, 0.0, colors)?;
        for t in &mut triangles {
            t.flip_winding();
        }
    }
    let mut index = triangles.len();
    for i in 0..n {
        let mut t = Triangle::uniform(
            [base[i], base[(i + 1) % n], apex],
            color::cycle(colors, index),
        )?;
        let outward = side_outward(&t);
        orient_outward(&mut t, outward);
        triangles.push(t);
        index += 1;
    }
    Some(triangles)
}

/// Outward reference direction for a side face: radially away from the Z
/// axis at the face centroid.
fn side_outward(t: &Triangle) -> Vec3 {
    let c = centroid(t);
    let radial = Vec3::new(c.x, c.y, 0.0);
    if radial.length_squared() > math::EPSILON * math::EPSILON {
        radial
    } else {
        Vec3::Z
    }
}

fn valid_solid(corners: u32, radius: f32, height: f32, colors: &[Color]) -> bool {
    corners >= 3
        && radius > 0.0
        && radius.is_finite()
        && height > 0.0
        && height.is_finite()
        && color::is_valid_color_set(colors)
}
