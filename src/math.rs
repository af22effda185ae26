//! Vector and matrix helpers used by the mesh generators and shape
//! transforms.
//!
//! Everything here is a pure function over [`glam`] types. Functions that
//! can fail on degenerate input (zero-length axes, empty control polygons)
//! return `Option` instead of producing NaNs.

use std::f32::consts::PI;

use glam::{Mat3, Mat4, Quat, Vec3};

/// Tolerance used by orthonormality and degeneracy checks.
pub const EPSILON: f32 = 1e-5;

/// Distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (b - a).length()
}

/// Unit face normal of the triangle `(a, b, c)`, from the cross product of
/// the edges `a→b` and `a→c`.
///
/// Returns `None` for degenerate (collinear) triangles.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let n = (b - a).cross(c - a);
    if n.length_squared() < EPSILON * EPSILON {
        return None;
    }
    Some(n.normalize())
}

/// Sample `count` points evenly spaced on a circle of `radius` in the plane
/// `z = depth`.
///
/// The first point is the topmost one, `(0, radius, depth)`; subsequent
/// points proceed counter-clockwise when viewed from +Z.
pub fn circle_points(radius: f32, count: u32, depth: f32) -> Vec<Vec3> {
    let step = 2.0 * PI / count as f32;
    (0..count)
        .map(|i| {
            let angle = PI / 2.0 + i as f32 * step;
            Vec3::new(radius * angle.cos(), radius * angle.sin(), depth)
        })
        .collect()
}

/// Rotation matrix for `angle` radians about `axis`.
///
/// Returns `None` if `axis` has (near) zero length.
pub fn rotation_about_axis(axis: Vec3, angle: f32) -> Option<Mat4> {
    if axis.length_squared() < EPSILON * EPSILON {
        return None;
    }
    Some(Mat4::from_axis_angle(axis.normalize(), angle))
}

/// Rotate `point` by `angle` radians about `axis` (through the origin).
///
/// Returns `None` if `axis` has (near) zero length.
pub fn rotate_about_axis(point: Vec3, axis: Vec3, angle: f32) -> Option<Vec3> {
    rotation_about_axis(axis, angle).map(|m| m.transform_point3(point))
}

/// Rotation matrix composed from intrinsic rotations applied in X, Z, Y
/// order.
pub fn euler_xzy(x: f32, z: f32, y: f32) -> Mat4 {
    Mat4::from_rotation_x(x) * Mat4::from_rotation_z(z) * Mat4::from_rotation_y(y)
}

/// Whether the upper-left 3×3 block of `m` is a proper rotation: unit,
/// mutually orthogonal columns and determinant +1, within [`EPSILON`]-scale
/// tolerance.
pub fn is_orthonormal(m: &Mat4) -> bool {
    let r = Mat3::from_mat4(*m);
    let cols = [r.x_axis, r.y_axis, r.z_axis];
    let tol = 1e-4;
    for c in &cols {
        if (c.length_squared() - 1.0).abs() > tol {
            return false;
        }
    }
    if cols[0].dot(cols[1]).abs() > tol
        || cols[0].dot(cols[2]).abs() > tol
        || cols[1].dot(cols[2]).abs() > tol
    {
        return false;
    }
    (r.determinant() - 1.0).abs() <= tol
}

/// Decompose the rotation in `m` into a unit axis and an angle in radians.
///
/// Returns `None` when `m` is not orthonormal. The identity rotation yields
/// angle 0 with an arbitrary (but unit) axis.
pub fn axis_angle_from_matrix(m: &Mat4) -> Option<(Vec3, f32)> {
    if !is_orthonormal(m) {
        return None;
    }
    let q = Quat::from_mat3(&Mat3::from_mat4(*m));
    let (axis, angle) = q.to_axis_angle();
    Some((axis, angle))
}

/// A unit vector perpendicular to `v`.
///
/// The vector is constructed by crossing `v` with the world axis it is
/// least aligned with, so the result is well conditioned for any input
/// direction. Returns `None` for (near) zero-length input.
pub fn perpendicular(v: Vec3) -> Option<Vec3> {
    if v.length_squared() < EPSILON * EPSILON {
        return None;
    }
    let a = v.abs();
    let pick = if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    Some(v.cross(pick).normalize())
}

/// Evaluate a Bezier curve given by `control_points` at parameter `t`
/// using de Casteljau's algorithm.
///
/// Returns `None` for an empty control polygon or `t` outside `[0, 1]`.
pub fn bezier(control_points: &[Vec3], t: f32) -> Option<Vec3> {
    if control_points.is_empty() || !(0.0..=1.0).contains(&t) {
        return None;
    }
    let mut points = control_points.to_vec();
    while points.len() > 1 {
        for i in 0..points.len() - 1 {
            points[i] = points[i].lerp(points[i + 1], t);
        }
        points.pop();
    }
    Some(points[0])
}
