//! Tori: a tube circle swept along a circular path.

use std::f32::consts::PI;

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::Triangle;
use crate::shape::Shape;

use super::{centroid, orient_outward};

/// A torus in the XY plane, centered at the origin.
///
/// An outer path circle of `segments` points defines the tube-center
/// positions; at each position a tube circle of `granularity` points is
/// generated in the plane perpendicular to the path's local tangent, using
/// an explicit perpendicular-vector construction. Each path/tube quad
/// becomes two triangles, colored cyclically.
pub fn torus(
    ring_radius: f32,
    tube_radius: f32,
    segments: u32,
    granularity: u32,
    colors: &[Color],
) -> Option<Shape> {
    if ring_radius <= 0.0
        || !ring_radius.is_finite()
        || tube_radius <= 0.0
        || !tube_radius.is_finite()
        || tube_radius >= ring_radius
        || segments < 3
        || granularity < 3
        || !color::is_valid_color_set(colors)
    {
        log::warn!("torus rejected: invalid parameters");
        return None;
    }

    let path = math::circle_points(ring_radius, segments, 0.0);
    let n = segments as usize;
    let g = granularity as usize;

    // One tube ring per path point, framed by the local tangent.
    let mut rings: Vec<Vec<Vec3>> = Vec::with_capacity(n);
    for i in 0..n {
        let tangent = path[(i + 1) % n] - path[(i + n - 1) % n];
        let u = math::perpendicular(tangent)?;
        let w = tangent.cross(u).normalize();
        let ring = (0..g)
            .map(|j| {
                let angle = 2.0 * PI * j as f32 / g as f32;
                path[i] + tube_radius * (u * angle.cos() + w * angle.sin())
            })
            .collect();
        rings.push(ring);
    }

    let mut triangles = Vec::with_capacity(n * g * 2);
    let mut index = 0;
    for i in 0..n {
        let next = (i + 1) % n;
        for j in 0..g {
            let jn = (j + 1) % g;
            let quad = [rings[i][j], rings[next][j], rings[next][jn], rings[i][jn]];
            for positions in [[quad[0], quad[1], quad[2]], [quad[0], quad[2], quad[3]]] {
                let mut t = Triangle::uniform(positions, color::cycle(colors, index))?;
                let outward = tube_outward(&t, ring_radius);
                orient_outward(&mut t, outward);
                triangles.push(t);
                index += 1;
            }
        }
    }
    Shape::from_triangles(triangles)
}

/// Outward reference for a tube face: from the nearest tube-center ring
/// point toward the face centroid.
fn tube_outward(t: &Triangle, ring_radius: f32) -> Vec3 {
    let c = centroid(t);
    let planar = Vec3::new(c.x, c.y, 0.0);
    let tube_center = if planar.length_squared() > math::EPSILON * math::EPSILON {
        planar.normalize() * ring_radius
    } else {
        Vec3::ZERO
    };
    c - tube_center
}
