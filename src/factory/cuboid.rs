//! Filled and wireframe cuboids.

use glam::Vec3;

use crate::color::{self, Color};
use crate::primitive::{Line, Triangle};
use crate::shape::Shape;

/// A box centered at the origin with the given edge lengths.
///
/// Exactly 12 triangles covering the 6 faces in the fixed order front (+Z),
/// right (+X), back (-Z), left (-X), top (+Y), bottom (-Y). The color set
/// must have length 1 (whole box), 6 (per face) or 12 (per triangle); any
/// other length is rejected.
pub fn cuboid(width: f32, height: f32, depth: f32, colors: &[Color]) -> Option<Shape> {
    if !valid_edges(width, height, depth) {
        log::warn!("cuboid rejected: edges {width}x{height}x{depth}");
        return None;
    }
    if !color::is_valid_color_set(colors) || !matches!(colors.len(), 1 | 6 | 12) {
        log::warn!("cuboid rejected: color set of length {}", colors.len());
        return None;
    }
    let [x, y, z] = [width / 2.0, height / 2.0, depth / 2.0];

    // Two CCW-wound triangles per face, outward normals.
    #[rustfmt::skip]
    let faces: [[Vec3; 4]; 6] = [
        // front (+Z)
        [v(-x, -y, z), v(x, -y, z), v(x, y, z), v(-x, y, z)],
        // right (+X)
        [v(x, -y, z), v(x, -y, -z), v(x, y, -z), v(x, y, z)],
        // back (-Z)
        [v(x, -y, -z), v(-x, -y, -z), v(-x, y, -z), v(x, y, -z)],
        // left (-X)
        [v(-x, -y, -z), v(-x, -y, z), v(-x, y, z), v(-x, y, -z)],
        // top (+Y)
        [v(-x, y, z), v(x, y, z), v(x, y, -z), v(-x, y, -z)],
        // bottom (-Y)
        [v(-x, -y, -z), v(x, -y, -z), v(x, -y, z), v(-x, -y, z)],
    ];

    let mut triangles = Vec::with_capacity(12);
    for (face_index, quad) in faces.iter().enumerate() {
        for (tri_index, corners) in [[0, 1, 2], [0, 2, 3]].iter().enumerate() {
            let index = face_index * 2 + tri_index;
            let c = match colors.len() {
                1 => colors[0],
                6 => colors[face_index],
                _ => colors[index],
            };
            triangles.push(Triangle::uniform(
                [quad[corners[0]], quad[corners[1]], quad[corners[2]]],
                c,
            )?);
        }
    }
    Shape::from_triangles(triangles)
}

/// The 12 edges of the same box as 12 line segments, for composing with or
/// instead of the filled [`cuboid`].
pub fn wire_cuboid(
    width: f32,
    height: f32,
    depth: f32,
    c: Color,
    line_width: f32,
) -> Option<Shape> {
    if !valid_edges(width, height, depth) {
        log::warn!("wire cuboid rejected: edges {width}x{height}x{depth}");
        return None;
    }
    if !color::is_valid_color(&c) || line_width <= 0.0 || !line_width.is_finite() {
        log::warn!("wire cuboid rejected: color or line width");
        return None;
    }
    let [x, y, z] = [width / 2.0, height / 2.0, depth / 2.0];
    // Front ring, back ring, then the four connecting edges.
    let front = [v(-x, -y, z), v(x, -y, z), v(x, y, z), v(-x, y, z)];
    let back = [v(-x, -y, -z), v(x, -y, -z), v(x, y, -z), v(-x, y, -z)];

    let mut lines = Vec::with_capacity(12);
    for i in 0..4 {
        lines.push(Line::new([front[i], front[(i + 1) % 4]], c)?);
    }
    for i in 0..4 {
        lines.push(Line::new([back[i], back[(i + 1) % 4]], c)?);
    }
    for i in 0..4 {
        lines.push(Line::new([front[i], back[i]], c)?);
    }
    Shape::from_lines(lines, line_width)
}

fn valid_edges(width: f32, height: f32, depth: f32) -> bool {
    [width, height, depth]
        .iter()
        .all(|e| *e > 0.0 && e.is_finite())
}

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW};
    use crate::primitive::Coloring;

    #[test]
    fn twelve_triangles_with_outward_normals() {
        let shape = cuboid(2.0, 4.0, 6.0, &[RED]).unwrap();
        assert_eq!(shape.triangle_count(), 12);
        for t in shape.triangles().unwrap() {
            let center = (t.positions()[0] + t.positions()[1] + t.positions()[2]) / 3.0;
            assert!(t.normal().dot(center) > 0.0);
        }
        assert!((shape.bounding_size() - Vec3::new(2.0, 4.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn six_colors_paint_whole_faces() {
        let set = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
        let shape = cuboid(1.0, 1.0, 1.0, &set).unwrap();
        let tris = shape.triangles().unwrap();
        for (i, t) in tris.iter().enumerate() {
            assert_eq!(t.coloring(), Coloring::Uniform(set[i / 2]));
        }
    }

    #[test]
    fn twelve_colors_paint_individual_triangles() {
        let set: Vec<Color> = (0..12).map(|i| [i as f32 / 12.0, 0.0, 0.0, 1.0]).collect();
        let shape = cuboid(1.0, 1.0, 1.0, &set).unwrap();
        let tris = shape.triangles().unwrap();
        for (i, t) in tris.iter().enumerate() {
            assert_eq!(t.coloring(), Coloring::Uniform(set[i]));
        }
    }

    #[test]
    fn color_set_of_length_four_rejected() {
        assert!(cuboid(1.0, 1.0, 1.0, &[RED, GREEN, BLUE, WHITE]).is_none());
        assert!(cuboid(1.0, 1.0, 1.0, &[]).is_none());
    }

    #[test]
    fn bad_edges_rejected() {
        assert!(cuboid(0.0, 1.0, 1.0, &[RED]).is_none());
        assert!(cuboid(1.0, -2.0, 1.0, &[RED]).is_none());
        assert!(cuboid(1.0, 1.0, f32::NAN, &[RED]).is_none());
    }

    #[test]
    fn front_face_comes_first() {
        let shape = cuboid(2.0, 2.0, 2.0, &[RED]).unwrap();
        let tris = shape.triangles().unwrap();
        for t in &tris[0..2] {
            assert!((t.normal() - Vec3::Z).length() < 1e-5);
            assert!(t.positions().iter().all(|p| (p.z - 1.0).abs() < 1e-6));
        }
        // Face order: front, right, back, left, top, bottom.
        let expected = [Vec3::Z, Vec3::X, -Vec3::Z, -Vec3::X, Vec3::Y, -Vec3::Y];
        for (i, n) in expected.iter().enumerate() {
            assert!((tris[i * 2].normal() - *n).length() < 1e-5);
            assert!((tris[i * 2 + 1].normal() - *n).length() < 1e-5);
        }
    }

    #[test]
    fn wireframe_has_twelve_edges_over_eight_corners() {
        let shape = wire_cuboid(2.0, 2.0, 2.0, BLUE, 1.5).unwrap();
        assert_eq!(shape.line_count(), 12);
        assert!((shape.line_width() - 1.5).abs() < 1e-6);
        let mut corners: Vec<[i32; 3]> = shape
            .lines()
            .unwrap()
            .iter()
            .flat_map(|l| l.endpoints())
            .map(|p| [p.x.round() as i32, p.y.round() as i32, p.z.round() as i32])
            .collect();
        corners.sort();
        corners.dedup();
        assert_eq!(corners.len(), 8);
    }

    #[test]
    fn wireframe_rejects_bad_width() {
        assert!(wire_cuboid(1.0, 1.0, 1.0, BLUE, 0.0).is_none());
        assert!(wire_cuboid(1.0, 1.0, 1.0, BLUE, -1.0).is_none());
        assert!(wire_cuboid(1.0, 1.0, 1.0, [9.0, 0.0, 0.0, 1.0], 1.0).is_none());
    }
}
