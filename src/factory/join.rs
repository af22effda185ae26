//! The shape composition primitive: bake per-shape transforms into vertex
//! coordinates and merge everything into one coordinate frame.

use glam::{Mat4, Vec3};

use crate::math;
use crate::primitive::{Line, Triangle};
use crate::shape::Shape;

/// Placement of one input shape inside the merged coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartTransform {
    /// Scale factors, Euler rotation angles (radians, applied in X, Z, Y
    /// order), and a translation. Composed with the translation last.
    Components {
        scale: Vec3,
        rotation: Vec3,
        translation: Vec3,
    },
    /// An explicit transform matrix, applied as-is.
    Matrix(Mat4),
}

impl PartTransform {
    pub fn identity() -> Self {
        Self::Components {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }

    pub fn translation(t: Vec3) -> Self {
        Self::Components {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: t,
        }
    }

    fn matrix(&self) -> Mat4 {
        match self {
            Self::Components {
                scale,
                rotation,
                translation,
            } => {
                Mat4::from_translation(*translation)
                    * math::euler_xzy(rotation.x, rotation.z, rotation.y)
                    * Mat4::from_scale(*scale)
            }
            Self::Matrix(m) => *m,
        }
    }
}

/// One input to [`join`]: a shape and where it sits in the merged frame.
pub struct JoinPart<'a> {
    pub shape: &'a Shape,
    pub transform: PartTransform,
}

impl<'a> JoinPart<'a> {
    pub fn new(shape: &'a Shape, transform: PartTransform) -> Self {
        Self { shape, transform }
    }

    /// The shape at its own origin, untransformed.
    pub fn in_place(shape: &'a Shape) -> Self {
        Self::new(shape, PartTransform::identity())
    }
}

/// Merge several independently placed shapes into one.
///
/// Each part's transform is baked directly into its primitives' vertex
/// coordinates — not into the result's transform matrices — and the
/// transformed primitives are concatenated in input order. The merged shape
/// therefore occupies a single shared local frame and can be scaled,
/// rotated, and translated as one rigid entity. `new_origin`, if given,
/// re-bases the merged frame so that point becomes the local origin.
///
/// Line width: the result takes the first non-zero line width found among
/// the input shapes, in input order. Later widths are discarded, so parts
/// with differing widths should be joined separately.
///
/// Returns `None` for an empty part list, non-finite transforms, or inputs
/// whose triangles mix coloring modes.
pub fn join(parts: &[JoinPart<'_>], new_origin: Option<Vec3>) -> Option<Shape> {
    if parts.is_empty() {
        log::warn!("join rejected: no parts");
        return None;
    }
    if let Some(origin) = new_origin {
        if !origin.is_finite() {
            log::warn!("join rejected: non-finite origin");
            return None;
        }
    }

    let mut triangles: Vec<Triangle> = Vec::new();
    let mut lines: Vec<Line> = Vec::new();
    let mut line_width = 0.0f32;

    for part in parts {
        let m = part.transform.matrix();
        if !m.is_finite() {
            log::warn!("join rejected: non-finite transform");
            return None;
        }
        if let Some(tris) = part.shape.triangles() {
            for mut t in tris {
                t.map_positions(|p| m.transform_point3(p));
                triangles.push(t);
            }
        }
        if let Some(part_lines) = part.shape.lines() {
            if line_width == 0.0 {
                line_width = part.shape.line_width();
            }
            for mut l in part_lines {
                l.map_positions(|p| m.transform_point3(p));
                lines.push(l);
            }
        }
    }

    if let Some(origin) = new_origin {
        for t in &mut triangles {
            t.map_positions(|p| p - origin);
        }
        for l in &mut lines {
            l.map_positions(|p| p - origin);
        }
    }

    let shape = Shape::new(
        (!triangles.is_empty()).then_some(triangles),
        (!lines.is_empty()).then_some(lines),
    )?;
    if line_width > 0.0 {
        shape.set_line_width(line_width);
    }
    Some(shape)
}
