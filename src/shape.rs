//! The mutable shape entity: primitives, transform state, and the flattened
//! buffers a rendering backend consumes.
//!
//! A shape may be touched by two actors at once: the renderer reading
//! matrices and buffers each frame, and at most one morph engine rewriting
//! buffer ranges on a timer. All such access goes through one coarse
//! [`parking_lot::Mutex`] per shape, which is what guarantees a reader never
//! observes a torn write spanning part of one generator's range. There is
//! deliberately no finer-grained locking and no frame queue: if the reader
//! stalls, later ticks simply overwrite the same offsets.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat4, Vec3, Vec4};
use parking_lot::Mutex;

use crate::color::{self, Color};
use crate::math;
use crate::primitive::{ColorMode, Coloring, Line, Triangle};

/// Which flattened buffer a read or write addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Triangle vertex coordinates, 9 floats per triangle.
    Vertices,
    /// Per-vertex RGBA, 12 floats per triangle (empty for textured shapes).
    Colors,
    /// Per-vertex face normals, 9 floats per triangle.
    Normals,
    /// Per-vertex UVs, 6 floats per triangle (textured shapes only).
    TexCoords,
    /// Line endpoint coordinates, 6 floats per line.
    LineVertices,
    /// Per-endpoint RGBA, 8 floats per line.
    LineColors,
}

/// Borrowed view of all flattened buffers, valid while the shape lock is
/// held inside [`Shape::read`].
pub struct BufferView<'a> {
    pub vertices: &'a [f32],
    pub colors: &'a [f32],
    pub normals: &'a [f32],
    pub tex_coords: &'a [f32],
    pub line_vertices: &'a [f32],
    pub line_colors: &'a [f32],
}

impl BufferView<'_> {
    /// Byte view of the triangle vertex buffer, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.colors)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.normals)
    }

    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.tex_coords)
    }

    pub fn line_vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.line_vertices)
    }

    pub fn line_color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.line_colors)
    }
}

struct ShapeState {
    triangles: Option<Vec<Triangle>>,
    lines: Option<Vec<Line>>,
    color_mode: ColorMode,
    scale: Mat4,
    rotation: Mat4,
    translation: Mat4,
    vertex_buffer: Vec<f32>,
    color_buffer: Vec<f32>,
    normal_buffer: Vec<f32>,
    tex_coord_buffer: Vec<f32>,
    line_vertex_buffer: Vec<f32>,
    line_color_buffer: Vec<f32>,
    bounding_size: Vec3,
    line_width: f32,
    texture: Option<u32>,
}

/// An aggregate of primitives plus transform state and derived buffers; the
/// unit of composition and animation.
pub struct Shape {
    state: Mutex<ShapeState>,
    morph_active: AtomicBool,
}

impl Shape {
    /// Build a shape from optional triangle and line lists.
    ///
    /// Returns `None` when both lists are absent or empty, or when the
    /// triangles do not all share one coloring mode.
    pub fn new(triangles: Option<Vec<Triangle>>, lines: Option<Vec<Line>>) -> Option<Self> {
        let triangles = triangles.filter(|t| !t.is_empty());
        let lines = lines.filter(|l| !l.is_empty());
        if triangles.is_none() && lines.is_none() {
            log::warn!("shape rejected: no primitives");
            return None;
        }
        let color_mode = match &triangles {
            Some(tris) => {
                let mode = tris[0].coloring().mode();
                if tris.iter().any(|t| t.coloring().mode() != mode) {
                    log::warn!("shape rejected: mixed triangle coloring modes");
                    return None;
                }
                mode
            }
            None => ColorMode::Uniform,
        };
        let mut state = ShapeState {
            triangles,
            lines,
            color_mode,
            scale: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            vertex_buffer: Vec::new(),
            color_buffer: Vec::new(),
            normal_buffer: Vec::new(),
            tex_coord_buffer: Vec::new(),
            line_vertex_buffer: Vec::new(),
            line_color_buffer: Vec::new(),
            bounding_size: Vec3::ZERO,
            line_width: 1.0,
            texture: None,
        };
        state.rebuild();
        Some(Self {
            state: Mutex::new(state),
            morph_active: AtomicBool::new(false),
        })
    }

    /// Shorthand for a triangle-only shape.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Option<Self> {
        Self::new(Some(triangles), None)
    }

    /// Shorthand for a line-only shape with the given line width.
    pub fn from_lines(lines: Vec<Line>, line_width: f32) -> Option<Self> {
        if line_width <= 0.0 {
            log::warn!("shape rejected: non-positive line width {line_width}");
            return None;
        }
        let shape = Self::new(None, Some(lines))?;
        shape.state.lock().line_width = line_width;
        Some(shape)
    }

    // ----- primitive-level queries (unaffected by morphing) -----

    /// Deep copy of the triangle list, if any.
    pub fn triangles(&self) -> Option<Vec<Triangle>> {
        self.state.lock().triangles.clone()
    }

    /// Deep copy of the line list, if any.
    pub fn lines(&self) -> Option<Vec<Line>> {
        self.state.lock().lines.clone()
    }

    pub fn triangle_count(&self) -> usize {
        self.state.lock().triangles.as_ref().map_or(0, Vec::len)
    }

    pub fn line_count(&self) -> usize {
        self.state.lock().lines.as_ref().map_or(0, Vec::len)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.state.lock().color_mode
    }

    /// Intrinsic size per axis: max − min vertex coordinate in model space.
    pub fn bounding_size(&self) -> Vec3 {
        self.state.lock().bounding_size
    }

    pub fn line_width(&self) -> f32 {
        self.state.lock().line_width
    }

    /// Width applied to all of this shape's lines. `false` if non-positive.
    pub fn set_line_width(&self, width: f32) -> bool {
        if width <= 0.0 || !width.is_finite() {
            return false;
        }
        self.state.lock().line_width = width;
        true
    }

    /// External texture handle for textured shapes. The image itself is the
    /// renderer's concern.
    pub fn texture(&self) -> Option<u32> {
        self.state.lock().texture
    }

    pub fn set_texture(&self, handle: u32) {
        self.state.lock().texture = Some(handle);
    }

    // ----- structural mutation (full buffer rebuild) -----

    /// Append triangles. All appended triangles must match the shape's
    /// coloring mode (a line-only shape adopts the mode of the first
    /// appended triangle). `false` leaves the shape unchanged.
    pub fn append_triangles(&self, triangles: Vec<Triangle>) -> bool {
        if triangles.is_empty() {
            return false;
        }
        let mut state = self.state.lock();
        let mode = if state.triangles.is_some() {
            state.color_mode
        } else {
            triangles[0].coloring().mode()
        };
        if triangles.iter().any(|t| t.coloring().mode() != mode) {
            log::warn!("append rejected: coloring mode mismatch");
            return false;
        }
        state.color_mode = mode;
        state
            .triangles
            .get_or_insert_with(Vec::new)
            .extend(triangles);
        state.rebuild();
        true
    }

    /// Append lines; triggers a full buffer rebuild.
    pub fn append_lines(&self, lines: Vec<Line>) -> bool {
        if lines.is_empty() {
            return false;
        }
        let mut state = self.state.lock();
        state.lines.get_or_insert_with(Vec::new).extend(lines);
        state.rebuild();
        true
    }

    /// Repaint every triangle and line with one color. Only valid for
    /// uniform-mode shapes; `false` otherwise or for an invalid color.
    pub fn set_uniform_color(&self, c: Color) -> bool {
        if !color::is_valid_color(&c) {
            return false;
        }
        let mut state = self.state.lock();
        if state.color_mode != ColorMode::Uniform {
            log::warn!("uniform recolor rejected: shape is not uniform-colored");
            return false;
        }
        if let Some(tris) = &mut state.triangles {
            for t in tris {
                t.set_uniform_color(c);
            }
        }
        if let Some(lines) = &mut state.lines {
            for l in lines {
                l.set_color(c);
            }
        }
        state.rebuild();
        true
    }

    /// Permanently re-base the local origin so the shape's geometric center
    /// lands at `point`, editing every primitive's coordinates. Distinct
    /// from the transform setters. `false` for non-finite input.
    pub fn move_center_to(&self, point: Vec3) -> bool {
        if !point.is_finite() {
            return false;
        }
        let mut state = self.state.lock();
        let Some((min, max)) = state.bounds() else {
            return false;
        };
        let offset = point - (min + max) * 0.5;
        state.translate_primitives(offset);
        state.rebuild();
        true
    }

    // ----- transform setters -----

    pub fn set_scale(&self, scale: Vec3) -> bool {
        if !scale.is_finite() {
            return false;
        }
        self.state.lock().scale = Mat4::from_scale(scale);
        true
    }

    pub fn set_scale_x(&self, x: f32) -> bool {
        self.set_scale_axis(0, x)
    }

    pub fn set_scale_y(&self, y: f32) -> bool {
        self.set_scale_axis(1, y)
    }

    pub fn set_scale_z(&self, z: f32) -> bool {
        self.set_scale_axis(2, z)
    }

    fn set_scale_axis(&self, axis: usize, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let mut state = self.state.lock();
        let mut s = state.scale_vector();
        s[axis] = value;
        state.scale = Mat4::from_scale(s);
        true
    }

    pub fn set_translation(&self, t: Vec3) -> bool {
        if !t.is_finite() {
            return false;
        }
        self.state.lock().translation = Mat4::from_translation(t);
        true
    }

    pub fn set_translation_x(&self, x: f32) -> bool {
        self.set_translation_axis(0, x)
    }

    pub fn set_translation_y(&self, y: f32) -> bool {
        self.set_translation_axis(1, y)
    }

    pub fn set_translation_z(&self, z: f32) -> bool {
        self.set_translation_axis(2, z)
    }

    fn set_translation_axis(&self, axis: usize, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let mut state = self.state.lock();
        let mut t = state.translation.w_axis.truncate();
        t[axis] = value;
        state.translation = Mat4::from_translation(t);
        true
    }

    /// Rotation of `angle` radians about `axis`. `false` for a zero axis.
    pub fn set_rotation_axis_angle(&self, axis: Vec3, angle: f32) -> bool {
        let Some(m) = math::rotation_about_axis(axis, angle) else {
            log::warn!("rotation rejected: zero-length axis");
            return false;
        };
        self.state.lock().rotation = m;
        true
    }

    /// Rotation from intrinsic Euler angles, applied in X, Z, Y order.
    pub fn set_rotation_euler(&self, x: f32, y: f32, z: f32) -> bool {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return false;
        }
        self.state.lock().rotation = math::euler_xzy(x, z, y);
        true
    }

    /// Explicit rotation matrix; rejected unless it is a pure rotation
    /// (orthonormal 3×3 block, no translation or projective part).
    pub fn set_rotation_matrix(&self, m: Mat4) -> bool {
        if !is_pure_rotation(&m) {
            log::warn!("rotation rejected: matrix is not orthonormal");
            return false;
        }
        self.state.lock().rotation = m;
        true
    }

    /// Rotate so the local direction `local` points along the world
    /// direction `world`.
    ///
    /// The rotation axis comes from the cross product and the angle from
    /// the arccos of the normalized dot product. A near-zero angle is a
    /// successful no-op (the identity rotation is set); anti-parallel
    /// directions rotate half a turn about an arbitrary perpendicular.
    /// `false` for zero-length input, leaving the rotation unchanged.
    pub fn align_axis(&self, local: Vec3, world: Vec3) -> bool {
        if local.length_squared() < math::EPSILON * math::EPSILON
            || world.length_squared() < math::EPSILON * math::EPSILON
        {
            log::warn!("align rejected: zero-length direction");
            return false;
        }
        let a = local.normalize();
        let b = world.normalize();
        let angle = a.dot(b).clamp(-1.0, 1.0).acos();
        if angle < math::EPSILON {
            self.state.lock().rotation = Mat4::IDENTITY;
            return true;
        }
        let axis = a.cross(b);
        let axis = if axis.length_squared() < math::EPSILON * math::EPSILON {
            // Anti-parallel: any perpendicular works.
            match math::perpendicular(a) {
                Some(p) => p,
                None => return false,
            }
        } else {
            axis.normalize()
        };
        self.state.lock().rotation = Mat4::from_axis_angle(axis, angle);
        true
    }

    /// Lay the shape between two world points: the local +Y axis is scaled
    /// to the segment length, rotated onto the segment direction, and
    /// translated to the midpoint. `false` for coincident points.
    pub fn place_between(&self, from: Vec3, to: Vec3) -> bool {
        let dir = to - from;
        let length = dir.length();
        if length < math::EPSILON || !from.is_finite() || !to.is_finite() {
            log::warn!("place_between rejected: coincident or invalid endpoints");
            return false;
        }
        if !self.align_axis(Vec3::Y, dir) {
            return false;
        }
        let mut state = self.state.lock();
        let mut s = state.scale_vector();
        s.y = length;
        state.scale = Mat4::from_scale(s);
        state.translation = Mat4::from_translation((from + to) * 0.5);
        true
    }

    // ----- matrices -----

    pub fn scale_matrix(&self) -> Mat4 {
        self.state.lock().scale
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        self.state.lock().rotation
    }

    pub fn translation_matrix(&self) -> Mat4 {
        self.state.lock().translation
    }

    /// Composed model matrix. Scale first, then rotation, translation last.
    pub fn model_matrix(&self) -> Mat4 {
        let state = self.state.lock();
        state.translation * state.rotation * state.scale
    }

    pub fn model_view(&self, view: &Mat4) -> Mat4 {
        *view * self.model_matrix()
    }

    pub fn model_view_projection(&self, view_projection: &Mat4) -> Mat4 {
        *view_projection * self.model_matrix()
    }

    // ----- buffer access -----

    /// Run `f` over the flattened buffers under the shape lock.
    ///
    /// This is the per-frame read contract: the whole view is consistent
    /// with respect to morph ticks and structural rebuilds.
    pub fn read<R>(&self, f: impl FnOnce(BufferView<'_>) -> R) -> R {
        let state = self.state.lock();
        f(BufferView {
            vertices: &state.vertex_buffer,
            colors: &state.color_buffer,
            normals: &state.normal_buffer,
            tex_coords: &state.tex_coord_buffer,
            line_vertices: &state.line_vertex_buffer,
            line_colors: &state.line_color_buffer,
        })
    }

    /// Clone one flattened buffer.
    pub fn buffer(&self, kind: BufferKind) -> Vec<f32> {
        let state = self.state.lock();
        state.buffer(kind).to_vec()
    }

    /// Overwrite `values.len()` floats of `kind` starting at `offset`.
    ///
    /// The underlying primitives are never touched; the buffer range
    /// intentionally diverges from what they would produce. The write is
    /// atomic with respect to [`Shape::read`]. `false` (no change) when the
    /// range does not fit.
    pub fn write_buffer_range(&self, kind: BufferKind, offset: usize, values: &[f32]) -> bool {
        let mut state = self.state.lock();
        let buf = state.buffer_mut(kind);
        let Some(end) = offset.checked_add(values.len()) else {
            return false;
        };
        if end > buf.len() {
            log::warn!(
                "buffer write rejected: range {offset}..{end} exceeds {} floats",
                buf.len()
            );
            return false;
        }
        buf[offset..end].copy_from_slice(values);
        true
    }

    // ----- morph engine slot -----

    pub(crate) fn try_acquire_morph_slot(&self) -> bool {
        self.morph_active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub(crate) fn release_morph_slot(&self) {
        self.morph_active.store(false, Ordering::Release);
    }

    /// Whether a morph loop currently owns this shape.
    pub fn is_morphing(&self) -> bool {
        self.morph_active.load(Ordering::Acquire)
    }
}

impl Clone for Shape {
    /// Deep copy: primitives, transforms, and buffers (including any ranges
    /// a morph engine has overwritten). The copy starts without a morph
    /// loop.
    fn clone(&self) -> Self {
        let state = self.state.lock();
        Self {
            state: Mutex::new(ShapeState {
                triangles: state.triangles.clone(),
                lines: state.lines.clone(),
                color_mode: state.color_mode,
                scale: state.scale,
                rotation: state.rotation,
                translation: state.translation,
                vertex_buffer: state.vertex_buffer.clone(),
                color_buffer: state.color_buffer.clone(),
                normal_buffer: state.normal_buffer.clone(),
                tex_coord_buffer: state.tex_coord_buffer.clone(),
                line_vertex_buffer: state.line_vertex_buffer.clone(),
                line_color_buffer: state.line_color_buffer.clone(),
                bounding_size: state.bounding_size,
                line_width: state.line_width,
                texture: state.texture,
            }),
            morph_active: AtomicBool::new(false),
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Shape")
            .field(
                "triangles",
                &state.triangles.as_ref().map_or(0, Vec::len),
            )
            .field("lines", &state.lines.as_ref().map_or(0, Vec::len))
            .field("color_mode", &state.color_mode)
            .field("bounding_size", &state.bounding_size)
            .finish()
    }
}

fn is_pure_rotation(m: &Mat4) -> bool {
    if !math::is_orthonormal(m) {
        return false;
    }
    let tol = 1e-5;
    m.x_axis.w.abs() < tol
        && m.y_axis.w.abs() < tol
        && m.z_axis.w.abs() < tol
        && (m.w_axis - Vec4::W).length() < tol
}

impl ShapeState {
    fn scale_vector(&self) -> Vec3 {
        Vec3::new(self.scale.x_axis.x, self.scale.y_axis.y, self.scale.z_axis.z)
    }

    fn buffer(&self, kind: BufferKind) -> &[f32] {
        match kind {
            BufferKind::Vertices => &self.vertex_buffer,
            BufferKind::Colors => &self.color_buffer,
            BufferKind::Normals => &self.normal_buffer,
            BufferKind::TexCoords => &self.tex_coord_buffer,
            BufferKind::LineVertices => &self.line_vertex_buffer,
            BufferKind::LineColors => &self.line_color_buffer,
        }
    }

    fn buffer_mut(&mut self, kind: BufferKind) -> &mut Vec<f32> {
        match kind {
            BufferKind::Vertices => &mut self.vertex_buffer,
            BufferKind::Colors => &mut self.color_buffer,
            BufferKind::Normals => &mut self.normal_buffer,
            BufferKind::TexCoords => &mut self.tex_coord_buffer,
            BufferKind::LineVertices => &mut self.line_vertex_buffer,
            BufferKind::LineColors => &mut self.line_color_buffer,
        }
    }

    fn translate_primitives(&mut self, offset: Vec3) {
        if let Some(tris) = &mut self.triangles {
            for t in tris {
                t.map_positions(|p| p + offset);
            }
        }
        if let Some(lines) = &mut self.lines {
            for l in lines {
                l.map_positions(|p| p + offset);
            }
        }
    }

    /// Min/max corner over all primitive coordinates, `None` if empty.
    fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        if let Some(tris) = &self.triangles {
            for t in tris {
                for p in t.positions() {
                    min = min.min(p);
                    max = max.max(p);
                    any = true;
                }
            }
        }
        if let Some(lines) = &self.lines {
            for l in lines {
                for p in l.endpoints() {
                    min = min.min(p);
                    max = max.max(p);
                    any = true;
                }
            }
        }
        any.then_some((min, max))
    }

    /// Rebuild every flattened buffer and the bounding size from the
    /// primitive arrays. Full rewrite, not incremental.
    fn rebuild(&mut self) {
        self.vertex_buffer.clear();
        self.color_buffer.clear();
        self.normal_buffer.clear();
        self.tex_coord_buffer.clear();
        self.line_vertex_buffer.clear();
        self.line_color_buffer.clear();

        if let Some(tris) = &self.triangles {
            for t in tris {
                let normal = t.normal();
                for p in t.positions() {
                    self.vertex_buffer.extend_from_slice(&[p.x, p.y, p.z]);
                    self.normal_buffer
                        .extend_from_slice(&[normal.x, normal.y, normal.z]);
                }
                match t.coloring() {
                    Coloring::Uniform(c) => {
                        for _ in 0..3 {
                            self.color_buffer.extend_from_slice(&c);
                        }
                    }
                    Coloring::Gradient(colors) => {
                        for c in colors {
                            self.color_buffer.extend_from_slice(&c);
                        }
                    }
                    Coloring::Textured(uvs) => {
                        for uv in uvs {
                            self.tex_coord_buffer.extend_from_slice(&uv);
                        }
                    }
                }
            }
        }
        if let Some(lines) = &self.lines {
            for l in lines {
                for p in l.endpoints() {
                    self.line_vertex_buffer.extend_from_slice(&[p.x, p.y, p.z]);
                    self.line_color_buffer.extend_from_slice(&l.color());
                }
            }
        }

        self.bounding_size = match self.bounds() {
            Some((min, max)) => max - min,
            None => Vec3::ZERO,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, GREEN, RED};
    use std::f32::consts::FRAC_PI_2;

    fn triangle(color: Color) -> Triangle {
        Triangle::uniform([Vec3::ZERO, Vec3::X, Vec3::Y], color).unwrap()
    }

    fn unit_shape() -> Shape {
        Shape::from_triangles(vec![triangle(RED)]).unwrap()
    }

    #[test]
    fn shape_requires_primitives() {
        assert!(Shape::new(None, None).is_none());
        assert!(Shape::new(Some(vec![]), Some(vec![])).is_none());
    }

    #[test]
    fn shape_rejects_mixed_coloring() {
        let uniform = triangle(RED);
        let gradient =
            Triangle::gradient([Vec3::ZERO, Vec3::X, Vec3::Y], [RED, GREEN, BLUE]).unwrap();
        assert!(Shape::from_triangles(vec![uniform, gradient]).is_none());
    }

    #[test]
    fn buffers_follow_primitives() {
        let shape = unit_shape();
        shape.read(|b| {
            assert_eq!(b.vertices.len(), 9);
            assert_eq!(b.colors.len(), 12);
            assert_eq!(b.normals.len(), 9);
            assert!(b.tex_coords.is_empty());
            assert_eq!(&b.colors[0..4], &RED);
            // Face normal of an XY triangle is +Z, repeated per vertex.
            assert_eq!(&b.normals[0..3], &[0.0, 0.0, 1.0]);
        });
    }

    #[test]
    fn append_rebuilds_buffers_and_bounds() {
        let shape = unit_shape();
        assert!(shape.append_triangles(vec![Triangle::uniform(
            [Vec3::new(0.0, 0.0, 2.0), Vec3::X, Vec3::Y],
            GREEN,
        )
        .unwrap()]));
        assert_eq!(shape.triangle_count(), 2);
        shape.read(|b| assert_eq!(b.vertices.len(), 18));
        assert!((shape.bounding_size().z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn append_enforces_color_mode() {
        let shape = unit_shape();
        let gradient =
            Triangle::gradient([Vec3::ZERO, Vec3::X, Vec3::Y], [RED, GREEN, BLUE]).unwrap();
        assert!(!shape.append_triangles(vec![gradient]));
        assert_eq!(shape.triangle_count(), 1);
    }

    #[test]
    fn model_matrix_applies_translation_last() {
        let shape = unit_shape();
        assert!(shape.set_scale(Vec3::splat(2.0)));
        assert!(shape.set_rotation_axis_angle(Vec3::Z, FRAC_PI_2));
        assert!(shape.set_translation(Vec3::new(10.0, 0.0, 0.0)));
        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (10,2,0)
        let p = shape.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(10.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_matrix_setter_validates() {
        let shape = unit_shape();
        assert!(shape.set_rotation_matrix(Mat4::from_rotation_y(0.5)));
        assert!(!shape.set_rotation_matrix(Mat4::from_scale(Vec3::splat(2.0))));
        assert!(!shape.set_rotation_matrix(Mat4::from_translation(Vec3::X)));
        // Prior rotation survives the rejected calls.
        let diff = (shape.rotation_matrix() - Mat4::from_rotation_y(0.5)).to_cols_array();
        assert!(diff.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn align_axis_rotates_y_onto_x() {
        let shape = unit_shape();
        assert!(shape.align_axis(Vec3::Y, Vec3::X));
        let p = shape.rotation_matrix().transform_point3(Vec3::Y);
        assert!((p - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn align_axis_handles_degenerate_directions() {
        let shape = unit_shape();
        assert!(!shape.align_axis(Vec3::ZERO, Vec3::X));
        // Parallel: no-op success.
        assert!(shape.align_axis(Vec3::Y, Vec3::Y * 3.0));
        // Anti-parallel: a valid half-turn.
        assert!(shape.align_axis(Vec3::Y, -Vec3::Y));
        let p = shape.rotation_matrix().transform_point3(Vec3::Y);
        assert!((p + Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn place_between_spans_segment() {
        let shape = unit_shape();
        let from = Vec3::new(1.0, 1.0, 0.0);
        let to = Vec3::new(1.0, 5.0, 0.0);
        assert!(shape.place_between(from, to));
        let m = shape.model_matrix();
        let bottom = m.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        let top = m.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((bottom - from).length() < 1e-4);
        assert!((top - to).length() < 1e-4);
        assert!(!shape.place_between(from, from));
    }

    #[test]
    fn move_center_to_edits_coordinates() {
        let shape = unit_shape();
        let before = shape.bounding_size();
        assert!(shape.move_center_to(Vec3::ZERO));
        let tris = shape.triangles().unwrap();
        // Bounds midpoint is now the origin.
        let positions: Vec<Vec3> = tris.iter().flat_map(|t| t.positions()).collect();
        let min = positions.iter().copied().fold(Vec3::splat(f32::MAX), Vec3::min);
        let max = positions.iter().copied().fold(Vec3::splat(f32::MIN), Vec3::max);
        assert!(((min + max) * 0.5).length() < 1e-6);
        // Re-basing preserves extent.
        assert!((shape.bounding_size() - before).length() < 1e-6);
    }

    #[test]
    fn uniform_recolor_updates_buffers() {
        let shape = unit_shape();
        assert!(shape.set_uniform_color(GREEN));
        shape.read(|b| assert_eq!(&b.colors[4..8], &GREEN));
        assert!(!shape.set_uniform_color([3.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn buffer_writes_are_bounds_checked() {
        let shape = unit_shape();
        assert!(shape.write_buffer_range(BufferKind::Vertices, 3, &[9.0, 9.0, 9.0]));
        shape.read(|b| assert_eq!(&b.vertices[3..6], &[9.0, 9.0, 9.0]));
        assert!(!shape.write_buffer_range(BufferKind::Vertices, 7, &[0.0; 3]));
        assert!(!shape.write_buffer_range(BufferKind::Vertices, usize::MAX, &[0.0]));
        // Primitives untouched by the successful write.
        let tris = shape.triangles().unwrap();
        assert_eq!(tris[0].positions()[1], Vec3::X);
    }

    #[test]
    fn clone_is_deep() {
        let shape = unit_shape();
        let copy = shape.clone();
        assert!(shape.write_buffer_range(BufferKind::Vertices, 0, &[5.0]));
        copy.read(|b| assert_eq!(b.vertices[0], 0.0));
        assert!(!copy.is_morphing());
    }

    #[test]
    fn line_shape_buffers() {
        let line = Line::new([Vec3::ZERO, Vec3::X], BLUE).unwrap();
        let shape = Shape::from_lines(vec![line], 2.5).unwrap();
        assert_eq!(shape.color_mode(), ColorMode::Uniform);
        assert!((shape.line_width() - 2.5).abs() < 1e-6);
        shape.read(|b| {
            assert_eq!(b.line_vertices.len(), 6);
            assert_eq!(b.line_colors.len(), 8);
            assert_eq!(&b.line_colors[0..4], &BLUE);
        });
        assert!(Shape::from_lines(vec![line], 0.0).is_none());
    }

    #[test]
    fn byte_views_match_float_buffers() {
        let shape = unit_shape();
        shape.read(|b| {
            assert_eq!(b.vertex_bytes().len(), b.vertices.len() * 4);
            assert_eq!(b.color_bytes().len(), b.colors.len() * 4);
        });
    }
}
