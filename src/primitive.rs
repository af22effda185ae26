//! Atomic renderable units: colored/textured triangles and colored lines.

use glam::Vec3;

use crate::color::{self, Color};
use crate::math;

/// How a triangle's surface is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coloring {
    /// One color across the whole face.
    Uniform(Color),
    /// One color per vertex, interpolated across the face.
    Gradient([Color; 3]),
    /// Texture coordinates per vertex; the image lives with the renderer.
    Textured([[f32; 2]; 3]),
}

/// Shape-level coloring mode, derived from the first triangle.
///
/// All triangles in one shape share the same mode; the mesh builders
/// guarantee this at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Uniform,
    Gradient,
    Textured,
}

impl Coloring {
    /// The shape-level mode this coloring belongs to.
    pub fn mode(&self) -> ColorMode {
        match self {
            Self::Uniform(_) => ColorMode::Uniform,
            Self::Gradient(_) => ColorMode::Gradient,
            Self::Textured(_) => ColorMode::Textured,
        }
    }
}

/// A triangle in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    positions: [Vec3; 3],
    coloring: Coloring,
}

impl Triangle {
    /// A uniformly colored triangle. `None` if the color is invalid.
    pub fn uniform(positions: [Vec3; 3], color: Color) -> Option<Self> {
        if !color::is_valid_color(&color) {
            return None;
        }
        Some(Self {
            positions,
            coloring: Coloring::Uniform(color),
        })
    }

    /// A per-vertex colored triangle. `None` if any color is invalid.
    pub fn gradient(positions: [Vec3; 3], colors: [Color; 3]) -> Option<Self> {
        if !colors.iter().all(color::is_valid_color) {
            return None;
        }
        Some(Self {
            positions,
            coloring: Coloring::Gradient(colors),
        })
    }

    /// A textured triangle with one UV pair per vertex.
    pub fn textured(positions: [Vec3; 3], uvs: [[f32; 2]; 3]) -> Self {
        Self {
            positions,
            coloring: Coloring::Textured(uvs),
        }
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.positions
    }

    pub fn coloring(&self) -> Coloring {
        self.coloring
    }

    /// Derived unit face normal; `(0, 0, 0)` for degenerate triangles so a
    /// flattened normal buffer can always be produced.
    pub fn normal(&self) -> Vec3 {
        math::face_normal(self.positions[0], self.positions[1], self.positions[2])
            .unwrap_or(Vec3::ZERO)
    }

    /// Swap two vertices, flipping the winding (and thus the face normal).
    pub fn flip_winding(&mut self) {
        self.positions.swap(1, 2);
        if let Coloring::Gradient(ref mut colors) = self.coloring {
            colors.swap(1, 2);
        }
        if let Coloring::Textured(ref mut uvs) = self.coloring {
            uvs.swap(1, 2);
        }
    }

    /// Apply `f` to every vertex position.
    pub fn map_positions(&mut self, mut f: impl FnMut(Vec3) -> Vec3) {
        for p in &mut self.positions {
            *p = f(*p);
        }
    }

    /// Replace the coloring with a uniform color. `false` if invalid.
    pub fn set_uniform_color(&mut self, color: Color) -> bool {
        if !color::is_valid_color(&color) {
            return false;
        }
        self.coloring = Coloring::Uniform(color);
        true
    }
}

/// A line segment with one color and two endpoints in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    endpoints: [Vec3; 2],
    color: Color,
}

impl Line {
    /// `None` if the color is invalid.
    pub fn new(endpoints: [Vec3; 2], color: Color) -> Option<Self> {
        if !color::is_valid_color(&color) {
            return None;
        }
        Some(Self { endpoints, color })
    }

    pub fn endpoints(&self) -> [Vec3; 2] {
        self.endpoints
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Apply `f` to both endpoints.
    pub fn map_positions(&mut self, mut f: impl FnMut(Vec3) -> Vec3) {
        for p in &mut self.endpoints {
            *p = f(*p);
        }
    }

    /// Replace the color. `false` if invalid.
    pub fn set_color(&mut self, color: Color) -> bool {
        if !color::is_valid_color(&color) {
            return false;
        }
        self.color = color;
        true
    }
}
