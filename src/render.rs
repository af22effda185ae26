//! The rendering collaborator contract.
//!
//! Shader compilation, texture upload, and the per-frame draw call sequence
//! live outside this crate; a backend implements [`ShapeRenderer`] against
//! the CPU-side buffers and matrices a [`Shape`] exposes. The shape derives
//! its model-view and model-view-projection products from its own model
//! matrix and changes no public state during a draw.

use glam::{Mat4, Vec3};

use crate::shape::Shape;

/// Per-frame draw inputs, supplied by the caller each frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    /// Combined view-projection matrix.
    pub view_projection: Mat4,
    /// View matrix alone, for eye-space lighting.
    pub view: Mat4,
    /// World-space point light position, if a point light is active.
    pub point_light_position: Option<Vec3>,
    /// Directional light vector, if a directional light is active.
    pub directional_light: Option<Vec3>,
    /// Share of lighting contributed by the point light, `[0, 1]`.
    pub point_light_share: f32,
    /// Ambient light share, `[0, 1]`.
    pub ambient_light: f32,
}

impl DrawParams {
    /// Unlit defaults with identity matrices.
    pub fn new() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            point_light_position: None,
            directional_light: None,
            point_light_share: 0.0,
            ambient_light: 1.0,
        }
    }

    /// The shape's model-view-projection product for this frame.
    pub fn mvp(&self, shape: &Shape) -> Mat4 {
        shape.model_view_projection(&self.view_projection)
    }

    /// The shape's model-view product for this frame.
    pub fn model_view(&self, shape: &Shape) -> Mat4 {
        shape.model_view(&self.view)
    }
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendering backend, implemented outside this crate.
pub trait ShapeRenderer {
    type Error;

    /// One-time preparation (program compilation, buffer allocation) before
    /// the first draw of `shape`.
    fn compile(&mut self, shape: &Shape) -> Result<(), Self::Error>;

    /// Draw `shape` for one frame. Buffers should be read through
    /// [`Shape::read`] so the whole frame sees one consistent morph tick.
    fn draw(&mut self, shape: &Shape, params: &DrawParams) -> Result<(), Self::Error>;
}
