//! # meshmorph
//!
//! Procedural mesh construction and real-time shape morphing.
//!
//! The crate builds CPU-side geometry ([`factory`]) out of colored
//! triangles and lines ([`primitive`]), wraps it in a [`shape::Shape`]
//! carrying transform state and flattened render buffers, and optionally
//! animates buffer ranges from a background [`morph`] loop while a renderer
//! concurrently reads them through the [`render`] contract.

pub mod color;
pub mod factory;
pub mod math;
pub mod morph;
pub mod primitive;
pub mod render;
pub mod shape;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version on startup.
pub fn init() {
    log::info!("meshmorph v{VERSION} initialized");
}
