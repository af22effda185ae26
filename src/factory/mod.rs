//! Procedural mesh construction.
//!
//! Every builder validates its geometric and color parameters up front and
//! returns `None` instead of panicking on invalid input (negative radii,
//! too few corners, wrong-length color sets, non-positive line widths).
//! Returned shapes are always fully formed.
//!
//! - [`regular_polygon`] - fan-triangulated n-gon
//! - [`cuboid`] / [`wire_cuboid`] - filled and wireframe boxes
//! - [`pyramid`] / [`frustum`] / [`prism`] - polygon-based solids
//! - [`sphere`] / [`hemisphere`] - iterative subdivision spheres
//! - [`torus`] / [`ring`] - circular sweeps and annuli
//! - [`join`] - bake per-shape transforms and merge into one shape

mod cuboid;
mod join;
mod polygon;
mod pyramid;
mod ring;
mod sphere;
mod torus;

pub use cuboid::{cuboid, wire_cuboid};
pub use join::{join, JoinPart, PartTransform};
pub use polygon::regular_polygon;
pub use pyramid::{frustum, prism, pyramid};
pub use ring::ring;
pub use sphere::{hemisphere, sphere};
pub use torus::torus;

use glam::Vec3;

use crate::primitive::Triangle;

/// Flip `triangle` if its face normal points against `outward`.
///
/// The side faces of swept solids are assembled from polygon edges whose
/// winding depends on the sweep direction; this makes every face normal
/// consistent for lighting.
pub(crate) fn orient_outward(triangle: &mut Triangle, outward: Vec3) {
    if triangle.normal().dot(outward) < 0.0 {
        triangle.flip_winding();
    }
}

/// Centroid of a triangle, used to derive outward directions.
pub(crate) fn centroid(triangle: &Triangle) -> Vec3 {
    let [a, b, c] = triangle.positions();
    (a + b + c) / 3.0
}
