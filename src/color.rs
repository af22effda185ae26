//! RGBA colors, validation, and the shared palette.

/// An RGBA color. Each component must lie in `[0, 1]`.
pub type Color = [f32; 4];

pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
pub const MAGENTA: Color = [1.0, 0.0, 1.0, 1.0];
pub const ORANGE: Color = [1.0, 0.5, 0.0, 1.0];
pub const GRAY: Color = [0.5, 0.5, 0.5, 1.0];
pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];

/// Whether every component of `color` lies in `[0, 1]`.
pub fn is_valid_color(color: &Color) -> bool {
    color.iter().all(|c| (0.0..=1.0).contains(c))
}

/// Whether `colors` is a non-empty set of valid colors.
pub fn is_valid_color_set(colors: &[Color]) -> bool {
    !colors.is_empty() && colors.iter().all(is_valid_color)
}

/// Cyclic lookup: `colors[i % colors.len()]`.
///
/// Callers must have validated the set first; an empty set panics.
pub fn cycle(colors: &[Color], i: usize) -> Color {
    colors[i % colors.len()]
}
