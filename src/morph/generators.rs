//! Value-sequence generators consumed by the morph engine.
//!
//! A generator is a small stateful machine: every tick the engine asks it
//! for its next value sequence and writes the result over a fixed range of
//! a shape's flattened buffer.

use glam::{Mat4, Vec3};

use crate::color::{self, Color};
use crate::math;

/// A stateful producer of per-tick buffer values.
pub trait Generator: Send {
    /// The next value sequence. The length should stay constant across
    /// calls, since the engine writes at a fixed offset.
    fn next_values(&mut self) -> Vec<f32>;
}

/// Oscillates a single value between two bounds.
///
/// Each call adds the step; the step's sign flips whenever the next value
/// would leave the bounds, so the value bounces indefinitely.
pub struct Oscillation {
    value: f32,
    step: f32,
    lower: f32,
    upper: f32,
}

impl Oscillation {
    /// `None` unless `lower < upper`, `start` lies inside the bounds, and
    /// the step is finite and non-zero.
    pub fn new(start: f32, step: f32, lower: f32, upper: f32) -> Option<Self> {
        if !(lower < upper)
            || !(lower..=upper).contains(&start)
            || step == 0.0
            || !step.is_finite()
        {
            log::warn!("oscillation rejected: start {start}, step {step}, bounds [{lower}, {upper}]");
            return None;
        }
        Some(Self {
            value: start,
            step,
            lower,
            upper,
        })
    }
}

impl Generator for Oscillation {
    fn next_values(&mut self) -> Vec<f32> {
        let next = self.value + self.step;
        if next > self.upper || next < self.lower {
            self.step = -self.step;
        }
        self.value += self.step;
        vec![self.value]
    }
}

/// Rotates a fixed set of reference points about an axis, advancing the
/// angle each tick.
///
/// The reference points are never mutated; every call rotates them by the
/// accumulated angle and returns the rotated coordinates, flattened.
pub struct Rotation {
    reference: Vec<Vec3>,
    axis: Vec3,
    step_angle: f32,
    accumulated: f32,
}

impl Rotation {
    /// `None` for an empty point set, a zero-length axis, or a non-finite
    /// angle step.
    pub fn new(reference: Vec<Vec3>, axis: Vec3, step_angle: f32) -> Option<Self> {
        if reference.is_empty() || !step_angle.is_finite() {
            log::warn!("rotation generator rejected: empty points or bad step");
            return None;
        }
        if axis.length_squared() < math::EPSILON * math::EPSILON {
            log::warn!("rotation generator rejected: zero axis");
            return None;
        }
        Some(Self {
            reference,
            axis: axis.normalize(),
            step_angle,
            accumulated: 0.0,
        })
    }
}

impl Generator for Rotation {
    fn next_values(&mut self) -> Vec<f32> {
        self.accumulated += self.step_angle;
        let m = Mat4::from_axis_angle(self.axis, self.accumulated);
        self.reference
            .iter()
            .flat_map(|p| {
                let r = m.transform_point3(*p);
                [r.x, r.y, r.z]
            })
            .collect()
    }
}

/// Sweeps between two colors, emitting one RGBA quadruple replicated over
/// many buffer slots.
///
/// The per-component step is a shared fraction of each component's
/// interval, so all four components reach both endpoints simultaneously.
/// The sweep bounces between the endpoints like [`Oscillation`].
pub struct ColorSweep {
    start: Color,
    end: Color,
    fraction_step: f32,
    t: f32,
    replicate: usize,
}

impl ColorSweep {
    /// `fraction_step` is the share of the start→end interval covered per
    /// tick, in `(0, 1]`. `replicate` is the number of RGBA slots painted
    /// per call (e.g. the vertex count of the range). `None` on invalid
    /// colors, step, or a zero replicate count.
    pub fn new(start: Color, end: Color, fraction_step: f32, replicate: usize) -> Option<Self> {
        if !color::is_valid_color(&start) || !color::is_valid_color(&end) {
            log::warn!("color sweep rejected: invalid colors");
            return None;
        }
        if !(fraction_step > 0.0 && fraction_step <= 1.0) || replicate == 0 {
            log::warn!("color sweep rejected: step {fraction_step}, replicate {replicate}");
            return None;
        }
        Some(Self {
            start,
            end,
            fraction_step,
            t: 0.0,
            replicate,
        })
    }
}

impl Generator for ColorSweep {
    fn next_values(&mut self) -> Vec<f32> {
        let next = self.t + self.fraction_step;
        if next > 1.0 || next < 0.0 {
            self.fraction_step = -self.fraction_step;
        }
        self.t += self.fraction_step;
        let mut quad = [0.0f32; 4];
        for (i, q) in quad.iter_mut().enumerate() {
            *q = self.start[i] + self.t * (self.end[i] - self.start[i]);
        }
        let mut out = Vec::with_capacity(self.replicate * 4);
        for _ in 0..self.replicate {
            out.extend_from_slice(&quad);
        }
        out
    }
}
