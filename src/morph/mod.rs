//! Background buffer morphing.
//!
//! A morph loop periodically overwrites ranges of one shape's flattened
//! buffers to animate it, while a renderer concurrently reads the same
//! buffers. The loop only ever touches the derived buffers — the shape's
//! primitives are left alone, so primitive-level queries keep reporting the
//! original geometry while the rendered image morphs.
//!
//! Cancellation is cooperative: a [`CancellationToken`] is checked at tick
//! boundaries only, never mid-write, so a reader always sees whole ticks.

mod generators;

pub use generators::{ColorSweep, Generator, Oscillation, Rotation};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::shape::{BufferKind, Shape};

/// Errors from starting a morph loop.
#[derive(Debug, Error)]
pub enum MorphError {
    /// The shape already has a running morph loop.
    #[error("shape already has a running morph loop")]
    AlreadyRunning,
    /// The tick rate must be positive and finite.
    #[error("invalid tick rate: {0} ticks per second")]
    InvalidRate(f32),
    /// At least one generator binding is required.
    #[error("no generator bindings")]
    NoBindings,
}

/// Token that signals cancellation to the morph loop.
///
/// Cloning a token creates another handle to the same flag; cancelling any
/// clone affects all. The loop honors it only between ticks.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// One generator wired to a buffer range: every tick the generator's next
/// values overwrite `target` starting at `offset` (in floats).
pub struct MorphBinding {
    pub generator: Box<dyn Generator>,
    pub target: BufferKind,
    pub offset: usize,
}

impl MorphBinding {
    pub fn new(generator: impl Generator + 'static, target: BufferKind, offset: usize) -> Self {
        Self {
            generator: Box::new(generator),
            target,
            offset,
        }
    }
}

/// Starts per-shape background morph loops.
pub struct MorphEngine;

impl MorphEngine {
    /// Start a morph loop over `shape` at `ticks_per_second`.
    ///
    /// A shape owns at most one loop at a time; a second start fails with
    /// [`MorphError::AlreadyRunning`] until the first handle is stopped or
    /// dropped. Each tick pulls every binding's next values and writes them
    /// under the shape lock, one acquisition per binding, so a concurrent
    /// reader never observes a partially written range.
    pub fn start(
        shape: Arc<Shape>,
        ticks_per_second: f32,
        mut bindings: Vec<MorphBinding>,
    ) -> Result<MorphHandle, MorphError> {
        if !(ticks_per_second > 0.0) || !ticks_per_second.is_finite() {
            return Err(MorphError::InvalidRate(ticks_per_second));
        }
        if bindings.is_empty() {
            return Err(MorphError::NoBindings);
        }
        if !shape.try_acquire_morph_slot() {
            return Err(MorphError::AlreadyRunning);
        }

        let token = CancellationToken::new();
        let loop_token = token.clone();
        let loop_shape = Arc::clone(&shape);
        let period = Duration::from_secs_f32(1.0 / ticks_per_second);
        log::debug!(
            "morph loop starting: {} bindings at {ticks_per_second} ticks/s",
            bindings.len()
        );

        let thread = thread::Builder::new()
            .name("morph".into())
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    if loop_token.is_cancelled() {
                        break;
                    }
                    for binding in &mut bindings {
                        let values = binding.generator.next_values();
                        if !loop_shape.write_buffer_range(binding.target, binding.offset, &values) {
                            log::warn!(
                                "morph write skipped: {:?} range at {} no longer fits",
                                binding.target,
                                binding.offset
                            );
                        }
                    }
                    log::trace!("morph tick applied");
                }
                loop_shape.release_morph_slot();
                log::debug!("morph loop stopped");
            })
            .expect("spawning the morph thread");

        Ok(MorphHandle {
            token,
            thread: Some(thread),
        })
    }
}

/// Handle to a running morph loop; stopping (or dropping) cancels the loop
/// at the next tick boundary and joins the thread.
pub struct MorphHandle {
    token: CancellationToken,
    thread: Option<JoinHandle<()>>,
}

impl MorphHandle {
    /// Request cancellation without waiting. Takes effect at the next tick
    /// boundary.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait for the loop to exit. After this returns, the shape
    /// accepts a new morph loop.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.token.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for MorphHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
