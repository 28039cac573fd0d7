//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! paces redraws at the display interval.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
