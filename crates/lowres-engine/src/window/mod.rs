//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the GPU
//! layer, the renderer and the frame loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
