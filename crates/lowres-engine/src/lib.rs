//! Lowres engine crate.
//!
//! A small 2D sprite renderer: scenes are drawn at a fixed low resolution into an
//! offscreen target, then upscaled by an integer factor to the window.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod scene;
