//! Coordinate spaces and the scale math between them.
//!
//! Spaces:
//! - Game pixels: fixed resolution, origin bottom-left, +Y up
//! - Clip space: what the sprite shader emits for the offscreen target
//! - Physical pixels: the window surface, origin top-left
//!
//! Everything in here is plain data or a pure function.

mod color;
pub mod viewport;

pub use color::ColorRgba;
pub use viewport::{
    pixel_perfect_viewport, pixel_to_clip, pixel_to_viewport_multiplier, resolution_scale,
    DisplayMetrics, GameResolution, ViewportRect, GAME_RESOLUTION,
};
