//! GPU rendering.
//!
//! Two passes per frame:
//! - offscreen: the sprite batch, instanced, into a fixed game-resolution target
//! - display: that target, nearest-sampled, into a pixel-perfect viewport on the
//!   swapchain
//!
//! `Renderer` owns every GPU resource of both passes.

mod atlas;
mod common;
mod config;
mod ctx;
mod display;
mod offscreen;
mod renderer;

pub use atlas::AtlasImage;
pub use config::RendererConfig;
pub use ctx::RenderCtx;
pub use display::DisplayPass;
pub use offscreen::{OffscreenPass, SpriteGlobals, DEPTH_FORMAT, OFFSCREEN_FORMAT};
pub use renderer::Renderer;
