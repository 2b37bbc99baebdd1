//! Per-frame sprite data.
//!
//! Responsibilities:
//! - describe what the host wants drawn (`Sprite`, `SpriteDef`, `Tint`)
//! - hold the GPU-bound per-sprite record (`SpriteInstance`)
//! - collect a frame's records into a fixed-capacity `SpriteBatch`
//!
//! Nothing in here touches the GPU.

mod batch;
mod instance;
mod sprite;

pub use batch::{SpriteBatch, MAX_SPRITES};
pub use instance::SpriteInstance;
pub use sprite::{Sprite, SpriteDef, Tint};
