//! Contracts between the runtime and the game.
//!
//! The runtime owns the window, GPU and renderer; the game implements `App` and
//! only ever sees plain data (`UpdateCtx`) and the sprite batch.

mod app;
mod ctx;
pub(crate) mod frame;

pub use app::{App, AppControl};
pub use ctx::UpdateCtx;
