//! Keyboard input.
//!
//! Public API does not expose winit types; the runtime translates platform
//! events into `InputEvent`s before they reach `InputState`.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
