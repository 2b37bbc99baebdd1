//! Time subsystem.
//!
//! - `FrameClock` measures wall-clock frame deltas and clamps them
//! - `AnimationClock` turns clamped deltas into a fixed-cadence animation tick
//!
//! Neither is coupled to the runtime; both take explicit instants or durations
//! so they can be driven from tests.

mod animation;
mod frame_clock;

pub use animation::AnimationClock;
pub use frame_clock::{FrameClock, FrameTime, MAX_FRAME_DT};
