use crate::coords::DisplayMetrics;
use crate::input::{InputFrame, InputState};
use crate::time::FrameTime;

/// What `App::update` gets to look at.
pub struct UpdateCtx<'a> {
    /// Clamped frame timing.
    pub time: FrameTime,
    /// Animation tick after this frame's advance.
    pub anim_tick: u64,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    /// Display the frame will be presented on.
    pub display: DisplayMetrics,
}
