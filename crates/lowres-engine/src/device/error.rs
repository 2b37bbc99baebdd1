/// What the frame loop does after a failed swapchain acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface reconfigured; the next frame draws normally.
    Reconfigured,
    SkipFrame,
    /// Out of memory. The runtime exits.
    Fatal,
}
