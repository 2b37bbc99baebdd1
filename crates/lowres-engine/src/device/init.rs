/// GPU setup knobs. `Default` suits the sprite renderer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// Falls back to FIFO (always supported) when unavailable.
    pub present_mode: wgpu::PresentMode,

    /// Ignored if unsupported; the surface's first mode is used instead.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Sprite work is light; an integrated GPU is enough.
    pub power_preference: wgpu::PowerPreference,

    /// Baseline device limits. Texture size limits are raised to the adapter's.
    pub required_limits: wgpu::Limits,

    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
