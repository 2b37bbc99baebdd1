use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// The window's swapchain: surface, its active configuration and drawable size.
pub(super) struct SurfaceState<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

/// Format frames are rendered through: always the sRGB variant of `format`.
///
/// The offscreen target holds sRGB-encoded texels; writing through an sRGB view
/// re-encodes them correctly even on a plain `Unorm` swapchain.
pub(super) fn render_view_format(format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    format.add_srgb_suffix()
}

/// Extra view formats the swapchain must allow for `render_view_format`.
pub(super) fn extra_view_formats(format: wgpu::TextureFormat) -> Vec<wgpu::TextureFormat> {
    let view = render_view_format(format);
    if view == format { Vec::new() } else { vec![view] }
}

impl<'w> SurfaceState<'w> {
    pub(super) fn new(
        surface: wgpu::Surface<'w>,
        config: wgpu::SurfaceConfiguration,
        size: PhysicalSize<u32>,
    ) -> Self {
        Self { surface, config, size }
    }

    #[inline]
    pub(super) fn view_format(&self) -> wgpu::TextureFormat {
        render_view_format(self.config.format)
    }

    #[inline]
    pub(super) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    #[inline]
    fn is_drawable(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    pub(super) fn configure(&self, device: &wgpu::Device) {
        if self.is_drawable() {
            self.surface.configure(device, &self.config);
        }
    }

    /// wgpu cannot configure a 0×0 surface; a minimized window only records the size.
    pub(super) fn resize(&mut self, device: &wgpu::Device, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if !self.is_drawable() {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.configure(device);
    }

    pub(super) fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Lost/Outdated reconfigure in place; OOM is the only fatal case.
    pub(super) fn recover(&self, device: &wgpu::Device, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.configure(device);
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

/// First sRGB format when asked for one, otherwise the surface's preferred format.
///
/// Either way frames are rendered through an sRGB view (see `render_view_format`).
pub(super) fn choose_format(caps: &wgpu::SurfaceCapabilities, prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let srgb = caps.formats.iter().copied().find(|f| f.is_srgb());
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => caps.formats.first().copied(),
    }
}

pub(super) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        return requested;
    }
    log::warn!("present mode {requested:?} unsupported, falling back to Fifo");
    wgpu::PresentMode::Fifo
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn srgb_format_is_preferred_when_asked() {
        let c = caps(vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ]);
        assert_eq!(choose_format(&c, true), Some(wgpu::TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn linear_swapchain_is_rendered_through_an_srgb_view() {
        let format = wgpu::TextureFormat::Bgra8Unorm;
        assert_eq!(render_view_format(format), wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(extra_view_formats(format), vec![wgpu::TextureFormat::Bgra8UnormSrgb]);
    }

    #[test]
    fn srgb_swapchain_needs_no_extra_view_format() {
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        assert_eq!(render_view_format(format), format);
        assert!(extra_view_formats(format).is_empty());
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_format(&caps(Vec::new()), true), None);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(choose_present_mode(&c, wgpu::PresentMode::Mailbox), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn unsupported_alpha_mode_uses_first_supported() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }
}
