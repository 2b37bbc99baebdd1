use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SurfaceState};
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// The window's GPU: device, queue and swapchain.
///
/// Borrows the window for the surface's lifetime, so the runtime keeps both in one
/// self-referencing entry.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: SurfaceState<'w>,
}

impl<'w> Gpu<'w> {
    /// Acquires adapter and device and configures the swapchain for `window`.
    ///
    /// Any failure here is fatal: the renderer has no fallback resource set.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let raw_surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&raw_surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        // Large or HiDPI displays need a swapchain past the default texture limit.
        let required_limits = init.required_limits.using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lowres device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = raw_surface.get_capabilities(&adapter);
        let format = surface::choose_format(&caps, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: surface::choose_present_mode(&caps, init.present_mode),
            alpha_mode: surface::choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: surface::extra_view_formats(format),
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        let surface = SurfaceState::new(raw_surface, config, size);
        surface.configure(&device);
        log::debug!(
            "swapchain {format:?} (rendered as {:?}) {}x{}",
            surface.view_format(),
            size.width,
            size.height
        );

        Ok(Self {
            _instance: instance,
            device,
            queue,
            surface,
        })
    }

    /// Format of the per-frame swapchain view; always sRGB.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface.view_format()
    }

    /// Drawable size in physical pixels. 0×0 while minimized.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.surface.size()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface.resize(&self.device, new_size);
    }

    /// Acquires the next swapchain image and opens the frame's command encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.acquire()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.surface.view_format()),
                ..Default::default()
            });

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lowres frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents the swapchain image.
    pub fn present(&self, frame: GpuFrame, window: &Window) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        self.surface.recover(&self.device, err)
    }
}
