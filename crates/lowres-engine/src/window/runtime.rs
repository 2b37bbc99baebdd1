use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::frame::{display_metrics, drive_frame, FrameState};
use crate::core::{App, AppControl};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, Key, KeyState};
use crate::render::{AtlasImage, Renderer, RendererConfig};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lowres".to_string(),
            // 4× the default game resolution.
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the GPU context and renderer, and runs `app` until
    /// it exits or the window closes.
    ///
    /// Startup failures (window, GPU, renderer) are returned after the loop stops.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        renderer_config: RendererConfig,
        atlas: AtlasImage,
        app: A,
    ) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            renderer_config,
            atlas,
            app,
            window: None,
            renderer: None,
            frame: FrameState::default(),
            startup_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    renderer_config: RendererConfig,
    atlas: AtlasImage,
    app: A,

    window: Option<WindowEntry>,
    renderer: Option<Renderer>,
    frame: FrameState,

    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let (atlas, config) = (&self.atlas, self.renderer_config.clone());
        let mut renderer = entry.with_gpu(|gpu| Renderer::new(gpu, atlas, config))?;

        entry.with(|fields| {
            renderer.resize(fields.gpu, display_metrics(fields.window));
            fields.window.request_redraw();
        });

        self.window = Some(entry);
        self.renderer = Some(renderer);
        self.frame.clock.reset();
        Ok(())
    }

    fn handle_resize(&mut self) {
        let (Some(entry), Some(renderer)) = (self.window.as_mut(), self.renderer.as_mut()) else {
            return;
        };

        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            fields.gpu.resize(size);
            renderer.resize(fields.gpu, display_metrics(fields.window));
            fields.window.request_redraw();
        });
    }

    fn redraw(&mut self) -> AppControl {
        let (Some(entry), Some(renderer)) = (self.window.as_mut(), self.renderer.as_mut()) else {
            return AppControl::Continue;
        };
        let (app, frame) = (&mut self.app, &mut self.frame);

        entry.with_mut(|fields| drive_frame(app, frame, renderer, fields.gpu, fields.window))
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Continuous redraw.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(ev) = translate_input_event(&event) {
            self.frame.input.apply_event(&mut self.frame.input_frame, ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.handle_resize();
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn translate_input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
