use anyhow::{Context, Result};
use winit::window::Window;

use crate::coords::{
    pixel_perfect_viewport, resolution_scale, DisplayMetrics, GameResolution, ViewportRect,
};
use crate::device::Gpu;
use crate::scene::{SpriteBatch, SpriteInstance, Tint};

use super::common::UnitQuad;
use super::{AtlasImage, DisplayPass, OffscreenPass, RenderCtx, RendererConfig};

/// All renderer state: the sprite batch and every GPU resource of both passes.
///
/// Created once at startup and passed explicitly to whoever drives frames.
/// Per frame: `begin_frame` → fill `batch_mut()` / `draw` → `render`.
pub struct Renderer {
    config: RendererConfig,
    batch: SpriteBatch,

    quad: UnitQuad,
    offscreen: OffscreenPass,
    display: DisplayPass,

    scale: u32,
    viewport: ViewportRect,

    warned_overflow: bool,
}

impl Renderer {
    /// Builds the fixed GPU resource set. Any error is fatal to startup.
    ///
    /// # Panics
    /// Panics if `config` is invalid (see `RendererConfig::validate`).
    pub fn new(gpu: &Gpu<'_>, atlas: &AtlasImage, config: RendererConfig) -> Result<Self> {
        config.validate();

        let ctx = RenderCtx::from_gpu(gpu);

        let quad = UnitQuad::new(ctx.device);
        let offscreen = OffscreenPass::new(
            &ctx,
            config.game,
            config.sprite_budget,
            config.offscreen_clear,
            atlas,
        )
        .context("failed to create offscreen pass")?;
        let display = DisplayPass::new(&ctx, offscreen.color_view(), config.display_clear);

        log::info!(
            "renderer ready: {}x{} game, {} sprite budget",
            config.game.width,
            config.game.height,
            config.sprite_budget
        );

        Ok(Self {
            batch: SpriteBatch::with_capacity(config.sprite_budget),
            config,
            quad,
            offscreen,
            display,
            scale: 1,
            viewport: ViewportRect::default(),
            warned_overflow: false,
        })
    }

    /// Resize / DPI-change hook: recomputes the pixel → viewport multiplier now.
    pub fn resize(&mut self, gpu: &Gpu<'_>, display: DisplayMetrics) {
        self.offscreen.update_multiplier(gpu.queue());
        self.refresh_viewport(display);
        log::debug!(
            "display {}x{} @{}: scale {}, viewport {:?}",
            display.width,
            display.height,
            display.dpi_scale,
            self.scale,
            self.viewport
        );
    }

    /// Starts a frame: recompute scale/viewport for `display`, empty the batch.
    pub fn begin_frame(&mut self, display: DisplayMetrics) {
        self.refresh_viewport(display);
        self.batch.reset();
    }

    /// This frame's batch.
    #[inline]
    pub fn batch_mut(&mut self) -> &mut SpriteBatch {
        &mut self.batch
    }

    /// Appends one sprite to this frame's batch. Dropped if the budget is spent.
    pub fn draw(
        &mut self,
        location: [u32; 2],
        size: [u32; 2],
        position: [i32; 2],
        scale: [i32; 2],
        color: Tint,
    ) {
        self.batch
            .append(SpriteInstance::new(location, size, position, scale, color));
    }

    /// Uploads the batch, runs both passes and presents.
    pub fn render(&mut self, gpu: &Gpu<'_>, window: &Window) -> Result<(), wgpu::SurfaceError> {
        if self.batch.dropped() > 0 && !self.warned_overflow {
            log::warn!(
                "sprite budget of {} exceeded; {} sprites dropped this frame",
                self.batch.capacity(),
                self.batch.dropped()
            );
            self.warned_overflow = true;
        }

        self.offscreen.upload(gpu.queue(), &self.batch);

        let mut frame = gpu.begin_frame()?;

        self.offscreen
            .encode(&mut frame.encoder, &self.quad, self.batch.len() as u32);

        self.display
            .encode(&mut frame.encoder, &frame.view, &self.quad, self.viewport);

        gpu.present(frame, window);
        Ok(())
    }

    fn refresh_viewport(&mut self, display: DisplayMetrics) {
        (self.scale, self.viewport) = display_viewport(display, self.config.game);
    }
}

/// Integer scale and the viewport the display pass draws into, as is.
///
/// On a display smaller than the game the rect overhangs the surface and the game is
/// cropped around its centre at 1:1.
fn display_viewport(display: DisplayMetrics, game: GameResolution) -> (u32, ViewportRect) {
    let scale = resolution_scale(display, game);
    (scale, pixel_perfect_viewport(display, scale, game))
}
