//! Per-frame sequencing.

use winit::window::Window;

use crate::coords::DisplayMetrics;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::Renderer;
use crate::time::{AnimationClock, FrameClock};

use super::{App, AppControl, UpdateCtx};

/// Clocks and input owned by the runtime on behalf of the frame loop.
#[derive(Debug, Default)]
pub(crate) struct FrameState {
    pub clock: FrameClock,
    pub animation: AnimationClock,
    pub input: InputState,
    pub input_frame: InputFrame,
}

/// Display metrics of `window` as it is right now.
pub(crate) fn display_metrics(window: &Window) -> DisplayMetrics {
    let size = window.inner_size();
    DisplayMetrics::new(
        size.width as f32,
        size.height as f32,
        window.scale_factor() as f32,
    )
}

/// Runs one frame, in order:
/// clock tick → animation tick → app update (input) → scale/viewport + batch reset
/// → batch fill → upload, offscreen pass, display pass, present.
pub(crate) fn drive_frame<A: App>(
    app: &mut A,
    state: &mut FrameState,
    renderer: &mut Renderer,
    gpu: &mut Gpu<'_>,
    window: &Window,
) -> AppControl {
    let time = state.clock.tick();
    let anim_tick = state.animation.advance(time.dt);
    let display = display_metrics(window);

    let control = app.update(&UpdateCtx {
        time,
        anim_tick,
        input: &state.input,
        input_frame: &state.input_frame,
        display,
    });
    state.input_frame.clear();

    if control == AppControl::Exit {
        return AppControl::Exit;
    }

    // Minimized: keep simulating, skip drawing.
    if !display.is_drawable() {
        return AppControl::Continue;
    }

    renderer.begin_frame(display);
    app.draw(renderer.batch_mut(), anim_tick);

    match renderer.render(gpu, window) {
        Ok(()) => AppControl::Continue,
        Err(err) => match gpu.handle_surface_error(err.clone()) {
            SurfaceErrorAction::Fatal => {
                log::error!("surface error is unrecoverable: {err}");
                AppControl::Exit
            }
            action => {
                log::debug!("frame skipped after {err}: {action:?}");
                AppControl::Continue
            }
        },
    }
}
