use winit::event::WindowEvent;

use crate::scene::SpriteBatch;

use super::ctx::UpdateCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game-side contract driven once per frame by the runtime.
pub trait App {
    /// Raw window events, before the runtime handles resize/close.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Advances game state. Runs before the batch is rebuilt.
    fn update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl;

    /// Fills this frame's batch. The batch is empty on entry.
    fn draw(&self, batch: &mut SpriteBatch, anim_tick: u64);
}
