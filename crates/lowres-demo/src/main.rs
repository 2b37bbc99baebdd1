mod atlas;

use anyhow::Result;

use lowres_engine::coords::GAME_RESOLUTION;
use lowres_engine::core::{App, AppControl, UpdateCtx};
use lowres_engine::device::GpuInit;
use lowres_engine::input::{InputState, Key};
use lowres_engine::logging::{init_logging, LoggingConfig};
use lowres_engine::render::RendererConfig;
use lowres_engine::scene::{Sprite, SpriteBatch, Tint};
use lowres_engine::window::{Runtime, RuntimeConfig};

use atlas::Sheet;

/// Player speed in game pixels per second.
const PLAYER_SPEED: f32 = 72.0;
const PLAYER_SIZE: f32 = 16.0;
const GROUND_HEIGHT: f32 = 16.0;

const COIN_GOLD: Tint = Tint::rgb(255, 200, 40);

const COINS: [[i32; 2]; 5] = [[40, 60], [88, 92], [150, 48], [212, 110], [268, 70]];
const BUSHES: [[i32; 2]; 3] = [[24, 16], [120, 16], [250, 16]];

struct Demo {
    sheet: Sheet,
    /// Bottom-left of the player sprite, in game pixels.
    player: [f32; 2],
    facing_left: bool,
}

impl Demo {
    fn new() -> Self {
        Self {
            sheet: Sheet::new(),
            player: [152.0, GROUND_HEIGHT],
            facing_left: false,
        }
    }

    fn step(&mut self, input: &InputState, dt: f32) {
        let dx = (input.axis(Key::ArrowLeft, Key::ArrowRight) + input.axis(Key::A, Key::D)).clamp(-1, 1);
        let dy = (input.axis(Key::ArrowDown, Key::ArrowUp) + input.axis(Key::S, Key::W)).clamp(-1, 1);

        if dx != 0 {
            self.facing_left = dx < 0;
        }

        let max_x = GAME_RESOLUTION.width as f32 - PLAYER_SIZE;
        let max_y = GAME_RESOLUTION.height as f32 - PLAYER_SIZE;
        self.player[0] = (self.player[0] + dx as f32 * PLAYER_SPEED * dt).clamp(0.0, max_x);
        self.player[1] = (self.player[1] + dy as f32 * PLAYER_SPEED * dt).clamp(GROUND_HEIGHT, max_y);
    }
}

impl App for Demo {
    fn update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.step(ctx.input, ctx.time.dt);
        AppControl::Continue
    }

    fn draw(&self, batch: &mut SpriteBatch, anim_tick: u64) {
        let sheet = &self.sheet;

        for x in (0..GAME_RESOLUTION.width as i32).step_by(16) {
            batch.push_sprite(&Sprite::new(&sheet.ground, [x, 0]), anim_tick);
        }

        for pos in BUSHES {
            batch.push_sprite(&Sprite::new(&sheet.bush, pos), anim_tick);
        }
        // Doubled bush in the background row.
        batch.push_sprite(
            &Sprite::new(&sheet.bush, [180, 16])
                .scaled([2, 2])
                .tinted(Tint::rgb(180, 220, 180)),
            anim_tick,
        );

        for (i, pos) in COINS.into_iter().enumerate() {
            // Offset each coin's animation so they don't spin in lockstep.
            let tick = anim_tick + i as u64;
            let bob = (tick / 4 % 2) as i32;
            let mut coin = Sprite::new(&sheet.coin, [pos[0], pos[1] + bob]).tinted(COIN_GOLD);
            if i == COINS.len() - 1 {
                coin = coin.tinted(COIN_GOLD.with_alpha(0.5));
            }
            batch.push_sprite(&coin, tick);
        }

        // Mirroring flips about `position`, so shift right by one width to stay put.
        let [x, y] = [self.player[0] as i32, self.player[1] as i32];
        let player = if self.facing_left {
            Sprite::new(&sheet.player, [x + PLAYER_SIZE as i32, y]).scaled([-1, 1])
        } else {
            Sprite::new(&sheet.player, [x, y])
        };
        batch.push_sprite(&player, anim_tick);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let atlas = atlas::load()?;
    log::info!("atlas {}x{}", atlas.width(), atlas.height());

    Runtime::run(
        RuntimeConfig {
            title: "lowres demo".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        RendererConfig::default(),
        atlas,
        Demo::new(),
    )
}

#[cfg(test)]
mod tests {
    use lowres_engine::input::{InputEvent, InputFrame, KeyState};

    use super::*;

    fn hold(keys: &[Key]) -> InputState {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            input.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
        }
        input
    }

    #[test]
    fn player_moves_and_faces_left() {
        let mut demo = Demo::new();
        demo.step(&hold(&[Key::ArrowLeft]), 0.5);
        assert_eq!(demo.player, [152.0 - 36.0, GROUND_HEIGHT]);
        assert!(demo.facing_left);
    }

    #[test]
    fn arrows_and_wasd_do_not_stack() {
        let mut demo = Demo::new();
        demo.step(&hold(&[Key::ArrowRight, Key::D]), 0.5);
        assert_eq!(demo.player[0], 152.0 + 36.0);
    }

    #[test]
    fn player_stays_on_screen() {
        let mut demo = Demo::new();
        demo.step(&hold(&[Key::ArrowLeft, Key::ArrowDown]), 10.0);
        assert_eq!(demo.player, [0.0, GROUND_HEIGHT]);

        demo.step(&hold(&[Key::ArrowRight, Key::ArrowUp]), 10.0);
        assert_eq!(demo.player, [304.0, 164.0]);
    }

    #[test]
    fn draw_fills_the_scene_in_layer_order() {
        let demo = Demo::new();
        let mut batch = SpriteBatch::default();
        demo.draw(&mut batch, 0);

        let ground = (GAME_RESOLUTION.width / 16) as usize;
        assert_eq!(batch.len(), ground + BUSHES.len() + 1 + COINS.len() + 1);
        assert_eq!(batch.dropped(), 0);

        // Player is last, so it lands on top.
        let last = batch.instances()[batch.len() - 1];
        assert_eq!(last.position, [152.0, GROUND_HEIGHT]);
        assert_eq!(last.size, [16.0, 16.0]);
    }
}
