//! Demo sprite sheet.
//!
//! Layout, in texels from the top-left of the sheet:
//!
//! ```text
//!   0,0  player frame 0 (16x16)     16,0  player frame 1 (16x16)
//!  32,0  coin frames 0..4 (8x8 each, left to right)
//!  0,16  ground tile (16x16)        16,16 bush (16x16)
//! ```
//!
//! A PNG with the same layout can replace the generated sheet through
//! `LOWRES_ATLAS=path/to/sheet.png`.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use lowres_engine::render::AtlasImage;
use lowres_engine::scene::SpriteDef;

pub const ATLAS_WIDTH: u32 = 64;
pub const ATLAS_HEIGHT: u32 = 32;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Sprite definitions matching the sheet layout.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub player: SpriteDef,
    pub coin: SpriteDef,
    pub ground: SpriteDef,
    pub bush: SpriteDef,
}

impl Sheet {
    pub fn new() -> Self {
        Self {
            player: SpriteDef::new(vec![[0, 0], [16, 0]], [16, 16]),
            coin: SpriteDef::new(vec![[32, 0], [40, 0], [48, 0], [56, 0]], [8, 8]),
            ground: SpriteDef::still([0, 16], [16, 16]),
            bush: SpriteDef::still([16, 16], [16, 16]),
        }
    }
}

/// Loads the sheet from `LOWRES_ATLAS` if set, otherwise generates it.
pub fn load() -> Result<AtlasImage> {
    let image = match std::env::var_os("LOWRES_ATLAS") {
        Some(path) => decode_png(Path::new(&path))?,
        None => generate(),
    };

    let (width, height) = image.dimensions();
    AtlasImage::from_rgba8(width, height, image.into_raw())
}

fn decode_png(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode atlas {}", path.display()))?
        .to_rgba8();

    anyhow::ensure!(
        image.width() >= ATLAS_WIDTH && image.height() >= ATLAS_HEIGHT,
        "atlas {} is {}x{}, the demo layout needs at least {ATLAS_WIDTH}x{ATLAS_HEIGHT}",
        path.display(),
        image.width(),
        image.height()
    );

    log::info!("atlas loaded from {}", path.display());
    Ok(image)
}

/// Procedural sheet in the documented layout.
pub fn generate() -> RgbaImage {
    RgbaImage::from_fn(ATLAS_WIDTH, ATLAS_HEIGHT, |x, y| match (x, y) {
        (0..32, 0..16) => player_texel(x % 16, y, x >= 16),
        (32..64, 0..8) => coin_texel((x - 32) % 8, y, (x - 32) / 8),
        (0..16, 16..32) => ground_texel(x, y - 16),
        (16..32, 16..32) => bush_texel(x - 16, y - 16),
        _ => CLEAR,
    })
}

fn player_texel(x: u32, y: u32, stride: bool) -> Rgba<u8> {
    let body = Rgba([80, 160, 230, 255]);
    let skin = Rgba([240, 200, 160, 255]);
    let boot = Rgba([60, 40, 30, 255]);

    match y {
        // Head, with one eye towards +x so mirroring is visible.
        2..=6 if (5..=10).contains(&x) => {
            if y == 4 && x == 9 { Rgba([20, 20, 20, 255]) } else { skin }
        }
        7..=12 if (4..=11).contains(&x) => body,
        13..=15 => {
            let (left, right) = if stride { (3..=5, 10..=12) } else { (5..=6, 9..=10) };
            if left.contains(&x) || right.contains(&x) { boot } else { CLEAR }
        }
        _ => CLEAR,
    }
}

fn coin_texel(x: u32, y: u32, frame: u32) -> Rgba<u8> {
    // Spin: the visible half-width shrinks then grows.
    let half_width = [3.5f32, 2.5, 1.0, 2.5][frame as usize];
    let dx = x as f32 + 0.5 - 4.0;
    let dy = y as f32 + 0.5 - 4.0;

    if (dx / half_width).powi(2) + (dy / 3.5).powi(2) <= 1.0 {
        // Untinted white; the demo colors coins with a tint.
        Rgba([255, 255, 255, 255])
    } else {
        CLEAR
    }
}

fn ground_texel(x: u32, y: u32) -> Rgba<u8> {
    match y {
        0..=2 => Rgba([90, 170, 70, 255]),
        _ if (x + y) % 5 == 0 => Rgba([110, 80, 50, 255]),
        _ => Rgba([140, 100, 60, 255]),
    }
}

fn bush_texel(x: u32, y: u32) -> Rgba<u8> {
    let dx = x as i32 - 8;
    let dy = y as i32 - 10;
    if dx * dx + dy * dy <= 36 {
        let shade = if (x * 7 + y * 3) % 4 == 0 { 40 } else { 0 };
        Rgba([40 + shade, 120 + shade, 50, 255])
    } else {
        CLEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_sheet_has_layout_size() {
        let image = generate();
        assert_eq!(image.dimensions(), (ATLAS_WIDTH, ATLAS_HEIGHT));

        let atlas = AtlasImage::from_rgba8(image.width(), image.height(), image.into_raw()).unwrap();
        assert_eq!(atlas.size(), [64.0, 32.0]);
    }

    #[test]
    fn every_sheet_frame_lies_inside_the_atlas() {
        let sheet = Sheet::new();
        for def in [&sheet.player, &sheet.coin, &sheet.ground, &sheet.bush] {
            for frame in &def.frames {
                assert!(frame[0] + def.size[0] <= ATLAS_WIDTH);
                assert!(frame[1] + def.size[1] <= ATLAS_HEIGHT);
            }
        }
    }

    #[test]
    fn corners_outside_sprites_are_transparent() {
        let image = generate();
        assert_eq!(*image.get_pixel(0, 0), CLEAR);
        assert_eq!(*image.get_pixel(63, 31), CLEAR);
    }

    #[test]
    fn player_frames_differ_only_in_the_legs() {
        let image = generate();
        for y in 0..13 {
            for x in 0..16 {
                assert_eq!(image.get_pixel(x, y), image.get_pixel(x + 16, y));
            }
        }
        assert_ne!(image.get_pixel(3, 14), image.get_pixel(19, 14));
    }
}
