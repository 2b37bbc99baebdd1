//! Scale and viewport math for pixel-perfect upscaling.
//!
//! All functions are pure. A zero-sized display or a zero DPI scale is a caller
//! precondition violation and is not handled.

/// Fixed game resolution in game pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameResolution {
    pub width: u32,
    pub height: u32,
}

impl GameResolution {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The resolution every scene is rendered at before upscaling.
pub const GAME_RESOLUTION: GameResolution = GameResolution::new(320, 180);

/// Current display size in physical pixels plus the DPI scale factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayMetrics {
    pub width: f32,
    pub height: f32,
    pub dpi_scale: f32,
}

impl DisplayMetrics {
    #[inline]
    pub const fn new(width: f32, height: f32, dpi_scale: f32) -> Self {
        Self { width, height, dpi_scale }
    }

    /// Display size in logical pixels.
    #[inline]
    pub fn logical_size(self) -> (f32, f32) {
        (self.width / self.dpi_scale, self.height / self.dpi_scale)
    }

    /// Returns `false` for a minimized (zero-area) display.
    #[inline]
    pub fn is_drawable(self) -> bool {
        self.width >= 1.0 && self.height >= 1.0 && self.dpi_scale > 0.0
    }
}

/// Viewport rectangle in physical pixels, top-left origin.
///
/// May extend past the surface (negative origin) when the display is smaller than
/// the game at 1:1; the rasterizer crops it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Scale + flip that maps game pixels to normalized device coordinates.
///
/// The negative Y makes the sprite shader's `+(-1, 1)` offset land game row 0 on the
/// first row of the offscreen target.
#[inline]
pub fn pixel_to_viewport_multiplier(game_width: f32, game_height: f32) -> [f32; 2] {
    [2.0 / game_width, -2.0 / game_height]
}

/// CPU mirror of the sprite vertex shader's clip-space transform.
#[inline]
pub fn pixel_to_clip(pixel: [f32; 2], multiplier: [f32; 2]) -> [f32; 2] {
    [pixel[0] * multiplier[0] - 1.0, pixel[1] * multiplier[1] + 1.0]
}

/// Largest integer upscale that fits the display, never below 1.
///
/// The axis that runs out of room first decides: a game narrower than the display
/// is height-bound, otherwise width-bound.
pub fn resolution_scale(display: DisplayMetrics, game: GameResolution) -> u32 {
    let (logical_w, logical_h) = display.logical_size();
    let display_aspect = logical_w / logical_h;

    let scale = if game.aspect() < display_aspect {
        (logical_h / game.height as f32).floor()
    } else {
        (logical_w / game.width as f32).floor()
    };

    (scale as u32).max(1)
}

/// Centres the upscaled game inside the display, in physical pixels.
///
/// Whatever the scaled game doesn't cover becomes letterbox or pillarbox bars.
pub fn pixel_perfect_viewport(
    display: DisplayMetrics,
    scale: u32,
    game: GameResolution,
) -> ViewportRect {
    let (logical_w, logical_h) = display.logical_size();
    let scaled_w = (game.width * scale) as f32;
    let scaled_h = (game.height * scale) as f32;

    let x = (logical_w - scaled_w) / 2.0;
    let y = (logical_h - scaled_h) / 2.0;

    let dpi = display.dpi_scale;
    ViewportRect::new(x * dpi, y * dpi, scaled_w * dpi, scaled_h * dpi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(w: f32, h: f32, dpi: f32) -> DisplayMetrics {
        DisplayMetrics::new(w, h, dpi)
    }

    // ── multiplier ────────────────────────────────────────────────────────

    #[test]
    fn multiplier_is_two_over_size_with_y_flipped() {
        assert_eq!(pixel_to_viewport_multiplier(320.0, 180.0), [2.0 / 320.0, -2.0 / 180.0]);
        assert_eq!(pixel_to_viewport_multiplier(1.0, 4.0), [2.0, -0.5]);
    }

    #[test]
    fn clip_of_origin_is_top_left_corner_of_target() {
        let m = pixel_to_viewport_multiplier(320.0, 180.0);
        assert_eq!(pixel_to_clip([0.0, 0.0], m), [-1.0, 1.0]);

        let far = pixel_to_clip([320.0, 180.0], m);
        assert!((far[0] - 1.0).abs() < 1e-6);
        assert!((far[1] + 1.0).abs() < 1e-6);
    }

    // ── resolution_scale ──────────────────────────────────────────────────

    #[test]
    fn scale_exact_fit_1080p() {
        assert_eq!(resolution_scale(display(1920.0, 1080.0, 1.0), GAME_RESOLUTION), 6);
    }

    #[test]
    fn scale_taller_display_is_width_bound() {
        assert_eq!(resolution_scale(display(1920.0, 1200.0, 1.0), GAME_RESOLUTION), 6);
    }

    #[test]
    fn scale_wider_display_is_height_bound() {
        // 21:9 ultrawide: 1080 / 180 = 6 even though 3440 / 320 = 10.
        assert_eq!(resolution_scale(display(3440.0, 1080.0, 1.0), GAME_RESOLUTION), 6);
    }

    #[test]
    fn scale_divides_out_dpi() {
        assert_eq!(resolution_scale(display(2560.0, 1440.0, 2.0), GAME_RESOLUTION), 4);
    }

    #[test]
    fn scale_floors_partial_multiples() {
        assert_eq!(resolution_scale(display(1000.0, 600.0, 1.0), GAME_RESOLUTION), 3);
    }

    #[test]
    fn scale_never_drops_below_one() {
        assert_eq!(resolution_scale(display(100.0, 50.0, 1.0), GAME_RESOLUTION), 1);
        assert_eq!(resolution_scale(display(319.0, 179.0, 1.0), GAME_RESOLUTION), 1);
        assert_eq!(resolution_scale(display(640.0, 360.0, 3.0), GAME_RESOLUTION), 1);
    }

    // ── pixel_perfect_viewport ────────────────────────────────────────────

    #[test]
    fn viewport_exact_fit_has_no_bars() {
        let v = pixel_perfect_viewport(display(1920.0, 1080.0, 1.0), 6, GAME_RESOLUTION);
        assert_eq!(v, ViewportRect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn viewport_letterboxes_taller_display() {
        let v = pixel_perfect_viewport(display(1920.0, 1200.0, 1.0), 6, GAME_RESOLUTION);
        assert_eq!(v, ViewportRect::new(0.0, 60.0, 1920.0, 1080.0));
    }

    #[test]
    fn viewport_pillarboxes_wider_display() {
        let v = pixel_perfect_viewport(display(3440.0, 1080.0, 1.0), 6, GAME_RESOLUTION);
        assert_eq!(v, ViewportRect::new(760.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn viewport_is_returned_in_physical_pixels() {
        let d = display(2560.0, 1440.0, 2.0);
        let scale = resolution_scale(d, GAME_RESOLUTION);
        let v = pixel_perfect_viewport(d, scale, GAME_RESOLUTION);
        assert_eq!(v, ViewportRect::new(0.0, 0.0, 2560.0, 1440.0));
    }

    // ── tiny displays ─────────────────────────────────────────────────────

    #[test]
    fn tiny_display_keeps_one_to_one_and_overhangs_evenly() {
        let d = display(200.0, 100.0, 1.0);
        let scale = resolution_scale(d, GAME_RESOLUTION);
        assert_eq!(scale, 1);

        let v = pixel_perfect_viewport(d, scale, GAME_RESOLUTION);
        assert_eq!(v, ViewportRect::new(-60.0, -40.0, 320.0, 180.0));
        assert!(!v.is_empty());

        // Equal overhang on both sides: a centred crop.
        assert_eq!(v.x + v.width - 200.0, -v.x);
        assert_eq!(v.y + v.height - 100.0, -v.y);
    }
}
