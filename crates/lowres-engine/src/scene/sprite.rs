use super::SpriteInstance;

/// Sprite color multiplier: RGB in 0..=255, alpha in 0..=1.
///
/// The sprite shader divides RGB by 255 and multiplies the atlas texel after sRGB
/// decode, so tinting happens in linear space: `Tint::rgb(128, 128, 128)` halves
/// linear light, which shows at roughly 73% of the untinted sRGB value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(255.0, 255.0, 255.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32, 1.0)
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

/// An animated sprite in the atlas: frame origins plus one shared source size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteDef {
    /// Top-left texel of each animation frame, in playback order.
    pub frames: Vec<[u32; 2]>,
    /// Source rect size in texels, shared by all frames.
    pub size: [u32; 2],
}

impl SpriteDef {
    pub fn new(frames: Vec<[u32; 2]>, size: [u32; 2]) -> Self {
        Self { frames, size }
    }

    /// Single-frame sprite.
    pub fn still(location: [u32; 2], size: [u32; 2]) -> Self {
        Self::new(vec![location], size)
    }

    /// Frame shown at `anim_tick`, looping. `None` if there are no frames.
    pub fn frame(&self, anim_tick: u64) -> Option<[u32; 2]> {
        if self.frames.is_empty() {
            return None;
        }
        let i = (anim_tick % self.frames.len() as u64) as usize;
        Some(self.frames[i])
    }
}

/// A sprite the host wants drawn this frame.
#[derive(Debug, Copy, Clone)]
pub struct Sprite<'a> {
    pub def: &'a SpriteDef,
    /// Destination in game pixels, origin bottom-left.
    pub position: [i32; 2],
    /// Per-axis multiplier; `-1` mirrors.
    pub scale: [i32; 2],
    pub color: Tint,
}

impl<'a> Sprite<'a> {
    pub fn new(def: &'a SpriteDef, position: [i32; 2]) -> Self {
        Self {
            def,
            position,
            scale: [1, 1],
            color: Tint::WHITE,
        }
    }

    pub fn scaled(mut self, scale: [i32; 2]) -> Self {
        self.scale = scale;
        self
    }

    pub fn tinted(mut self, color: Tint) -> Self {
        self.color = color;
        self
    }

    /// GPU record for this sprite at `anim_tick`.
    pub fn instance(&self, anim_tick: u64) -> Option<SpriteInstance> {
        let location = self.def.frame(anim_tick)?;
        Some(SpriteInstance::new(
            location,
            self.def.size,
            self.position,
            self.scale,
            self.color,
        ))
    }
}
