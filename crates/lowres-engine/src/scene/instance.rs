use bytemuck::{Pod, Zeroable};

use super::Tint;

/// One sprite as the sprite shader sees it.
///
/// Field order and widths are the vertex layout of instance buffer slot 1
/// (locations 1..=5), so this struct must stay `#[repr(C)]` with only
/// `f32` arrays.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left texel of the source rect in the atlas.
    pub location: [f32; 2],
    /// Source rect size in texels.
    pub size: [f32; 2],
    /// Destination in game pixels, origin bottom-left.
    pub position: [f32; 2],
    /// Per-axis multiplier; negative mirrors about `position`.
    pub scale: [f32; 2],
    /// RGB in 0..=255, alpha in 0..=1.
    pub color: [f32; 4],
}

impl SpriteInstance {
    /// Atlas rect in texels, destination in game pixels.
    pub fn new(
        location: [u32; 2],
        size: [u32; 2],
        position: [i32; 2],
        scale: [i32; 2],
        color: Tint,
    ) -> Self {
        Self {
            location: location.map(|v| v as f32),
            size: size.map(|v| v as f32),
            position: position.map(|v| v as f32),
            scale: scale.map(|v| v as f32),
            color: color.to_array(),
        }
    }

    pub(crate) const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // location
        2 => Float32x2, // size
        3 => Float32x2, // position
        4 => Float32x2, // scale
        5 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Game-pixel position of unit-quad corner `v`, as the vertex shader computes it.
    #[inline]
    pub fn pixel_corner(&self, v: [f32; 2]) -> [f32; 2] {
        [
            v[0] * self.size[0] * self.scale[0] + self.position[0],
            v[1] * self.size[1] * self.scale[1] + self.position[1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;
    use crate::coords::{pixel_to_clip, pixel_to_viewport_multiplier};

    fn knight() -> SpriteInstance {
        SpriteInstance {
            location: [0.0, 0.0],
            size: [19.0, 28.0],
            position: [8.0, 120.0],
            scale: [1.0, 1.0],
            color: [255.0, 255.0, 255.0, 1.0],
        }
    }

    #[test]
    fn layout_matches_shader_attributes() {
        assert_eq!(offset_of!(SpriteInstance, location), 0);
        assert_eq!(offset_of!(SpriteInstance, size), 8);
        assert_eq!(offset_of!(SpriteInstance, position), 16);
        assert_eq!(offset_of!(SpriteInstance, scale), 24);
        assert_eq!(offset_of!(SpriteInstance, color), 32);
        assert_eq!(size_of::<SpriteInstance>(), 48);

        let offsets: Vec<u64> = SpriteInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16, 24, 32]);
    }

    #[test]
    fn new_converts_integer_inputs_field_by_field() {
        let inst = SpriteInstance::new([32, 16], [8, 8], [-4, 150], [-1, 2], Tint::rgb(255, 200, 40));

        assert_eq!(inst.location, [32.0, 16.0]);
        assert_eq!(inst.size, [8.0, 8.0]);
        assert_eq!(inst.position, [-4.0, 150.0]);
        assert_eq!(inst.scale, [-1.0, 2.0]);
        assert_eq!(inst.color, [255.0, 200.0, 40.0, 1.0]);
    }

    #[test]
    fn far_corner_lands_at_position_plus_size() {
        assert_eq!(knight().pixel_corner([1.0, 1.0]), [27.0, 148.0]);
        assert_eq!(knight().pixel_corner([0.0, 0.0]), [8.0, 120.0]);
    }

    #[test]
    fn far_corner_clip_coordinates() {
        let m = pixel_to_viewport_multiplier(320.0, 180.0);
        let clip = pixel_to_clip(knight().pixel_corner([1.0, 1.0]), m);

        let expected = [27.0 * 2.0 / 320.0 - 1.0, 148.0 * -2.0 / 180.0 + 1.0];
        assert!((clip[0] - expected[0]).abs() < 1e-5);
        assert!((clip[1] - expected[1]).abs() < 1e-5);
    }

    #[test]
    fn negative_scale_mirrors_about_position() {
        let mut s = knight();
        s.scale = [-1.0, -1.0];

        let p = s.pixel_corner([1.0, 1.0]);
        assert_eq!(p, [8.0 - 19.0, 120.0 - 28.0]);

        let upright = knight().pixel_corner([1.0, 1.0]);
        assert_eq!(p[0] - s.position[0], -(upright[0] - s.position[0]));
        assert_eq!(p[1] - s.position[1], -(upright[1] - s.position[1]));
    }
}
