use anyhow::{Context, Result};

use super::RenderCtx;

/// Decoded sprite atlas: tightly packed RGBA8 rows, top row first.
///
/// Decoding is the host's job; the renderer only takes pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasImage {
    /// Wraps an RGBA8 buffer, checking it is `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "atlas has zero size ({width}x{height})");

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .context("atlas dimensions overflow")?;
        anyhow::ensure!(
            pixels.len() == expected,
            "atlas buffer is {} bytes, expected {expected} for {width}x{height} RGBA8",
            pixels.len()
        );

        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[width, height]` in texels, as the sprite shader wants it.
    #[inline]
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Creates the sRGB atlas texture and uploads the pixels.
    pub(super) fn upload(&self, ctx: &RenderCtx<'_>) -> Result<(wgpu::Texture, wgpu::TextureView)> {
        let max = ctx.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            self.width <= max && self.height <= max,
            "atlas {}x{} exceeds device texture limit {max}",
            self.width,
            self.height
        );

        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lowres atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("atlas uploaded: {}x{}", self.width, self.height);

        Ok((texture, view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_rgba8_buffer() {
        let atlas = AtlasImage::from_rgba8(2, 3, vec![0; 24]).expect("valid atlas");
        assert_eq!(atlas.size(), [2.0, 3.0]);
        assert_eq!(atlas.pixels().len(), 24);
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(AtlasImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn rejects_zero_size() {
        assert!(AtlasImage::from_rgba8(0, 4, Vec::new()).is_err());
        assert!(AtlasImage::from_rgba8(4, 0, Vec::new()).is_err());
    }
}
