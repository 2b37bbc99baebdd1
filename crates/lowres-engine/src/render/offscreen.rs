use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use crate::coords::{pixel_to_viewport_multiplier, ColorRgba, GameResolution};
use crate::scene::{SpriteBatch, SpriteInstance};

use super::common::{
    alpha_blend, nearest_sampler, quad_primitive, sampler_entry, texture_entry,
    ubo_min_binding_size, QuadVertex, UnitQuad, QUAD_INDEX_COUNT,
};
use super::{AtlasImage, RenderCtx};

/// Color format of the game-resolution target.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Depth format of the game-resolution target.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform block shared by every sprite in the pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteGlobals {
    /// Game pixels → NDC scale, Y negated.
    pub pixel_to_viewport: [f32; 2],
    /// Atlas size in texels, for texel → UV.
    pub atlas_size: [f32; 2],
}

/// Renders the sprite batch into a fixed-size color + depth target.
///
/// All sprites sit at z = 0 and the depth test is `LessEqual`, so draw order is
/// batch order: later sprites land on top.
pub struct OffscreenPass {
    size: GameResolution,
    clear: ColorRgba,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    globals: SpriteGlobals,
    globals_ubo: wgpu::Buffer,

    instance_vbo: wgpu::Buffer,
    instance_capacity: usize,

    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,

    _color: wgpu::Texture,
    _depth: wgpu::Texture,
    _atlas: wgpu::Texture,
    _sampler: wgpu::Sampler,
}

impl OffscreenPass {
    pub fn new(
        ctx: &RenderCtx<'_>,
        size: GameResolution,
        sprite_budget: usize,
        clear: ColorRgba,
        atlas: &AtlasImage,
    ) -> Result<Self> {
        let (atlas_texture, atlas_view) = atlas.upload(ctx)?;
        let sampler = nearest_sampler(ctx.device, "lowres atlas sampler");

        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };
        let max = ctx.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            size.width <= max && size.height <= max,
            "game resolution {}x{} exceeds device texture limit {max}",
            size.width,
            size.height
        );

        let color = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lowres offscreen color"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let depth = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lowres offscreen depth"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        let globals = SpriteGlobals {
            pixel_to_viewport: pixel_to_viewport_multiplier(size.width as f32, size.height as f32),
            atlas_size: atlas.size(),
        };
        let globals_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lowres sprite globals ubo"),
            size: std::mem::size_of::<SpriteGlobals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue.write_buffer(&globals_ubo, 0, bytemuck::bytes_of(&globals));

        // Sized once to the sprite budget; the batch can never outgrow it.
        let instance_vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lowres sprite instance vbo"),
            size: (sprite_budget * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("lowres sprite bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: Some(ubo_min_binding_size::<SpriteGlobals>()),
                            },
                            count: None,
                        },
                        texture_entry(1),
                        sampler_entry(2),
                    ],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lowres sprite bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = create_pipeline(ctx, &bind_group_layout);

        log::debug!(
            "offscreen target {}x{}, {} sprite slots",
            size.width,
            size.height,
            sprite_budget
        );

        Ok(Self {
            size,
            clear,
            pipeline,
            bind_group,
            globals,
            globals_ubo,
            instance_vbo,
            instance_capacity: sprite_budget,
            color_view,
            depth_view,
            _color: color,
            _depth: depth,
            _atlas: atlas_texture,
            _sampler: sampler,
        })
    }

    /// The rendered game frame, for sampling by the display pass.
    #[inline]
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    /// Recomputes the pixel → viewport multiplier and rewrites the uniform block.
    pub fn update_multiplier(&mut self, queue: &wgpu::Queue) {
        self.globals.pixel_to_viewport =
            pixel_to_viewport_multiplier(self.size.width as f32, self.size.height as f32);
        queue.write_buffer(&self.globals_ubo, 0, bytemuck::bytes_of(&self.globals));
    }

    /// Replaces the instance buffer contents with the batch's valid prefix.
    ///
    /// One bulk write; an empty batch uploads nothing.
    pub fn upload(&self, queue: &wgpu::Queue, batch: &SpriteBatch) {
        let instances = batch.instances();
        if instances.is_empty() {
            return;
        }
        debug_assert!(instances.len() <= self.instance_capacity);
        queue.write_buffer(&self.instance_vbo, 0, bytemuck::cast_slice(instances));
    }

    /// Records the pass: clear, then one instanced quad draw of `instance_count` sprites.
    pub(super) fn encode(&self, encoder: &mut wgpu::CommandEncoder, quad: &UnitQuad, instance_count: u32) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lowres offscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if instance_count == 0 {
            return;
        }
        let instance_count = instance_count.min(self.instance_capacity as u32);

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, self.instance_vbo.slice(..));
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..instance_count);
    }
}

fn create_pipeline(ctx: &RenderCtx<'_>, bgl: &wgpu::BindGroupLayout) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lowres sprite shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
    });

    let layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lowres sprite pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("lowres sprite pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: OFFSCREEN_FORMAT,
                blend: Some(alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: quad_primitive(),

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    #[test]
    fn globals_block_is_two_vec2() {
        assert_eq!(size_of::<SpriteGlobals>(), 16);
        assert_eq!(ubo_min_binding_size::<SpriteGlobals>().get(), 16);
    }

    #[test]
    fn globals_bytes_are_multiplier_then_atlas_size() {
        let g = SpriteGlobals {
            pixel_to_viewport: pixel_to_viewport_multiplier(320.0, 180.0),
            atlas_size: [256.0, 128.0],
        };
        let floats: [f32; 4] = bytemuck::cast(g);
        assert_eq!(floats, [2.0 / 320.0, -2.0 / 180.0, 256.0, 128.0]);
    }
}
