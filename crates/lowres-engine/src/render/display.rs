use crate::coords::{ColorRgba, ViewportRect};

use super::common::{
    nearest_sampler, quad_primitive, sampler_entry, texture_entry, QuadVertex, UnitQuad,
    QUAD_INDEX_COUNT,
};
use super::RenderCtx;

/// Composites the offscreen color target onto the swapchain.
///
/// The target is nearest-sampled into a viewport the caller computes each frame;
/// whatever lies outside it keeps the clear color (letterbox/pillarbox bars).
pub struct DisplayPass {
    clear: ColorRgba,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    _sampler: wgpu::Sampler,
}

impl DisplayPass {
    /// Binds `scene_view` (the offscreen color view) for sampling.
    pub fn new(ctx: &RenderCtx<'_>, scene_view: &wgpu::TextureView, clear: ColorRgba) -> Self {
        let sampler = nearest_sampler(ctx.device, "lowres display sampler");

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("lowres display bgl"),
                    entries: &[texture_entry(0), sampler_entry(1)],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lowres display bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lowres display shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/display.wgsl").into()),
        });

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("lowres display pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lowres display pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: quad_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        Self {
            clear,
            pipeline,
            bind_group,
            _sampler: sampler,
        }
    }

    /// Records the pass: clear the swapchain, draw the scene quad into `viewport`.
    ///
    /// `viewport` may overhang the target; the overhang is cropped, never rescaled.
    /// An empty viewport clears only.
    pub(super) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        swapchain_view: &wgpu::TextureView,
        quad: &UnitQuad,
        viewport: ViewportRect,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lowres display pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: swapchain_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if viewport.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        quad.bind(&mut rpass);
        rpass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..1);
    }
}
