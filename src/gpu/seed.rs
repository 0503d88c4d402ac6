use wgpu::{BindGroup, BindGroupLayout, Device, RenderPipeline as WgpuRenderPipeline};

use crate::config::{SURFACE_CLEAR, SURFACE_FORMAT};
use crate::geometry::{GpuMesh, Vertex};
use crate::gpu::surfaces::DoubleBuffer;
use crate::gpu::uniforms::FrameUniforms;

/// Writes the reproducible start state: clears both surfaces to the
/// background color and rasterizes Lambert-shaded geometry into the current
/// one. The pass never samples the surface it writes, so there is no
/// feedback hazard with a freshly allocated pair.
pub struct SeedPass {
    pipeline: WgpuRenderPipeline,
    bind_group_layout: BindGroupLayout,
}

impl SeedPass {
    pub fn new(device: &Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("seed-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/seed.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("seed-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("seed-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("seed-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: SURFACE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    fn create_bind_group(&self, device: &Device, uniforms: &FrameUniforms) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("seed-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.scene_buffer.as_entire_binding(),
            }],
        })
    }

    /// Record the seed: clear the next surface, then clear the current
    /// surface and draw the shaded geometry into it
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        device: &Device,
        buffers: &DoubleBuffer,
        uniforms: &FrameUniforms,
        mesh: &GpuMesh,
    ) {
        // Clear-only pass for the back surface so the first generation reads
        // a defined state everywhere
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("seed-clear-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: buffers.next().view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(SURFACE_CLEAR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let bind_group = self.create_bind_group(device, uniforms);
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("seed-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: buffers.current().view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(SURFACE_CLEAR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        pass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count(), 0, 0..1);
    }
}
