//! Forward mesh pass: one pipeline, two specimen slots.
//!
//! The pass renders into caller-chosen color and depth targets so the
//! display path (swapchain + present) and the capture path (offscreen +
//! readback) share the same draw code. Depth is cleared to 1.0, which
//! remaps to the background sentinel after readback.

use wgpu::util::DeviceExt;

use crate::camera::CameraUniform;
use crate::gpu::texture::DEPTH_FORMAT;
use crate::gpu::RenderContext;
use crate::renderer::geometry::vertex_buffer_layout;
use crate::scene::Scene;

/// Per-model uniform: the object-to-world matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
}

/// Light uniform: point light position plus ambient term.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightUniform {
    position: [f32; 3],
    ambient: f32,
}

/// GPU resources for one scene model.
struct GpuModel {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    model_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Forward pass drawing the visible scene models.
pub struct MeshPass {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: Option<wgpu::RenderPipeline>,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    shared_bind_group: wgpu::BindGroup,
    models: Vec<GpuModel>,
    wireframe: bool,
}

fn create_pipeline(
    context: &RenderContext,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    let label = match polygon_mode {
        wgpu::PolygonMode::Line => "Mesh Pipeline (line)",
        _ => "Mesh Pipeline",
    };
    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

impl MeshPass {
    /// Create the pass and upload the scene's mesh data.
    ///
    /// A line-mode pipeline for the wireframe toggle is built only when
    /// the device supports `POLYGON_MODE_LINE`.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        scene: &Scene,
        light_position: [f32; 3],
        ambient: f32,
    ) -> Self {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Mesh Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/mesh.wgsl").into(),
                ),
            });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX
                | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let shared_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[uniform_entry(0)],
            });

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let light_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Light Buffer"),
                contents: bytemuck::cast_slice(&[LightUniform {
                    position: light_position,
                    ambient,
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let shared_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Bind Group"),
                layout: &shared_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: light_buffer.as_entire_binding(),
                    },
                ],
            });

        let models = scene
            .models()
            .iter()
            .map(|model| {
                let vertex_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Model Vertex Buffer"),
                        contents: bytemuck::cast_slice(&model.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                );
                let model_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Model Uniform Buffer"),
                        contents: bytemuck::cast_slice(&[ModelUniform {
                            model: model.matrix().to_cols_array_2d(),
                        }]),
                        usage: wgpu::BufferUsages::UNIFORM
                            | wgpu::BufferUsages::COPY_DST,
                    },
                );
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Model Bind Group"),
                        layout: &model_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: model_buffer.as_entire_binding(),
                        }],
                    });
                GpuModel {
                    vertex_buffer,
                    vertex_count: model.vertices.len() as u32,
                    model_buffer,
                    bind_group,
                }
            })
            .collect();

        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&shared_layout, &model_layout],
                push_constant_ranges: &[],
            });
        let fill_pipeline =
            create_pipeline(context, &shader, &layout, wgpu::PolygonMode::Fill);
        let line_pipeline = context.supports_line_mode.then(|| {
            create_pipeline(context, &shader, &layout, wgpu::PolygonMode::Line)
        });

        Self {
            fill_pipeline,
            line_pipeline,
            camera_buffer,
            light_buffer,
            shared_bind_group,
            models,
            wireframe: false,
        }
    }

    /// Write current camera, light, and model transforms to the GPU.
    pub fn prepare(
        &self,
        queue: &wgpu::Queue,
        camera: &CameraUniform,
        light_position: [f32; 3],
        ambient: f32,
        scene: &Scene,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[*camera]),
        );
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniform {
                position: light_position,
                ambient,
            }]),
        );
        for (model, gpu) in scene.models().iter().zip(&self.models) {
            queue.write_buffer(
                &gpu.model_buffer,
                0,
                bytemuck::cast_slice(&[ModelUniform {
                    model: model.matrix().to_cols_array_2d(),
                }]),
            );
        }
    }

    /// Toggle wireframe drawing. Returns the effective state, which stays
    /// `false` when the device lacks line-mode support.
    pub fn toggle_wireframe(&mut self) -> bool {
        if self.line_pipeline.is_some() {
            self.wireframe = !self.wireframe;
        } else {
            log::warn!("wireframe unavailable: POLYGON_MODE_LINE not supported");
        }
        self.wireframe
    }

    /// Encode one render of the visible scene models into the given
    /// targets, clearing color to black and depth to 1.0.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Mesh Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        let pipeline = match (&self.line_pipeline, self.wireframe) {
            (Some(line), true) => line,
            _ => &self.fill_pipeline,
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.shared_bind_group, &[]);

        for (model, gpu) in scene.models().iter().zip(&self.models) {
            if !model.visible || gpu.vertex_count == 0 {
                continue;
            }
            pass.set_bind_group(1, &gpu.bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.draw(0..gpu.vertex_count, 0..1);
        }
    }
}
