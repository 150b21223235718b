use std::path::Path;

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::error::StartupError;

use super::mesh::{Vertex, INDEX_COUNT, INDICES, VERTICES};
use super::program::{CubeProgram, TransformUniform};
use super::shader::{BindingSlot, ShaderStage};
use super::texture::CubeTexture;

/// Every GPU object the cube needs, created once.
///
/// Handles are independent; dropping this struct releases them in any order.
pub struct CubeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    /// Owns the texture the bind group samples.
    _texture: CubeTexture,
    pub(crate) surface_format: wgpu::TextureFormat,
}

impl CubeResources {
    /// Uploads the cube mesh and `image`, and builds the pipeline for `program`.
    ///
    /// `max_texture_dimension` is the device's 2D limit; larger images are rejected
    /// with an error naming `image_path`.
    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        program: &CubeProgram,
        image: &RgbaImage,
        image_path: &Path,
        max_texture_dimension: u32,
    ) -> Result<Self, StartupError> {
        let texture = CubeTexture::upload(device, queue, image, image_path, max_texture_dimension)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spincube vbo"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spincube ibo"),
            contents: bytemuck::cast_slice(&INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spincube transforms ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spincube bgl"),
            entries: &[
                layout_entry(
                    program.transforms,
                    wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TransformUniform>() as u64,
                        ),
                    },
                ),
                layout_entry(
                    program.texture,
                    wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                ),
                layout_entry(
                    program.sampler,
                    wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spincube bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: program.transforms.binding,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: program.texture.binding,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: program.sampler.binding,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("spincube pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let linked = program.linked();
        let vs_module = linked.create_module(device, ShaderStage::Vertex);
        let fs_module = linked.create_module(device, ShaderStage::Fragment);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spincube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some(linked.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some(linked.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Front faces are CCW seen from outside; back faces are culled, which is
            // sufficient hidden-surface removal for a single convex mesh.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "cube resources ready: {} vertices, {} indices",
            VERTICES.len(),
            INDEX_COUNT
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: INDEX_COUNT,
            uniform_buffer,
            bind_group,
            _texture: texture,
            surface_format,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }
}

fn layout_entry(slot: BindingSlot, ty: wgpu::BindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: slot.binding,
        visibility: slot.visibility,
        ty,
        count: None,
    }
}
