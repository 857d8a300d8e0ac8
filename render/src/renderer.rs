use crate::camera::ArcballCamera;
use crate::error::RenderError;
use crate::shader::{FRAGMENT_SHADER_SRC, VERTEX_SHADER_SRC};
use mpr_model::Volume;
use tracing::{debug, error};
use wgpu::util::DeviceExt;

const TRANSFER_FUNCTION_WIDTH: u32 = 4096;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct VolumeInfoUniform {
    inverse_view_proj: [[f32; 4]; 4],
    camera_world_pos: [f32; 4],
    volume_size_mm: [f32; 4],
    volume_dims: [u32; 4],
    step_size_mm: f32,
    opacity_scale: f32,
    hu_min: f32,
    hu_max: f32,
}

/// Owns the GPU-side resources for one volume ray-caster instance: a 3D-texture bind group,
/// a uniform buffer, and a single render pipeline.
pub struct VolumeRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
    volume_texture: Option<wgpu::Texture>,
    transfer_function_texture: wgpu::Texture,
    transfer_function_sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    volume_dims: (u32, u32, u32),
}

impl VolumeRenderer {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Result<Self, RenderError> {
        let max_dim = device.limits().max_texture_dimension_3d;
        debug!("creating volume renderer, max 3D texture dimension {max_dim}");

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("volume_vertex"),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER_SRC.into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("volume_fragment"),
            source: wgpu::ShaderSource::Wgsl(FRAGMENT_SHADER_SRC.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("volume_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Sint,
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("volume_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("volume_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let transfer_function_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("transfer_function"),
            size: wgpu::Extent3d {
                width: TRANSFER_FUNCTION_WIDTH,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let transfer_function_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("transfer_function_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("volume_info_ubo"),
            size: std::mem::size_of::<VolumeInfoUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group: None,
            volume_texture: None,
            transfer_function_texture,
            transfer_function_sampler,
            uniform_buffer,
            volume_dims: (0, 0, 0),
        })
    }

    /// Uploads `volume`'s HU buffer into a 3D `R16Sint` texture, nearest-filtered on all axes.
    pub fn upload_volume(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, volume: &Volume) -> Result<(), RenderError> {
        let max_dim = device.limits().max_texture_dimension_3d;
        let (cols, rows, slices) = volume.dimensions();
        for (label, requested) in [("cols", cols), ("rows", rows), ("slices", slices)] {
            if requested as u32 > max_dim {
                error!("volume {label} {requested} exceeds GPU 3D texture limit {max_dim}");
                return Err(RenderError::DimensionExceedsGPULimit {
                    requested: requested as u32,
                    max: max_dim,
                });
            }
        }

        let size = wgpu::Extent3d {
            width: cols as u32,
            height: rows as u32,
            depth_or_array_layers: slices as u32,
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("uVolume"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D3,
                format: wgpu::TextureFormat::R16Sint,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            bytemuck::cast_slice(&volume.data),
        );

        self.volume_dims = (cols as u32, rows as u32, slices as u32);
        self.volume_texture = Some(texture);
        self.rebuild_bind_group(device);
        Ok(())
    }

    /// Uploads a `4096`-entry RGBA transfer function sampled by `uTransferFunction`.
    pub fn upload_transfer_function(&mut self, queue: &wgpu::Queue, rgba: &[[u8; 4]; TRANSFER_FUNCTION_WIDTH as usize]) {
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.transfer_function_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(rgba),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(TRANSFER_FUNCTION_WIDTH * 4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: TRANSFER_FUNCTION_WIDTH,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }

    fn rebuild_bind_group(&mut self, device: &wgpu::Device) {
        let Some(volume_texture) = &self.volume_texture else {
            return;
        };
        let volume_view = volume_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let tf_view = self
            .transfer_function_texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("volume_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&volume_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&tf_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.transfer_function_sampler),
                },
            ],
        }));
    }

    /// Issues the single full-screen draw call, after updating the per-frame uniform buffer
    /// from `camera` and `volume`'s physical extent.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &ArcballCamera,
        volume: &Volume,
        aspect_ratio: f32,
        step_size_mm: f32,
        opacity_scale: f32,
    ) -> Result<(), RenderError> {
        let Some(bind_group) = &self.bind_group else {
            return Err(RenderError::ContextLost);
        };

        let view_proj = camera.projection_matrix_f32(aspect_ratio) * camera.view_matrix_f32();
        let inverse_view_proj = view_proj.inverse();
        let eye = camera.eye_position();

        let (sx, sy, sz) = volume.spacing;
        let (cols, rows, slices) = volume.dimensions();

        let uniform = VolumeInfoUniform {
            inverse_view_proj: inverse_view_proj.to_cols_array_2d(),
            camera_world_pos: [eye.x as f32, eye.y as f32, eye.z as f32, 1.0],
            volume_size_mm: [
                cols as f32 * sx as f32,
                rows as f32 * sy as f32,
                slices as f32 * sz as f32,
                0.0,
            ],
            volume_dims: [self.volume_dims.0, self.volume_dims.1, self.volume_dims.2, 0],
            step_size_mm,
            opacity_scale,
            hu_min: volume.min_hu as f32,
            hu_max: volume.max_hu as f32,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..6, 0..1);
        Ok(())
    }

    /// Releases GPU textures, bind group and pipeline. `wgpu` resources are reference-counted
    /// and released on drop; this consumes `self` so callers cannot keep issuing draws
    /// against a disposed renderer.
    pub fn dispose(self) {
        drop(self);
    }
}
