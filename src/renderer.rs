// Renderer module: draws a RenderFrame with wgpu

use std::path::Path;
use std::sync::Arc;

use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::assets::{
    decode_cubemap, decode_texture, mip_chain, CubemapPixels, TextureHandle, TextureLoader, TexturePixels,
};
use crate::body::Shading;
use crate::error::{AppError, AssetError};
use crate::mesh::{SkyboxCube, SphereMesh, Vertex};
use crate::simulation::{DrawItem, RenderFrame};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SPHERE_RESOLUTION: u32 = 64;
const MAX_ANISOTROPY: u16 = 16;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.01,
    a: 1.0,
};

// Per-body uniform block, laid out to match `Uniforms` in shader.wgsl
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    model: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
    view_position: [f32; 4],
}

impl Uniforms {
    fn new(frame: &RenderFrame, item: &DrawItem) -> Self {
        let normal = Mat3::from_mat4(item.world).inverse().transpose();
        Self {
            model: item.world.to_cols_array_2d(),
            view_proj: (frame.projection * frame.view).to_cols_array_2d(),
            normal_matrix: Mat4::from_mat3(normal).to_cols_array_2d(),
            light_position: frame.light_position.extend(1.0).to_array(),
            light_color: frame.light_color.extend(1.0).to_array(),
            view_position: frame.camera_position.extend(1.0).to_array(),
        }
    }
}

/// A render pipeline that may have failed to build.
///
/// Build errors are logged rather than raised; drawing with an invalid
/// program does nothing.
pub struct ShaderProgram {
    label: &'static str,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl ShaderProgram {
    fn invalid(label: &'static str) -> Self {
        Self {
            label,
            pipeline: None,
        }
    }

    async fn compile(device: &wgpu::Device, desc: PipelineDesc<'_>, surface_format: wgpu::TextureFormat) -> Self {
        let label = desc.label;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(desc.layout),
            vertex: wgpu::VertexState {
                module: desc.module,
                entry_point: desc.vertex_entry,
                buffers: std::slice::from_ref(&desc.vertex_layout),
            },
            fragment: Some(wgpu::FragmentState {
                module: desc.module,
                entry_point: desc.fragment_entry,
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: desc.depth_write,
                depth_compare: desc.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        match device.pop_error_scope().await {
            Some(err) => {
                log::error!("Failed to build {label} pipeline: {err}");
                Self::invalid(label)
            }
            None => Self {
                label,
                pipeline: Some(pipeline),
            },
        }
    }
}

// Pipeline settings that differ between the body and sky programs
struct PipelineDesc<'a> {
    label: &'static str,
    module: &'a wgpu::ShaderModule,
    vertex_entry: &'a str,
    fragment_entry: &'a str,
    vertex_layout: wgpu::VertexBufferLayout<'a>,
    layout: &'a wgpu::PipelineLayout,
    depth_compare: wgpu::CompareFunction,
    depth_write: bool,
}

/// Compiles WGSL, logging and returning `None` if validation fails.
async fn compile_module(device: &wgpu::Device, label: &str, source: &str) -> Option<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match device.pop_error_scope().await {
        Some(err) => {
            log::error!("Failed to compile {label}: {err}");
            None
        }
        None => Some(module),
    }
}

/// Prefers an sRGB surface format.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat, AppError> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .ok_or(AppError::UnsupportedSurface)
}

fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> Result<wgpu::CompositeAlphaMode, AppError> {
    modes.first().copied().ok_or(AppError::UnsupportedSurface)
}

struct BodySlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Option<TextureHandle>,
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    lit: ShaderProgram,
    emissive: ShaderProgram,
    sky: ShaderProgram,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    depth_view: wgpu::TextureView,
    // Index 0 is a white texel bound for untextured bodies.
    textures: Vec<wgpu::TextureView>,
    slots: Vec<Option<BodySlot>>,
    sky_vertex_buffer: wgpu::Buffer,
    sky_index_buffer: wgpu::Buffer,
    sky_uniform_buffer: wgpu::Buffer,
    sky_bind_group_layout: wgpu::BindGroupLayout,
    sky_sampler: wgpu::Sampler,
    // One bind group per loaded cubemap, indexed by handle.
    cubemaps: Vec<wgpu::BindGroup>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Renderer Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&surface_caps.formats)?;
        let alpha_mode = pick_alpha_mode(&surface_caps.alpha_modes)?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Body Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
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
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Body Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let sky_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sky Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
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
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sky_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&sky_bind_group_layout],
            push_constant_ranges: &[],
        });

        let (lit, emissive) = match compile_module(&device, "body shader", include_str!("shader.wgsl")).await {
            Some(module) => {
                let body = |label: &'static str, fragment_entry: &'static str| PipelineDesc {
                    label,
                    module: &module,
                    vertex_entry: "vs_main",
                    fragment_entry,
                    vertex_layout: Vertex::layout(),
                    layout: &pipeline_layout,
                    depth_compare: wgpu::CompareFunction::Less,
                    depth_write: true,
                };
                (
                    ShaderProgram::compile(&device, body("lit", "fs_lit"), surface_format).await,
                    ShaderProgram::compile(&device, body("emissive", "fs_emissive"), surface_format).await,
                )
            }
            None => (ShaderProgram::invalid("lit"), ShaderProgram::invalid("emissive")),
        };

        // Drawn last at depth 1.0, so only uncovered pixels show sky.
        let sky = match compile_module(&device, "sky shader", include_str!("skybox.wgsl")).await {
            Some(module) => {
                let desc = PipelineDesc {
                    label: "sky",
                    module: &module,
                    vertex_entry: "vs_sky",
                    fragment_entry: "fs_sky",
                    vertex_layout: SkyboxCube::layout(),
                    layout: &sky_pipeline_layout,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    depth_write: false,
                };
                ShaderProgram::compile(&device, desc, surface_format).await
            }
            None => ShaderProgram::invalid("sky"),
        };

        let sphere = SphereMesh::new(SPHERE_RESOLUTION, SPHERE_RESOLUTION);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&sphere.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&sphere.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Body Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: MAX_ANISOTROPY,
            ..Default::default()
        });

        let sky_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sky Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sky_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Vertex Buffer"),
            contents: bytemuck::cast_slice(&SkyboxCube::VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sky_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Index Buffer"),
            contents: bytemuck::cast_slice(&SkyboxCube::INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let sky_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sky Uniform Buffer"),
            size: std::mem::size_of::<[[f32; 4]; 4]>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_view = create_depth_view(&device, &config);

        let mut renderer = Self {
            device,
            queue,
            surface,
            config,
            lit,
            emissive,
            sky,
            vertex_buffer,
            index_buffer,
            index_count: sphere.indices.len() as u32,
            bind_group_layout,
            sampler,
            depth_view,
            textures: Vec::new(),
            slots: Vec::new(),
            sky_vertex_buffer,
            sky_index_buffer,
            sky_uniform_buffer,
            sky_bind_group_layout,
            sky_sampler,
            cubemaps: Vec::new(),
        };
        let white = TexturePixels {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        };
        renderer.upload_texture("White Texture", white);
        Ok(renderer)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Reconfigures the surface at its current size after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Uploads `pixels` with a full mip chain.
    fn upload_texture(&mut self, label: &str, pixels: TexturePixels) -> TextureHandle {
        let (width, height) = (pixels.width, pixels.height);
        let levels = mip_chain(pixels);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        for (mip_level, level) in levels.iter().enumerate() {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level.width),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }
        self.textures
            .push(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        TextureHandle((self.textures.len() - 1) as u32)
    }

    fn upload_cubemap(&mut self, label: &str, pixels: &CubemapPixels) -> TextureHandle {
        let size = wgpu::Extent3d {
            width: pixels.size,
            height: pixels.size,
            depth_or_array_layers: 6,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * pixels.size),
                rows_per_image: Some(pixels.size),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sky Bind Group"),
            layout: &self.sky_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.sky_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sky_sampler),
                },
            ],
        });
        self.cubemaps.push(bind_group);
        TextureHandle((self.cubemaps.len() - 1) as u32)
    }

    /// Makes sure `item` has a uniform buffer and a bind group for its texture.
    fn prepare_slot(&mut self, item: &DrawItem) {
        let index = item.body.index();
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        if let Some(slot) = &self.slots[index] {
            if slot.texture == item.texture {
                return;
            }
        }

        let uniform_buffer = match self.slots[index].take() {
            Some(slot) => slot.uniform_buffer,
            None => self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Body Uniform Buffer"),
                size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };
        let texture_index = item
            .texture
            .map(|handle| handle.0 as usize)
            .filter(|&i| i < self.textures.len())
            .unwrap_or(0);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Body Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.textures[texture_index]),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.slots[index] = Some(BodySlot {
            uniform_buffer,
            bind_group,
            texture: item.texture,
        });
    }

    fn program(&self, shading: Shading) -> &ShaderProgram {
        match shading {
            Shading::Emissive => &self.emissive,
            Shading::Lit => &self.lit,
        }
    }

    pub fn render(&mut self, frame: &RenderFrame) -> Result<(), wgpu::SurfaceError> {
        for item in &frame.items {
            self.prepare_slot(item);
            if let Some(slot) = &self.slots[item.body.index()] {
                self.queue.write_buffer(
                    &slot.uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[Uniforms::new(frame, item)]),
                );
            }
        }

        let sky_bind_group = frame
            .skybox
            .and_then(|handle| self.cubemaps.get(handle.0 as usize));
        if sky_bind_group.is_some() {
            let view_proj = frame.projection * frame.skybox_view;
            self.queue.write_buffer(
                &self.sky_uniform_buffer,
                0,
                bytemuck::cast_slice(&[view_proj.to_cols_array_2d()]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Body Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for item in &frame.items {
                let program = self.program(item.shading);
                let (Some(pipeline), Some(slot)) = (&program.pipeline, &self.slots[item.body.index()]) else {
                    log::trace!("Skipping draw with invalid {} program", program.label);
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                render_pass.draw_indexed(0..self.index_count, 0, 0..1);
            }

            if let (Some(pipeline), Some(bind_group)) = (&self.sky.pipeline, sky_bind_group) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.sky_vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.sky_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..SkyboxCube::INDICES.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl TextureLoader for Renderer {
    fn load(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
        let pixels = decode_texture(path)?;
        Ok(self.upload_texture(&path.display().to_string(), pixels))
    }

    fn load_cubemap(&mut self, dir: &Path) -> Result<TextureHandle, AssetError> {
        let pixels = decode_cubemap(dir)?;
        Ok(self.upload_cubemap(&dir.display().to_string(), &pixels))
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
