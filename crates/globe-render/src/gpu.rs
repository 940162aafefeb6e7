use crate::helpers::{create_depth_texture, depth_state, make_pipeline};
use crate::mesh::{flat_shaded_vertices, icosphere_triangles, wireframe_vertices, MeshVertex};
use crate::texture::{upload_marker_texture, MarkerImage};
use crate::GLOBE_WGSL;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use globe_core::{Camera, LoadedMarker, MarkerId, GLOBE_DETAIL, GLOBE_RADIUS};
use wgpu::util::DeviceExt;

const WIRE_INFLATE: f32 = 1.002;
const LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteUniforms {
    center_size: [f32; 4],
}

struct MarkerSprite {
    position: Vec3,
    _texture: wgpu::Texture,
    _uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globe_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,
    globe_vb: wgpu::Buffer,
    globe_vertex_count: u32,
    wire_vb: wgpu::Buffer,
    wire_vertex_count: u32,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    sprite_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    // one entry per marker that has joined the scene
    sprites: FnvHashMap<MarkerId, MarkerSprite>,

    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });

        // Scene uniforms shared by every pipeline
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        // Per-marker sprite data: placement uniform + texture + sampler
        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bgl"),
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
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let sprite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&scene_bgl, &sprite_bgl],
            push_constant_ranges: &[],
        });
        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let globe_pipeline = make_pipeline(
            &device,
            "globe_pipeline",
            &mesh_layout,
            &shader,
            ("vs_globe", "fs_globe"),
            &mesh_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            format,
            None,
            depth_state(true, wgpu::CompareFunction::Less),
        );
        let wire_pipeline = make_pipeline(
            &device,
            "wire_pipeline",
            &mesh_layout,
            &shader,
            ("vs_globe", "fs_wire"),
            &mesh_buffers,
            wgpu::PrimitiveTopology::LineList,
            format,
            None,
            depth_state(true, wgpu::CompareFunction::LessEqual),
        );
        let sprite_pipeline = make_pipeline(
            &device,
            "sprite_pipeline",
            &sprite_layout,
            &shader,
            ("vs_sprite", "fs_sprite"),
            &[],
            wgpu::PrimitiveTopology::TriangleList,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_state(true, wgpu::CompareFunction::Less),
        );

        // Static globe geometry
        let tris = icosphere_triangles(GLOBE_RADIUS, GLOBE_DETAIL);
        let globe_vertices = flat_shaded_vertices(&tris);
        let wire_vertices = wireframe_vertices(&tris, WIRE_INFLATE);
        let globe_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_vb"),
            contents: bytemuck::cast_slice(&globe_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let wire_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_vb"),
            contents: bytemuck::cast_slice(&wire_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (depth_tex, depth_view) = create_depth_texture(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globe_pipeline,
            wire_pipeline,
            sprite_pipeline,
            globe_vb,
            globe_vertex_count: globe_vertices.len() as u32,
            wire_vb,
            wire_vertex_count: wire_vertices.len() as u32,
            scene_buffer,
            scene_bind_group,
            sprite_bgl,
            sampler,
            sprites: FnvHashMap::default(),
            _depth_tex: depth_tex,
            depth_view,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after `SurfaceError::Lost`.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        let (tex, view) = create_depth_texture(&self.device, self.width, self.height);
        self._depth_tex = tex;
        self.depth_view = view;
    }

    /// Upload textures for markers that joined the scene since the last call.
    pub fn sync_markers<'m, I>(&mut self, markers: I, sprite_size: f32)
    where
        I: IntoIterator<Item = LoadedMarker<'m, MarkerImage>>,
    {
        for m in markers {
            if self.sprites.contains_key(&m.id) {
                continue;
            }
            let label = m.id.to_string();
            let (texture, view) = upload_marker_texture(&self.device, &self.queue, &label, m.asset);
            let uniforms = SpriteUniforms {
                center_size: m.position.extend(sprite_size).to_array(),
            };
            let uniform_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite_uniforms"),
                    contents: bytemuck::bytes_of(&uniforms),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sprite_bg"),
                layout: &self.sprite_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });
            log::debug!(
                "[gpu] uploaded {} ({}x{})",
                m.id,
                m.asset.width,
                m.asset.height
            );
            self.sprites.insert(
                m.id,
                MarkerSprite {
                    position: m.position,
                    _texture: texture,
                    _uniform_buffer: uniform_buffer,
                    bind_group,
                },
            );
        }
    }

    pub fn render(&mut self, camera: &Camera, model: Mat4) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (right, up) = camera.billboard_axes();
        let light_dir = Vec3::from(LIGHT_POSITION).normalize();
        self.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
                model: model.to_cols_array_2d(),
                cam_right: right.extend(0.0).to_array(),
                cam_up: up.extend(0.0).to_array(),
                light_dir: light_dir.extend(0.0).to_array(),
            }),
        );

        // Far sprites first so alpha edges blend over what is behind them
        let mut order: Vec<(f32, &MarkerSprite)> = self
            .sprites
            .values()
            .map(|s| (model.transform_point3(s.position).distance(camera.eye), s))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            rpass.set_pipeline(&self.globe_pipeline);
            rpass.set_vertex_buffer(0, self.globe_vb.slice(..));
            rpass.draw(0..self.globe_vertex_count, 0..1);

            rpass.set_pipeline(&self.wire_pipeline);
            rpass.set_vertex_buffer(0, self.wire_vb.slice(..));
            rpass.draw(0..self.wire_vertex_count, 0..1);

            rpass.set_pipeline(&self.sprite_pipeline);
            for (_, sprite) in &order {
                rpass.set_bind_group(1, &sprite.bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
