use pose_core::{Scene, JOINT_RADIUS, LIMB_OPACITY};
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    // camera basis vectors, xyz used, w padding
    right: [f32; 4],
    up: [f32; 4],
    forward: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct JointInstance {
    pos: [f32; 3],
    radius: f32,
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RibbonVertex {
    pos: [f32; 3],
    side: f32,
    dir: [f32; 3],
    half_width: f32,
    color: [f32; 4],
}

const SHADER_SRC: &str = r#"
struct Uniforms {
  view_proj: mat4x4<f32>,
  right: vec4<f32>,
  up: vec4<f32>,
  forward: vec4<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

// ---- joint markers: camera-facing quads with a circular mask ----

struct JointOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) color: vec4<f32>,
  @location(1) local: vec2<f32>,
};

@vertex
fn vs_joint(
  @location(0) v_pos: vec2<f32>,
  @location(1) i_pos: vec3<f32>,
  @location(2) i_radius: f32,
  @location(3) i_color: vec4<f32>,
) -> JointOut {
  let world = i_pos
    + (u.right.xyz * v_pos.x + u.up.xyz * v_pos.y) * i_radius * 2.0;
  var out: JointOut;
  out.pos = u.view_proj * vec4<f32>(world, 1.0);
  out.color = i_color;
  out.local = v_pos;
  return out;
}

@fragment
fn fs_joint(inf: JointOut) -> @location(0) vec4<f32> {
  let r = length(inf.local);
  let shape_alpha = 1.0 - smoothstep(0.48, 0.5, r);
  return vec4<f32>(inf.color.rgb, shape_alpha * inf.color.a);
}

// ---- limb ribbons, extruded perpendicular to the view direction ----

struct RibbonOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) color: vec4<f32>,
};

@vertex
fn vs_ribbon(
  @location(0) v_pos: vec3<f32>,
  @location(1) v_side: f32,
  @location(2) v_dir: vec3<f32>,
  @location(3) v_half_width: f32,
  @location(4) v_color: vec4<f32>,
) -> RibbonOut {
  var axis = cross(v_dir, u.forward.xyz);
  let len = length(axis);
  axis = select(u.right.xyz, axis / len, len > 1e-5);
  let world = v_pos + axis * v_half_width * v_side;
  var out: RibbonOut;
  out.pos = u.view_proj * vec4<f32>(world, 1.0);
  out.color = v_color;
  return out;
}

@fragment
fn fs_ribbon(inf: RibbonOut) -> @location(0) vec4<f32> {
  return inf.color;
}
"#;

const BG_SHADER_SRC: &str = r#"
struct BgOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) uv: vec2<f32>,
};

@vertex
fn vs_bg(@builtin(vertex_index) index: u32) -> BgOut {
  // fullscreen triangle
  let xy = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
  var out: BgOut;
  out.pos = vec4<f32>(xy * 2.0 - 1.0, 0.0, 1.0);
  out.uv = vec2<f32>(xy.x, 1.0 - xy.y);
  return out;
}

@group(0) @binding(0) var bg_tex: texture_2d<f32>;
@group(0) @binding(1) var bg_samp: sampler;

@fragment
fn fs_bg(inf: BgOut) -> @location(0) vec4<f32> {
  return textureSample(bg_tex, bg_samp, inf.uv);
}
"#;

struct Background {
    bind_group: wgpu::BindGroup,
}

/// WebGPU renderer for the pose scene: instanced joint markers, alpha-blended
/// limb ribbons, and an optional background image underneath. Ribbon vertex
/// data is only re-uploaded when the scene's geometry epoch moves.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    joint_pipeline: wgpu::RenderPipeline,
    ribbon_pipeline: wgpu::RenderPipeline,
    bg_pipeline: wgpu::RenderPipeline,
    bg_layout: wgpu::BindGroupLayout,
    background: Option<Background>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    joint_vb: wgpu::Buffer,
    joint_capacity: usize,
    ribbon_vb: wgpu::Buffer,
    ribbon_ib: wgpu::Buffer,
    ribbon_capacity: usize,
    ribbon_index_count: u32,
    uploaded_epoch: Option<u64>,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &'static web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pose-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });
        let bg_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bg-shader"),
            source: wgpu::ShaderSource::Wgsl(BG_SHADER_SRC.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform-bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform-bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pose-pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let joint_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<JointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let joint_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("joint-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_joint"),
                buffers: &joint_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_joint"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let ribbon_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RibbonVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 16,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 28,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
            ],
        }];
        let ribbon_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ribbon-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_ribbon"),
                buffers: &ribbon_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_ribbon"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let bg_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bg-bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let bg_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bg-pl"),
            bind_group_layouts: &[&bg_layout],
            push_constant_ranges: &[],
        });
        let bg_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("bg-pipeline"),
            layout: Some(&bg_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &bg_shader,
                entry_point: Some("vs_bg"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &bg_shader,
                entry_point: Some("fs_bg"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let joint_capacity = 64;
        let joint_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("joint_vb"),
            size: (std::mem::size_of::<JointInstance>() * joint_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ribbon_capacity = 4096;
        let ribbon_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbon_vb"),
            size: (std::mem::size_of::<RibbonVertex>() * ribbon_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ribbon_ib = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbon_ib"),
            size: (std::mem::size_of::<u32>() * ribbon_capacity * 3) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            joint_pipeline,
            ribbon_pipeline,
            bg_pipeline,
            bg_layout,
            background: None,
            uniform_buffer,
            bind_group,
            quad_vb,
            joint_vb,
            joint_capacity,
            ribbon_vb,
            ribbon_ib,
            ribbon_capacity,
            ribbon_index_count: 0,
            uploaded_epoch: None,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Decode image bytes (PNG/JPEG) and install them as the backdrop.
    pub fn set_background(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (w, h) = decoded.dimensions();
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("bg-texture"),
            size: wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            decoded.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bg-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg-bg"),
            layout: &self.bg_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        self.background = Some(Background { bind_group });
        log::info!("[render] background set ({w}x{h})");
        Ok(())
    }

    pub fn clear_background(&mut self) {
        self.background = None;
        log::info!("[render] background cleared");
    }

    fn upload_geometry(&mut self, scene: &Scene) {
        let mut vertices: Vec<RibbonVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        for body in scene.bodies() {
            for (li, limb) in body.limbs.iter().enumerate() {
                let ribbon = &limb.ribbon;
                if ribbon.points.len() < 2 {
                    continue;
                }
                let rgb = pose_core::skeleton::limb_color(li);
                let color = [
                    rgb[0] as f32 / 255.0,
                    rgb[1] as f32 / 255.0,
                    rgb[2] as f32 / 255.0,
                    LIMB_OPACITY,
                ];
                let dir = (*ribbon.points.last().unwrap_or(&glam::Vec3::ZERO)
                    - ribbon.points[0])
                    .normalize_or_zero()
                    .to_array();
                let base = vertices.len() as u32;
                for (point, half_width) in ribbon.points.iter().zip(&ribbon.half_widths) {
                    for side in [1.0_f32, -1.0] {
                        vertices.push(RibbonVertex {
                            pos: point.to_array(),
                            side,
                            dir,
                            half_width: *half_width,
                            color,
                        });
                    }
                }
                for seg in 0..(ribbon.points.len() as u32 - 1) {
                    let a = base + seg * 2;
                    indices.extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
                }
            }
        }
        if vertices.len() > self.ribbon_capacity {
            self.ribbon_capacity = vertices.len().next_power_of_two();
            self.ribbon_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ribbon_vb"),
                size: (std::mem::size_of::<RibbonVertex>() * self.ribbon_capacity) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.ribbon_ib = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ribbon_ib"),
                size: (std::mem::size_of::<u32>() * self.ribbon_capacity * 3) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.ribbon_vb, 0, bytemuck::cast_slice(&vertices));
            self.queue
                .write_buffer(&self.ribbon_ib, 0, bytemuck::cast_slice(&indices));
        }
        self.ribbon_index_count = indices.len() as u32;
    }

    fn upload_joints(&mut self, scene: &Scene) -> u32 {
        let mut instances: Vec<JointInstance> = Vec::new();
        for body in scene.bodies() {
            for joint in body.joints.iter() {
                let rgb = joint.color();
                instances.push(JointInstance {
                    pos: body.joint_world(joint.index).to_array(),
                    radius: JOINT_RADIUS * joint.transform.scale.x,
                    color: [
                        rgb[0] as f32 / 255.0,
                        rgb[1] as f32 / 255.0,
                        rgb[2] as f32 / 255.0,
                        1.0,
                    ],
                });
            }
        }
        if instances.len() > self.joint_capacity {
            self.joint_capacity = instances.len().next_power_of_two();
            self.joint_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("joint_vb"),
                size: (std::mem::size_of::<JointInstance>() * self.joint_capacity) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.joint_vb, 0, bytemuck::cast_slice(&instances));
        }
        instances.len() as u32
    }

    /// Draw the scene. `suppress_background` renders one clean frame over the
    /// clear color so snapshots never bake the backdrop in.
    pub fn render(
        &mut self,
        scene: &Scene,
        suppress_background: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let rot = scene.camera.quat();
        let right = rot * glam::Vec3::X;
        let up = rot * glam::Vec3::Y;
        let forward = scene.camera.forward();
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: scene.camera.view_proj().to_cols_array_2d(),
                right: [right.x, right.y, right.z, 0.0],
                up: [up.x, up.y, up.z, 0.0],
                forward: [forward.x, forward.y, forward.z, 0.0],
            }),
        );

        if self.uploaded_epoch != Some(scene.geometry_epoch()) {
            self.upload_geometry(scene);
            self.uploaded_epoch = Some(scene.geometry_epoch());
        }
        let joint_count = self.upload_joints(scene);

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
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(bg) = self.background.as_ref().filter(|_| !suppress_background) {
                rpass.set_pipeline(&self.bg_pipeline);
                rpass.set_bind_group(0, &bg.bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }
            if self.ribbon_index_count > 0 {
                rpass.set_pipeline(&self.ribbon_pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.ribbon_vb.slice(..));
                rpass.set_index_buffer(self.ribbon_ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.ribbon_index_count, 0, 0..1);
            }
            if joint_count > 0 {
                rpass.set_pipeline(&self.joint_pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.joint_vb.slice(..));
                rpass.draw(0..6, 0..joint_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
