//! SDF-based WebGPU render pipeline
//!
//! Renders the entire scene in the fragment shader using signed distance
//! fields: the orb, every heart and cube, the glow, and the starfield all
//! come out of one fullscreen triangle.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::settings::Settings;
use crate::sim::GameState;

/// Maximum number of hearts drawn per frame
const MAX_HEARTS: usize = 64;
/// Maximum number of obstacle cubes drawn per frame
const MAX_OBSTACLES: usize = 64;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    time: f32,            // offset 8
    player_y: f32,        // offset 12
    heart_count: u32,     // offset 16
    obstacle_count: u32,  // offset 20
    glow: f32,            // offset 24
    starfield: u32,       // offset 28
    collect_flash: f32,   // offset 32
    _pad: [f32; 3],       // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct HeartData {
    pos: [f32; 3],
    spin: f32, // fills the vec3 alignment tail, 16 bytes total
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObstacleData {
    pos: [f32; 3],
    rot_x: f32,
    rot_y: f32,
    _pad: [f32; 3], // pad to 32 bytes for array stride
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    hearts_buffer: wgpu::Buffer,
    obstacles_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),

    /// Collect pulse, 1.0 on the frame a heart is grabbed, decaying to 0
    collect_flash: f32,
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);
        log::info!("Surface alpha modes: {:?}", surface_caps.alpha_modes);
        log::info!("Surface present modes: {:?}", surface_caps.present_modes);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!(
            "Surface config: {}x{}, alpha: {:?}",
            width,
            height,
            config.alpha_mode
        );
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                time: 0.0,
                player_y: 0.0,
                heart_count: 0,
                obstacle_count: 0,
                glow: 1.0,
                starfield: 1,
                collect_flash: 0.0,
                _pad: [0.0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let hearts_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hearts"),
            size: (std::mem::size_of::<HeartData>() * MAX_HEARTS) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let obstacles_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("obstacles"),
            size: (std::mem::size_of::<ObstacleData>() * MAX_OBSTACLES) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
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
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: hearts_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: obstacles_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            hearts_buffer,
            obstacles_buffer,
            bind_group,
            size: (width, height),
            collect_flash: 0.0,
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Kick the collect pulse; it decays over the next few frames
    pub fn flash(&mut self) {
        self.collect_flash = 1.0;
    }

    /// Update GPU buffers from game state and render
    pub fn render(
        &mut self,
        state: &GameState,
        settings: &Settings,
        time: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        // time is ms since page load from requestAnimationFrame
        let elapsed = (time / 1000.0) as f32;

        self.collect_flash *= 0.9;
        if self.collect_flash < 0.01 {
            self.collect_flash = 0.0;
        }

        let heart_count = state.hearts.len().min(MAX_HEARTS) as u32;
        let obstacle_count = state.obstacles.len().min(MAX_OBSTACLES) as u32;

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            time: elapsed,
            player_y: state.player.pos.y,
            heart_count,
            obstacle_count,
            glow: settings.glow_strength(),
            starfield: if settings.starfield_enabled() { 1 } else { 0 },
            collect_flash: self.collect_flash,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut hearts_data = vec![
            HeartData {
                pos: [0.0; 3],
                spin: 0.0,
            };
            MAX_HEARTS
        ];
        for (i, heart) in state.hearts.iter().take(MAX_HEARTS).enumerate() {
            hearts_data[i] = HeartData {
                pos: heart.pos.to_array(),
                spin: heart.spin,
            };
        }
        self.queue
            .write_buffer(&self.hearts_buffer, 0, bytemuck::cast_slice(&hearts_data));

        let mut obstacles_data = vec![
            ObstacleData {
                pos: [0.0; 3],
                rot_x: 0.0,
                rot_y: 0.0,
                _pad: [0.0; 3],
            };
            MAX_OBSTACLES
        ];
        for (i, obstacle) in state.obstacles.iter().take(MAX_OBSTACLES).enumerate() {
            obstacles_data[i] = ObstacleData {
                pos: obstacle.pos.to_array(),
                rot_x: obstacle.rot_x,
                rot_y: obstacle.rot_y,
                _pad: [0.0; 3],
            };
        }
        self.queue.write_buffer(
            &self.obstacles_buffer,
            0,
            bytemuck::cast_slice(&obstacles_data),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
