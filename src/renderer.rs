use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rochambeau::{AgentView, Kind};
use std::{error::Error, mem, sync::Arc};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.094,
    g: 0.094,
    b: 0.094,
    a: 1.0,
};
const INITIAL_INSTANCE_CAPACITY: usize = 1024;
const QUAD_CORNERS: u32 = 4;

// Flat fill colours, one per kind
const ROCK_COLOR: [f32; 4] = [0.71, 0.71, 0.78, 1.0]; // light gray-blue
const PAPER_COLOR: [f32; 4] = [0.78, 0.9, 0.78, 1.0]; // light green
const SCISSORS_COLOR: [f32; 4] = [0.9, 0.63, 0.63, 1.0]; // light red

pub fn kind_color(kind: Kind) -> [f32; 4] {
    match kind {
        Kind::Rock => ROCK_COLOR,
        Kind::Paper => PAPER_COLOR,
        Kind::Scissors => SCISSORS_COLOR,
    }
}

/// Uniform block shared by every draw: window and arena extents.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Globals {
    screen_resolution: [f32; 2],
    arena_size: [f32; 2],
}

/// Per-agent instance attributes. Quad corners come from `vertex_index`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct AgentInstance {
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
}

impl AgentInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32, 2 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    instance_capacity: usize,
    globals: Globals,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, arena_size: Vec2) -> Result<Self, Box<dyn Error>> {
        let inner = window.inner_size();
        let (width, height) = (inner.width.max(1), inner.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("no compatible graphics adapter")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Arena Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_config = surface
            .get_default_config(&adapter, width, height)
            .ok_or("surface is not supported by the adapter")?;
        surface.configure(&device, &surface_config);

        let globals = Globals {
            screen_resolution: [width as f32, height as f32],
            arena_size: arena_size.into(),
        };
        let (globals_buffer, globals_layout, globals_bind_group) =
            create_globals(&device, &globals);
        let pipeline = create_pipeline(&device, surface_config.format, &globals_layout);
        let instances = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            instances,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            globals,
            globals_buffer,
            globals_bind_group,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if new_size.width == self.surface_config.width
            && new_size.height == self.surface_config.height
        {
            return;
        }
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.globals.screen_resolution = [new_size.width as f32, new_size.height as f32];
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&self.globals));
        log::debug!("Surface resized to {}x{}", new_size.width, new_size.height);
    }

    /// Reapplies the surface configuration after the surface was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn upload_instances(&mut self, instances: &[AgentInstance]) {
        if instances.len() > self.instance_capacity {
            let capacity = instances.len().next_power_of_two();
            log::debug!(
                "Growing instance buffer from {} to {} agents",
                self.instance_capacity,
                capacity
            );
            self.instances = create_instance_buffer(&self.device, capacity);
            self.instance_capacity = capacity;
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instances, 0, bytemuck::cast_slice(instances));
        }
    }

    /// Draws every live agent as a filled circle with a dark rim.
    pub fn render(
        &mut self,
        agents: impl Iterator<Item = AgentView>,
        radius: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let batch: Vec<AgentInstance> = agents
            .filter(|a| a.alive)
            .map(|a| AgentInstance {
                center: a.position.into(),
                radius,
                color: kind_color(a.kind),
            })
            .collect();
        self.upload_instances(&batch);

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Arena Frame Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Arena Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !batch.is_empty() {
                let used = mem::size_of_val(batch.as_slice()) as wgpu::BufferAddress;
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.globals_bind_group, &[]);
                pass.set_vertex_buffer(0, self.instances.slice(..used));
                pass.draw(0..QUAD_CORNERS, 0..batch.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Agent Instances"),
        size: (capacity * mem::size_of::<AgentInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_globals(
    device: &wgpu::Device,
    globals: &Globals,
) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Arena Globals"),
        contents: bytemuck::bytes_of(globals),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Arena Globals Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(mem::size_of::<Globals>() as u64),
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Arena Globals Binding"),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, layout, bind_group)
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    globals_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Agent Circles"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Agent Circles Layout"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Agent Circles Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[AgentInstance::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
