//! WebGPU render pipeline
//!
//! Presents a [`ShapeBatch`] as a single triangle-list draw. The vertex
//! buffer is kept across frames and only regrown when a batch outgrows it.

use super::batch::ShapeBatch;
use super::colors;
use super::present::Presenter;
use super::vertex::Vertex;

/// Room for a typical frame before the first regrow
const INITIAL_VERTEX_CAPACITY: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no usable format or alpha mode")]
    UnsupportedSurface,
}

/// Surface configuration for the playfield canvas, preferring an sRGB format.
/// `None` when the adapter offers no format or alpha mode for the surface.
pub fn surface_config(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()?;
    let alpha_mode = alpha_modes.first().copied()?;

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("shape_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn shape_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shape_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shape_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shape_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// GPU side of the playfield canvas
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    /// Vertices the buffer can hold
    capacity: usize,
    /// Playfield size the batch coordinates are expressed in
    playfield: (f32, f32),
    ndc: Vec<Vertex>,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        playfield: (f32, f32),
    ) -> Result<Self, RenderInitError> {
        let caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", caps.formats);
        let config = surface_config(&caps.formats, &caps.alpha_modes, width, height)
            .ok_or(RenderInitError::UnsupportedSurface)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("entangled-dash-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;
        surface.configure(&device, &config);

        let pipeline = shape_pipeline(&device, config.format);
        let vertices = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertices,
            capacity: INITIAL_VERTEX_CAPACITY,
            playfield,
            ndc: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
        })
    }

    /// Backing size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Convert the batch to clip space and copy it into the vertex buffer
    fn upload(&mut self, batch: &ShapeBatch) {
        let (w, h) = self.playfield;
        self.ndc.clear();
        self.ndc.extend(batch.vertices.iter().map(|v| v.to_ndc(w, h)));

        if self.ndc.len() > self.capacity {
            self.capacity = self.ndc.len().next_power_of_two();
            self.vertices = vertex_buffer(&self.device, self.capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
        }
        if !self.ndc.is_empty() {
            self.queue
                .write_buffer(&self.vertices, 0, bytemuck::cast_slice(&self.ndc));
        }
    }

    /// Upload the batch and present it
    pub fn render(&mut self, batch: &ShapeBatch) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        self.upload(batch);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shape_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !self.ndc.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertices.slice(..));
                pass.draw(0..self.ndc.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Presenter for RenderState {
    fn present(&mut self, batch: &ShapeBatch) -> Result<(), wgpu::SurfaceError> {
        self.render(batch)
    }

    fn reconfigure(&mut self) {
        let (w, h) = self.size();
        self.resize(w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn test_surface_config_prefers_srgb() {
        let config = surface_config(
            &[TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb],
            &[CompositeAlphaMode::Opaque],
            800,
            500,
        );
        let config = config.unwrap();
        assert_eq!(config.format, TextureFormat::Bgra8UnormSrgb);
        assert_eq!((config.width, config.height), (800, 500));
    }

    #[test]
    fn test_surface_config_falls_back_to_first_format() {
        let config = surface_config(&[TextureFormat::Rgba8Unorm], &[CompositeAlphaMode::Auto], 1, 1);
        assert_eq!(config.unwrap().format, TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn test_surface_config_rejects_empty_capabilities() {
        assert!(surface_config(&[], &[CompositeAlphaMode::Opaque], 800, 500).is_none());
        assert!(surface_config(&[TextureFormat::Rgba8Unorm], &[], 800, 500).is_none());
    }
}
