//! WebGPU backend for the widgets: one surface per canvas, a Lambert mesh
//! pass and an instanced sprite pass sharing a depth buffer.

mod helpers;
mod meshes;
mod points;
mod targets;

use crate::dom;
use bytemuck::Zeroable;
use glam::Vec3;
use house_core::{Camera, Light, RenderError, Renderer, Scene, ToneMapping};
use meshes::MeshPass;
use points::PointsPass;
use targets::DepthTarget;
use web_sys as web;

const MAX_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightRaw {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    viewport: [f32; 4],
    counts: [u32; 4],
    lights: [LightRaw; MAX_LIGHTS],
}

impl Globals {
    fn new(scene: &Scene, camera: &Camera, width: u32, height: u32) -> Self {
        let mut g = Globals::zeroed();
        g.view_proj = camera.view_projection().to_cols_array_2d();
        g.camera_pos = camera.eye.extend(1.0).to_array();

        let mut ambient = Vec3::ZERO;
        let mut n = 0;
        for light in &scene.lights {
            let raw = match *light {
                Light::Ambient { color, intensity } => {
                    ambient += Vec3::from(color.scaled(intensity));
                    continue;
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                    ..
                } => LightRaw {
                    position: position.normalize_or_zero().extend(0.0).to_array(),
                    color: Vec3::from(color.scaled(intensity)).extend(0.0).to_array(),
                },
                Light::Point {
                    color,
                    intensity,
                    position,
                    distance,
                } => LightRaw {
                    position: position.extend(1.0).to_array(),
                    color: Vec3::from(color.scaled(intensity)).extend(distance).to_array(),
                },
            };
            if n == MAX_LIGHTS {
                log::warn!("[gpu] more than {} lights; extra lights ignored", MAX_LIGHTS);
                break;
            }
            g.lights[n] = raw;
            n += 1;
        }
        g.ambient = ambient.extend(1.0).to_array();
        g.counts = [n as u32, 0, 0, 0];

        if let Some(fog) = scene.fog {
            g.fog_color = [fog.color.r, fog.color.g, fog.color.b, 1.0];
            g.fog_range[0] = fog.near;
            g.fog_range[1] = fog.far;
        }
        if let ToneMapping::AcesFilmic { exposure } = scene.tone_mapping {
            g.fog_range[2] = exposure;
            g.fog_range[3] = 1.0;
        }
        g.viewport = [width as f32, height as f32, camera.aspect, 0.0];
        g
    }
}

pub struct GpuRenderer {
    label: &'static str,
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,
    globals_buffer: wgpu::Buffer,
    globals_group: wgpu::BindGroup,
    meshes: MeshPass,
    points: PointsPass,
    css_size: (u32, u32),
    max_pixel_ratio: f64,
    disposed: bool,
}

impl GpuRenderer {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        max_pixel_ratio: f64,
        label: &'static str,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some(label),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

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
        // Browsers expose non-sRGB canvas formats; write through an sRGB view
        let view_format = format.add_srgb_suffix();
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let globals_layout = helpers::uniform_layout(
            &device,
            "globals_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_group =
            helpers::uniform_bind_group(&device, "globals_bg", &globals_layout, &globals_buffer);

        let meshes = MeshPass::new(&device, &globals_layout, view_format);
        let points = PointsPass::new(&device, &globals_layout, view_format);
        let depth = DepthTarget::new(&device, width, height);

        log::info!(
            "[gpu] {} ready: format {:?} (view {:?}), alpha {:?}",
            label,
            format,
            view_format,
            alpha_mode
        );
        Ok(Self {
            label,
            canvas,
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            globals_buffer,
            globals_group,
            meshes,
            points,
            css_size: (0, 0),
            max_pixel_ratio,
            disposed: false,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl Renderer for GpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.css_size = (width, height);
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        let (w_px, h_px) = dom::sync_canvas_size(&self.canvas, width, height, self.max_pixel_ratio);
        let max = self.device.limits().max_texture_dimension_2d;
        let (w_px, h_px) = (w_px.clamp(1, max), h_px.clamp(1, max));
        if (w_px, h_px) == (self.config.width, self.config.height) {
            return;
        }
        self.config.width = w_px;
        self.config.height = h_px;
        self.reconfigure();
        self.depth.recreate(&self.device, w_px, h_px);
    }

    fn size(&self) -> (u32, u32) {
        self.css_size
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        if self.disposed || self.css_size.0 == 0 || self.css_size.1 == 0 {
            return Ok(());
        }
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                self.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Err(RenderError::SurfaceOutdated);
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(RenderError::Timeout),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Backend(e.to_string())),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        let globals = Globals::new(scene, camera, self.config.width, self.config.height);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.meshes
            .prepare(&self.device, &self.queue, scene.model.as_ref());
        self.points
            .prepare(&self.device, &self.queue, scene.points.as_ref());

        let clear = scene
            .background
            .map(|c| wgpu::Color {
                r: c.r as f64,
                g: c.g as f64,
                b: c.b as f64,
                a: 1.0,
            })
            .unwrap_or(wgpu::Color::TRANSPARENT);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(self.label),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_group, &[]);
            self.meshes.draw(&mut rpass);
            self.points.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.meshes.clear();
        self.device.destroy();
        log::info!("[gpu] {} disposed", self.label);
    }
}
