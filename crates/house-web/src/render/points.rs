use super::helpers::{self, PipelineDesc};
use house_core::Points;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointsParams {
    // linear rgb, opacity
    color: [f32; 4],
    // size, size attenuation, fog, unused
    params: [f32; 4],
}

// Premultiplied source added onto the destination
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Particle sprites. Depth tested against the meshes but never written.
pub(crate) struct PointsPass {
    additive: wgpu::RenderPipeline,
    blended: wgpu::RenderPipeline,
    params: wgpu::Buffer,
    params_group: wgpu::BindGroup,
    centers: wgpu::Buffer,
    capacity: usize,
    count: u32,
    use_additive: bool,
}

impl PointsPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        globals_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(house_core::POINTS_WGSL.into()),
        });
        let params_layout = helpers::uniform_layout(
            device,
            "points_params_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[globals_layout, &params_layout],
            push_constant_ranges: &[],
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: 16,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![0 => Float32x4],
        }];
        let pipeline = |label: &str, blend: wgpu::BlendState| {
            helpers::make_scene_pipeline(
                device,
                &PipelineDesc {
                    label,
                    layout: &layout,
                    shader: &shader,
                    vs_entry: "vs_points",
                    fs_entry: "fs_points",
                    buffers: &buffers,
                    color_format,
                    blend,
                    depth_write: false,
                },
            )
        };
        let additive = pipeline("points_additive", ADDITIVE);
        let blended = pipeline("points_blended", wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING);

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points_params"),
            size: std::mem::size_of::<PointsParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let params_group = helpers::uniform_bind_group(device, "points_params_bg", &params_layout, &params);
        let capacity = helpers::grow_capacity(0, 64);
        Self {
            additive,
            blended,
            params,
            params_group,
            centers: center_buffer(device, capacity),
            capacity,
            count: 0,
            use_additive: true,
        }
    }

    pub(crate) fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: Option<&Points>) {
        self.count = 0;
        let Some(points) = points.filter(|p| !p.field.is_empty()) else {
            return;
        };
        let m = points.material;
        let params = PointsParams {
            color: [m.color.r, m.color.g, m.color.b, m.opacity],
            params: [
                m.size,
                if m.size_attenuation { 1.0 } else { 0.0 },
                if m.fog { 1.0 } else { 0.0 },
                0.0,
            ],
        };
        queue.write_buffer(&self.params, 0, bytemuck::bytes_of(&params));
        self.use_additive = m.additive;

        let centers: Vec<[f32; 4]> = points
            .field
            .particles()
            .iter()
            .map(|p| p.position.extend(1.0).to_array())
            .collect();
        let capacity = helpers::grow_capacity(self.capacity, centers.len());
        if capacity != self.capacity {
            self.centers = center_buffer(device, capacity);
            self.capacity = capacity;
        }
        queue.write_buffer(&self.centers, 0, bytemuck::cast_slice(&centers));
        self.count = centers.len() as u32;
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(if self.use_additive {
            &self.additive
        } else {
            &self.blended
        });
        pass.set_bind_group(1, &self.params_group, &[]);
        pass.set_vertex_buffer(0, self.centers.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}

fn center_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("points_centers"),
        size: (capacity * std::mem::size_of::<[f32; 4]>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
