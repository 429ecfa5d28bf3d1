use super::helpers::{self, PipelineDesc};
use fnv::{FnvHashMap, FnvHashSet};
use glam::{Mat3, Mat4};
use house_core::{Geometry, Group, Mesh};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshInstance {
    model: [[f32; 4]; 4],
    // inverse-transpose of the upper 3x3, padded to vec4 columns
    normal: [[f32; 4]; 3],
    // linear rgb, opacity
    color: [f32; 4],
}

impl MeshInstance {
    fn new(world: Mat4, mesh: &Mesh) -> Self {
        let n = Mat3::from_mat4(world).inverse().transpose();
        let material = &mesh.material;
        let alpha = if material.transparent {
            material.opacity
        } else {
            1.0
        };
        Self {
            model: world.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            color: [material.color.r, material.color.g, material.color.b, alpha],
        }
    }
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4, 8 => Float32x4, 9 => Float32x4,
];

struct GpuMesh {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, geometry: &Geometry) -> Self {
        let buffer = |label: &str, contents: &[u8], usage: wgpu::BufferUsages| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
        };
        Self {
            positions: buffer(
                "mesh_positions",
                bytemuck::cast_slice(&geometry.positions),
                wgpu::BufferUsages::VERTEX,
            ),
            normals: buffer(
                "mesh_normals",
                bytemuck::cast_slice(&geometry.normals),
                wgpu::BufferUsages::VERTEX,
            ),
            indices: buffer(
                "mesh_indices",
                bytemuck::cast_slice(&geometry.indices),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: geometry.indices.len() as u32,
        }
    }
}

struct Draw {
    geometry: u64,
    instance: u32,
}

/// Lambert meshes of the scene's model group. Geometry buffers are cached by
/// geometry id and dropped once a geometry stops being drawn.
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    cache: FnvHashMap<u64, GpuMesh>,
    instances: wgpu::Buffer,
    capacity: usize,
    draws: Vec<Draw>,
}

impl MeshPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        globals_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(house_core::MESH_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[globals_layout],
            push_constant_ranges: &[],
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![1 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let pipeline = helpers::make_scene_pipeline(
            device,
            &PipelineDesc {
                label: "mesh_pipeline",
                layout: &layout,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                buffers: &buffers,
                color_format,
                blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let capacity = helpers::grow_capacity(0, 1);
        Self {
            pipeline,
            cache: FnvHashMap::default(),
            instances: instance_buffer(device, capacity),
            capacity,
            draws: Vec::new(),
        }
    }

    /// Upload per-mesh transforms for this frame. Opaque meshes draw first.
    pub(crate) fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, model: Option<&Group>) {
        self.draws.clear();
        let Some(group) = model else {
            self.cache.clear();
            return;
        };

        let root = group.matrix();
        let mut order: Vec<&Mesh> = group.meshes.iter().collect();
        order.sort_by_key(|m| m.material.transparent);

        let mut instances = Vec::with_capacity(order.len());
        for mesh in order {
            let geometry = &mesh.geometry;
            if geometry.indices.is_empty() {
                continue;
            }
            self.cache
                .entry(geometry.id())
                .or_insert_with(|| GpuMesh::upload(device, geometry));
            self.draws.push(Draw {
                geometry: geometry.id(),
                instance: instances.len() as u32,
            });
            instances.push(MeshInstance::new(root * mesh.local, mesh));
        }

        let used: FnvHashSet<u64> = self.draws.iter().map(|d| d.geometry).collect();
        self.cache.retain(|id, _| used.contains(id));
        if instances.is_empty() {
            return;
        }
        let capacity = helpers::grow_capacity(self.capacity, instances.len());
        if capacity != self.capacity {
            self.instances = instance_buffer(device, capacity);
            self.capacity = capacity;
        }
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&instances));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.draws.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(2, self.instances.slice(..));
        for d in &self.draws {
            let Some(mesh) = self.cache.get(&d.geometry) else {
                continue;
            };
            pass.set_vertex_buffer(0, mesh.positions.slice(..));
            pass.set_vertex_buffer(1, mesh.normals.slice(..));
            pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, d.instance..d.instance + 1);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.draws.clear();
        self.cache.clear();
    }
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("mesh_instances"),
        size: (capacity * std::mem::size_of::<MeshInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
