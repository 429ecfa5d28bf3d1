//! Loaded-model plumbing: the pending-model slot polled by the render loop and
//! the GLB to [`Group`] conversion.

use crate::error::AssetError;
use crate::geometry::Geometry;
use crate::scene::{Color, Group, Material, Mesh};
use glam::Mat4;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Owner side of a model that may arrive later. Held by the widget state.
#[derive(Debug, Default)]
pub struct ModelSlot(Rc<RefCell<Option<Group>>>);

impl ModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader-side handle. It does not keep the widget's slot alive.
    pub fn pending(&self) -> PendingModel {
        PendingModel(Rc::downgrade(&self.0))
    }

    pub fn take(&self) -> Option<Group> {
        self.0.borrow_mut().take()
    }
}

#[derive(Clone, Debug)]
pub struct PendingModel(Weak<RefCell<Option<Group>>>);

impl PendingModel {
    /// Hand the finished model to the widget. Returns `false` if the widget has
    /// already been torn down, in which case the model is dropped.
    pub fn deliver(&self, group: Group) -> bool {
        match self.0.upgrade() {
            Some(slot) => {
                *slot.borrow_mut() = Some(group);
                true
            }
            None => false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Size announced by a `content-length` header, if it is a usable number.
pub fn content_length(header: Option<&str>) -> Option<u64> {
    header?.trim().parse().ok()
}

/// Flatten the default scene of a GLB (or embedded glTF) into a single group.
///
/// Node hierarchies are baked into per-mesh matrices. Only triangle primitives
/// are kept; textures are ignored and the base color factor becomes the
/// Lambert color.
pub fn parse_glb(bytes: &[u8]) -> Result<Group, AssetError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(AssetError::NoScene)?;

    let mut converted: Vec<Option<Vec<(Rc<Geometry>, Material)>>> =
        vec![None; document.meshes().len()];
    let mut group = Group::default();
    for node in scene.nodes() {
        visit_node(&node, Mat4::IDENTITY, &buffers, &mut converted, &mut group)?;
    }
    if group.meshes.is_empty() {
        return Err(AssetError::Empty);
    }
    log::debug!("[model] parsed {} meshes", group.meshes.len());
    Ok(group)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    converted: &mut [Option<Vec<(Rc<Geometry>, Material)>>],
    group: &mut Group,
) -> Result<(), AssetError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let index = mesh.index();
        if converted[index].is_none() {
            converted[index] = Some(convert_mesh(&mesh, buffers)?);
        }
        for (geometry, material) in converted[index].iter().flatten() {
            let mut m = Mesh::new(geometry.clone(), *material);
            m.local = world;
            group.add(m);
        }
    }
    for child in node.children() {
        visit_node(&child, world, buffers, converted, group)?;
    }
    Ok(())
}

fn convert_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
) -> Result<Vec<(Rc<Geometry>, Material)>, AssetError> {
    let mut out = Vec::new();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| AssetError::MissingPositions(mesh.name().unwrap_or("").to_string()))?
            .collect();
        let normals = reader.read_normals().map(|n| n.collect());
        let indices = reader.read_indices().map(|i| i.into_u32().collect());

        let gltf_material = primitive.material();
        let [r, g, b, a] = gltf_material.pbr_metallic_roughness().base_color_factor();
        let material = Material {
            color: Color::from_linear([r, g, b]),
            opacity: a,
            transparent: gltf_material.alpha_mode() == gltf::material::AlphaMode::Blend,
        };
        out.push((
            Rc::new(Geometry::from_mesh_data(positions, normals, indices)),
            material,
        ));
    }
    Ok(out)
}
