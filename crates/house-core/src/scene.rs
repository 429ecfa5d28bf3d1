//! Platform-free scene graph shared by both widgets.
//!
//! These types carry no GPU handles. A [`crate::Renderer`] consumes a
//! [`Scene`] plus a [`Camera`] each frame and is free to cache whatever it
//! needs keyed on [`Geometry::id`].

use crate::geometry::Geometry;
use crate::particles::ParticleField;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::rc::Rc;

/// Linear RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Build from a 24-bit sRGB hex value such as `0x4a90e2`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn from_linear(rgb: [f32; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }

    pub fn scaled(self, k: f32) -> [f32; 3] {
        [self.r * k, self.g * k, self.b * k]
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn perspective(fov_deg: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fov_deg.to_radians(),
            znear,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Match the aspect to a new viewport. Zero-height viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Shines from `position` toward the origin.
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        cast_shadow: bool,
    },
    /// `distance` is the range at which the contribution reaches zero.
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
        distance: f32,
    },
}

impl Light {
    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Light::Ambient {
            color: Color::from_hex(hex),
            intensity,
        }
    }

    pub fn directional(hex: u32, intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color: Color::from_hex(hex),
            intensity,
            position,
            cast_shadow: true,
        }
    }

    pub fn point(hex: u32, intensity: f32, distance: f32, position: Vec3) -> Self {
        Light::Point {
            color: Color::from_hex(hex),
            intensity,
            position,
            distance,
        }
    }
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Lambert surface description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    pub fn lambert(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            opacity: 1.0,
            transparent: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    pub material: Material,
    /// Transform relative to the owning group.
    pub local: Mat4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Rc<Geometry>, material: Material) -> Self {
        Self {
            geometry,
            material,
            local: Mat4::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.local = Mat4::from_translation(position) * self.local;
        self
    }

    pub fn rotated_y(mut self, angle: f32) -> Self {
        let (scale, rotation, translation) = self.local.to_scale_rotation_translation();
        self.local = Mat4::from_scale_rotation_translation(
            scale,
            rotation * Quat::from_rotation_y(angle),
            translation,
        );
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

/// A transformable set of meshes; the unit both widgets animate.
#[derive(Clone, Debug)]
pub struct Group {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub meshes: Vec<Mesh>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            meshes: Vec::new(),
        }
    }
}

impl Group {
    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    pub fn traverse_mut(&mut self, mut f: impl FnMut(&mut Mesh)) {
        for mesh in &mut self.meshes {
            f(mesh);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    pub size: f32,
    pub opacity: f32,
    pub additive: bool,
    pub size_attenuation: bool,
    pub fog: bool,
}

#[derive(Clone, Debug)]
pub struct Points {
    pub field: ParticleField,
    pub material: PointsMaterial,
}

/// Output transform applied by the renderer after lighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToneMapping {
    None,
    AcesFilmic { exposure: f32 },
}

/// Everything a renderer needs besides the camera.
#[derive(Clone, Debug)]
pub struct Scene {
    /// `None` renders onto a transparent canvas.
    pub background: Option<Color>,
    pub fog: Option<Fog>,
    pub lights: SmallVec<[Light; 8]>,
    pub model: Option<Group>,
    pub points: Option<Points>,
    pub tone_mapping: ToneMapping,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            background: None,
            fog: None,
            lights: SmallVec::new(),
            model: None,
            points: None,
            tone_mapping: ToneMapping::None,
        }
    }
}

impl Scene {
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}
