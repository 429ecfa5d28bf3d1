//! Small floating house that tilts with the page scroll.

use crate::backend::Renderer;
use crate::constants::*;
use crate::easing::ease_toward;
use crate::error::RenderError;
use crate::geometry::Geometry;
use crate::scene::{Camera, Group, Light, Material, Mesh, Scene};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::rc::Rc;

/// Scroll offset to target rotation mapping.
///
/// With `progress = scroll * progress_per_px`:
/// `x = sin(progress * x_freq) * x_amp`, `y = progress * y_rate`,
/// `z = cos(progress * z_freq) * z_amp`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRotation {
    pub progress_per_px: f32,
    pub x_freq: f32,
    pub x_amp: f32,
    pub y_rate: f32,
    pub z_freq: f32,
    pub z_amp: f32,
}

impl Default for ScrollRotation {
    fn default() -> Self {
        Self {
            progress_per_px: 0.01,
            x_freq: 0.5,
            x_amp: 0.2,
            y_rate: 0.3,
            z_freq: 0.3,
            z_amp: 0.1,
        }
    }
}

impl ScrollRotation {
    pub fn target_for(&self, scroll_y: f32) -> Vec3 {
        let progress = scroll_y * self.progress_per_px;
        Vec3::new(
            (progress * self.x_freq).sin() * self.x_amp,
            progress * self.y_rate,
            (progress * self.z_freq).cos() * self.z_amp,
        )
    }
}

#[derive(Clone, Debug)]
pub struct MiniHouseConfig {
    pub camera_fov_deg: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_position: Vec3,
    pub scroll: ScrollRotation,
    pub ease: f32,
    pub float_speed: f64,
    pub float_amplitude: f32,
}

impl Default for MiniHouseConfig {
    fn default() -> Self {
        Self {
            camera_fov_deg: MINI_CAMERA_FOV_DEG,
            camera_near: MINI_CAMERA_NEAR,
            camera_far: MINI_CAMERA_FAR,
            camera_position: MINI_CAMERA_POSITION,
            scroll: ScrollRotation::default(),
            ease: MINI_ROTATION_EASE,
            float_speed: MINI_FLOAT_SPEED,
            float_amplitude: MINI_FLOAT_AMPLITUDE,
        }
    }
}

/// Assemble the house from primitives. Offsets are relative to the group
/// origin, which sits roughly at the middle of the walls.
pub fn build_house() -> Group {
    let mut house = Group::default();

    house.add(
        Mesh::new(
            Rc::new(Geometry::cuboid(3.2, 0.2, 2.2)),
            Material::lambert(HOUSE_FOUNDATION),
        )
        .at(Vec3::new(0.0, -0.6, 0.0))
        .shadows(true, true),
    );
    house.add(
        Mesh::new(Rc::new(Geometry::cuboid(3.0, 2.0, 2.0)), Material::lambert(HOUSE_WALL))
            .at(Vec3::new(0.0, 0.5, 0.0))
            .shadows(true, true),
    );
    house.add(
        Mesh::new(Rc::new(Geometry::cone(2.2, 1.5, 4)), Material::lambert(HOUSE_ROOF))
            .at(Vec3::new(0.0, 2.25, 0.0))
            .rotated_y(FRAC_PI_4)
            .shadows(true, false),
    );
    house.add(
        Mesh::new(Rc::new(Geometry::cuboid(0.6, 1.2, 0.05)), Material::lambert(HOUSE_DOOR))
            .at(Vec3::new(0.0, -0.1, 1.025)),
    );

    let window = Rc::new(Geometry::cuboid(0.8, 0.6, 0.05));
    let glass = Material::lambert(HOUSE_WINDOW);
    house.add(Mesh::new(window.clone(), glass).at(Vec3::new(-0.8, 0.5, 1.025)));
    house.add(Mesh::new(window.clone(), glass).at(Vec3::new(0.8, 0.5, 1.025)));
    house.add(
        Mesh::new(window, glass)
            .at(Vec3::new(1.525, 0.5, 0.0))
            .rotated_y(-FRAC_PI_2),
    );

    house.add(
        Mesh::new(Rc::new(Geometry::cuboid(0.3, 1.0, 0.3)), Material::lambert(HOUSE_CHIMNEY))
            .at(Vec3::new(0.8, 2.5, -0.5))
            .shadows(true, false),
    );

    add_garden(&mut house);
    house
}

fn add_garden(house: &mut Group) {
    house.add(
        Mesh::new(Rc::new(Geometry::cylinder(1.8, 1.8, 0.1, 8)), Material::lambert(HOUSE_GRASS))
            .at(Vec3::new(0.0, -0.55, 1.5))
            .shadows(false, true),
    );
    house.add(
        Mesh::new(
            Rc::new(Geometry::cylinder(0.05, 0.08, 0.6, 32)),
            Material::lambert(HOUSE_TRUNK),
        )
        .at(Vec3::new(-2.0, -0.2, 1.5))
        .shadows(true, false),
    );
    house.add(
        Mesh::new(Rc::new(Geometry::sphere(0.4, 32, 16)), Material::lambert(HOUSE_LEAVES))
            .at(Vec3::new(-2.0, 0.3, 1.5))
            .shadows(true, false),
    );
}

pub struct MiniHouse<R: Renderer> {
    config: MiniHouseConfig,
    scene: Scene,
    camera: Camera,
    renderer: Option<R>,
    target_rotation: Vec3,
    current_rotation: Vec3,
}

impl<R: Renderer> MiniHouse<R> {
    /// Build camera, house and lights for a container of the given size.
    pub fn new(config: MiniHouseConfig, container: (u32, u32)) -> Self {
        let (w, h) = container;
        let mut camera = Camera::perspective(
            config.camera_fov_deg,
            w.max(1) as f32 / h.max(1) as f32,
            config.camera_near,
            config.camera_far,
        );
        camera.eye = config.camera_position;
        camera.look_at(Vec3::ZERO);

        let mut scene = Scene {
            model: Some(build_house()),
            ..Scene::default()
        };
        scene.add_light(Light::ambient(MINI_AMBIENT.0, MINI_AMBIENT.1));
        scene.add_light(Light::directional(MINI_SUN.0, MINI_SUN.1, MINI_SUN.2));
        scene.add_light(Light::point(
            MINI_ACCENT.0,
            MINI_ACCENT.1,
            MINI_ACCENT.2,
            MINI_ACCENT.3,
        ));

        Self {
            config,
            scene,
            camera,
            renderer: None,
            target_rotation: Vec3::ZERO,
            current_rotation: Vec3::ZERO,
        }
    }

    pub fn attach_renderer(&mut self, mut renderer: R, container: (u32, u32)) {
        renderer.set_size(container.0, container.1);
        self.renderer = Some(renderer);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn house(&self) -> Option<&Group> {
        self.scene.model.as_ref()
    }

    pub fn target_rotation(&self) -> Vec3 {
        self.target_rotation
    }

    pub fn current_rotation(&self) -> Vec3 {
        self.current_rotation
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.target_rotation = self.config.scroll.target_for(scroll_y);
    }

    /// Follow the container size. Hidden (zero-sized) containers are skipped.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        self.camera.set_viewport(width, height);
        renderer.set_size(width, height);
    }

    /// Ease toward the scroll target, bob on wall-clock `time_sec` and draw.
    pub fn frame(&mut self, time_sec: f64) -> Result<(), RenderError> {
        let Some(house) = self.scene.model.as_mut() else {
            return Ok(());
        };
        self.current_rotation = ease_toward(self.current_rotation, self.target_rotation, self.config.ease);
        house.rotation = self.current_rotation;
        house.position.y =
            (time_sec * self.config.float_speed).sin() as f32 * self.config.float_amplitude;

        match self.renderer.as_mut() {
            Some(r) => r.render(&self.scene, &self.camera),
            None => Ok(()),
        }
    }

    pub fn destroy(&mut self) {
        if let Some(mut r) = self.renderer.take() {
            r.dispose();
        }
        self.scene.model = None;
    }
}
