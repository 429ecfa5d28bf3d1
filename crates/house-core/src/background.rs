//! Full-viewport background scene: a slowly spinning loaded model, city
//! lights, fog and a sparse particle field that reacts to the pointer.

use crate::asset::ModelSlot;
use crate::backend::{ModelLoader, Renderer, ScaleTween, Tweener};
use crate::constants::*;
use crate::easing::{normalized_pointer, CameraFollow, ManualPulse};
use crate::error::RenderError;
use crate::particles::{ExplosionConfig, ParticleField, SpawnBounds};
use crate::scene::{Camera, Color, Fog, Group, Light, Points, PointsMaterial, Scene, ToneMapping};
use glam::Vec3;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub camera_fov_deg: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_base: Vec3,
    pub camera_mouse_span: Vec3,
    pub camera_follow: f32,
    pub fog: Fog,
    pub exposure: f32,
    pub particle_count: usize,
    pub spawn: SpawnBounds,
    pub explosion: ExplosionConfig,
    pub points: PointsMaterial,
    /// (size, opacity) while the pointer is over the page.
    pub hover_points: (f32, f32),
    /// (size, opacity) after the pointer leaves.
    pub leave_points: (f32, f32),
    pub spin_idle: f32,
    pub spin_hover: f32,
    pub model_path: String,
    pub model_scale: f32,
    pub model_position: Vec3,
    pub model_opacity: f32,
    pub pulse_scale: f32,
    pub pulse_steps: u32,
    pub pulse_half_sec: f32,
    pub visibility_section_id: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let half_xz = PARTICLE_SPREAD_XZ * 0.5;
        Self {
            camera_fov_deg: BG_CAMERA_FOV_DEG,
            camera_near: BG_CAMERA_NEAR,
            camera_far: BG_CAMERA_FAR,
            camera_base: BG_CAMERA_BASE,
            camera_mouse_span: BG_CAMERA_MOUSE_SPAN,
            camera_follow: BG_CAMERA_FOLLOW,
            fog: Fog {
                color: Color::from_hex(BG_FOG_COLOR),
                near: BG_FOG_NEAR,
                far: BG_FOG_FAR,
            },
            exposure: BG_EXPOSURE,
            particle_count: PARTICLE_COUNT,
            spawn: SpawnBounds {
                min: Vec3::new(-half_xz, PARTICLE_Y_MIN, -half_xz),
                max: Vec3::new(half_xz, PARTICLE_Y_MIN + PARTICLE_Y_SPAN, half_xz),
                velocity_span: Vec3::new(PARTICLE_SPEED_XZ, PARTICLE_SPEED_Y, PARTICLE_SPEED_XZ),
            },
            explosion: ExplosionConfig {
                strength: EXPLOSION_STRENGTH,
                damping_delay: Duration::from_millis(EXPLOSION_DAMPING_DELAY_MS),
                damping: EXPLOSION_DAMPING,
            },
            points: PointsMaterial {
                color: Color::from_hex(PARTICLE_COLOR),
                size: PARTICLE_SIZE,
                opacity: PARTICLE_OPACITY,
                additive: true,
                size_attenuation: true,
                fog: false,
            },
            hover_points: (PARTICLE_HOVER_SIZE, PARTICLE_HOVER_OPACITY),
            leave_points: (PARTICLE_LEAVE_SIZE, PARTICLE_LEAVE_OPACITY),
            spin_idle: MODEL_SPIN_IDLE,
            spin_hover: MODEL_SPIN_HOVER,
            model_path: MODEL_PATH.to_string(),
            model_scale: MODEL_SCALE,
            model_position: MODEL_POSITION,
            model_opacity: MODEL_OPACITY,
            pulse_scale: PULSE_SCALE,
            pulse_steps: PULSE_STEPS,
            pulse_half_sec: PULSE_TWEEN_HALF_SEC,
            visibility_section_id: VISIBILITY_SECTION_ID.to_string(),
        }
    }
}

enum Pulse {
    Manual(ManualPulse),
    Tween(Box<dyn ScaleTween>),
}

pub struct BackgroundScene<R: Renderer> {
    config: BackgroundConfig,
    scene: Scene,
    camera: Camera,
    follow: CameraFollow,
    renderer: Option<R>,
    model_slot: ModelSlot,
    viewport: (u32, u32),
    spin: f32,
    hovering: bool,
    pulse: Option<Pulse>,
}

impl<R: Renderer> BackgroundScene<R> {
    /// Build scene, camera, lights and particles. No renderer is attached yet;
    /// frames before [`BackgroundScene::attach_renderer`] only advance state.
    pub fn new<G: Rng>(config: BackgroundConfig, viewport: (u32, u32), rng: &mut G) -> Self {
        let mut scene = Scene {
            fog: Some(config.fog),
            tone_mapping: ToneMapping::AcesFilmic {
                exposure: config.exposure,
            },
            ..Scene::default()
        };

        let (w, h) = viewport;
        let mut camera = Camera::perspective(
            config.camera_fov_deg,
            w.max(1) as f32 / h.max(1) as f32,
            config.camera_near,
            config.camera_far,
        );
        camera.eye = config.camera_base;
        camera.look_at(Vec3::ZERO);
        let follow = CameraFollow::new(
            config.camera_base,
            config.camera_mouse_span,
            config.camera_follow,
        );

        scene.add_light(Light::ambient(BG_AMBIENT.0, BG_AMBIENT.1));
        scene.add_light(Light::directional(BG_MOON.0, BG_MOON.1, BG_MOON.2));
        for (hex, intensity, position) in BG_CITY_LIGHTS {
            scene.add_light(Light::point(hex, intensity, BG_CITY_LIGHT_RANGE, position));
        }

        let field = ParticleField::spawn(config.particle_count, &config.spawn, config.explosion, rng);
        scene.points = Some(Points {
            field,
            material: config.points,
        });
        log::info!(
            "[background] scene ready: {} lights, {} particles",
            scene.lights.len(),
            config.particle_count
        );

        let spin = config.spin_idle;
        Self {
            config,
            scene,
            camera,
            follow,
            renderer: None,
            model_slot: ModelSlot::new(),
            viewport,
            spin,
            hovering: false,
            pulse: None,
        }
    }

    pub fn attach_renderer(&mut self, mut renderer: R) {
        renderer.set_size(self.viewport.0, self.viewport.1);
        self.renderer = Some(renderer);
    }

    /// Kick off the asynchronous model load. The render loop picks the model up
    /// on the first frame after it arrives.
    pub fn begin_model_load<L: ModelLoader + ?Sized>(&self, loader: &L) {
        log::info!("[background] loading model {}", self.config.model_path);
        loader.load(&self.config.model_path, self.model_slot.pending());
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn model(&self) -> Option<&Group> {
        self.scene.model.as_ref()
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.scene.points.as_ref().map(|p| &p.field)
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Current model spin in radians per frame.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        let pointer = normalized_pointer(
            client_x,
            client_y,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
        );
        self.follow.aim(pointer);
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovering = true;
        self.spin = self.config.spin_hover;
        self.set_points_look(self.config.hover_points);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovering = false;
        self.spin = self.config.spin_idle;
        self.set_points_look(self.config.leave_points);
    }

    fn set_points_look(&mut self, (size, opacity): (f32, f32)) {
        if let Some(points) = self.scene.points.as_mut() {
            points.material.size = size;
            points.material.opacity = opacity;
        }
    }

    /// Explode the particles and pulse the model if it has loaded. Returns the
    /// number of particles that received an impulse.
    pub fn on_click<T: Tweener + ?Sized>(&mut self, tweener: &T) -> usize {
        let pushed = self
            .scene
            .points
            .as_mut()
            .map(|p| p.field.explode())
            .unwrap_or(0);

        if self.scene.model.is_some() {
            let rest = Vec3::splat(self.config.model_scale);
            let peak = rest * self.config.pulse_scale;
            self.pulse = Some(
                match tweener.scale_pulse(rest, peak, self.config.pulse_half_sec) {
                    Some(tween) => Pulse::Tween(tween),
                    None => Pulse::Manual(ManualPulse::new(rest, peak, self.config.pulse_steps)),
                },
            );
        }
        log::debug!("[background] click: {} particles pushed", pushed);
        pushed
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
        if let Some(r) = self.renderer.as_mut() {
            r.set_size(width, height);
        }
    }

    /// Advance one animation frame and draw it.
    pub fn frame(&mut self, dt: Duration) -> Result<(), RenderError> {
        if let Some(model) = self.model_slot.take() {
            self.install_model(model);
        }

        self.camera.eye = self.follow.step(self.camera.eye);
        self.camera.look_at(Vec3::ZERO);

        if let Some(model) = self.scene.model.as_mut() {
            model.rotation.y += self.spin;
            let scale = match self.pulse.as_mut() {
                Some(Pulse::Manual(p)) => p.next(),
                Some(Pulse::Tween(t)) => t.sample(),
                None => None,
            };
            match scale {
                Some(s) => model.scale = s,
                None if self.pulse.take().is_some() => {
                    model.scale = Vec3::splat(self.config.model_scale);
                }
                None => {}
            }
        }

        if let Some(points) = self.scene.points.as_mut() {
            points.field.tick(dt);
        }

        match self.renderer.as_mut() {
            Some(r) => r.render(&self.scene, &self.camera),
            None => Ok(()),
        }
    }

    fn install_model(&mut self, mut model: Group) {
        model.scale = Vec3::splat(self.config.model_scale);
        model.position = self.config.model_position;
        let opacity = self.config.model_opacity;
        model.traverse_mut(|mesh| {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
            mesh.material.transparent = true;
            mesh.material.opacity = opacity;
        });
        log::info!("[background] model installed ({} meshes)", model.meshes.len());
        self.scene.model = Some(model);
    }

    /// Stop drawing and release the renderer. The scene state stays readable.
    pub fn destroy(&mut self) {
        if let Some(mut r) = self.renderer.take() {
            r.dispose();
        }
        self.pulse = None;
    }
}
