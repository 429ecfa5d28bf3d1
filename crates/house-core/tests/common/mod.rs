// Shared test doubles for the host-side widget tests.

#![allow(dead_code)]

use glam::Vec3;
use house_core::{
    Camera, Geometry, Group, Material, Mesh, ModelLoader, PendingModel, RenderError, Renderer,
    ScaleTween, Scene, Tweener,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
pub struct StubRenderer {
    pub size: (u32, u32),
    pub frames: usize,
    pub disposed: bool,
    pub last_light_count: usize,
}

impl Renderer for StubRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), RenderError> {
        if self.disposed {
            return Ok(());
        }
        self.frames += 1;
        self.last_light_count = scene.lights.len();
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

pub fn tiny_model() -> Group {
    let mut g = Group::default();
    g.add(Mesh::new(
        Rc::new(Geometry::cuboid(1.0, 1.0, 1.0)),
        Material::lambert(0xffffff),
    ));
    g
}

/// Delivers a model synchronously from `load`.
pub struct InstantLoader;

impl ModelLoader for InstantLoader {
    fn load(&self, _path: &str, slot: PendingModel) {
        slot.deliver(tiny_model());
    }
}

/// Holds on to the pending handle so the test decides when loading finishes.
#[derive(Default)]
pub struct DeferredLoader {
    pub requests: RefCell<Vec<(String, PendingModel)>>,
}

impl ModelLoader for DeferredLoader {
    fn load(&self, path: &str, slot: PendingModel) {
        self.requests.borrow_mut().push((path.to_string(), slot));
    }
}

/// Plays back a scripted list of scales.
pub struct ScriptedTween(pub VecDeque<Vec3>);

impl ScaleTween for ScriptedTween {
    fn sample(&mut self) -> Option<Vec3> {
        self.0.pop_front()
    }
}

pub struct ScriptedTweener {
    pub calls: RefCell<Vec<(Vec3, Vec3, f32)>>,
}

impl Tweener for ScriptedTweener {
    fn scale_pulse(&self, rest: Vec3, peak: Vec3, half: f32) -> Option<Box<dyn ScaleTween>> {
        self.calls.borrow_mut().push((rest, peak, half));
        Some(Box::new(ScriptedTween(VecDeque::from(vec![peak, rest]))))
    }
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

pub fn approx_vec(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}
