//! Capabilities the widgets need from the outside world.
//!
//! The web front-end provides WebGPU, fetch and GSAP-backed implementations;
//! the host tests provide stubs.

use crate::asset::PendingModel;
use crate::error::RenderError;
use crate::scene::{Camera, Scene};
use glam::Vec3;

pub trait Renderer {
    /// Resize the drawing surface, in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);
    /// Last size passed to [`Renderer::set_size`], in CSS pixels.
    fn size(&self) -> (u32, u32);
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError>;
    /// Release GPU resources. Rendering after dispose is a no-op.
    fn dispose(&mut self);
}

/// Asynchronous model source. Implementations deliver the finished group into
/// `slot` whenever loading completes; failures are logged and leave it empty.
pub trait ModelLoader {
    fn load(&self, path: &str, slot: PendingModel);
}

/// A scale animation driven by something other than the render loop.
pub trait ScaleTween {
    /// Current animated scale, or `None` once the tween has finished.
    fn sample(&mut self) -> Option<Vec3>;
}

pub trait Tweener {
    /// Start a yoyo tween from `rest` to `peak` and back, taking
    /// `half_duration_sec` each way. `None` when no tweening library is available.
    fn scale_pulse(&self, rest: Vec3, peak: Vec3, half_duration_sec: f32)
        -> Option<Box<dyn ScaleTween>>;
}

/// Always falls back to the manual pulse.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTweener;

impl Tweener for NoTweener {
    fn scale_pulse(&self, _: Vec3, _: Vec3, _: f32) -> Option<Box<dyn ScaleTween>> {
        None
    }
}
