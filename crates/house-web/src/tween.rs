//! Bridge to a page-level GSAP instance for the click pulse.

use crate::constants::{GSAP_EASE, GSAP_GLOBAL};
use glam::Vec3;
use house_core::{ScaleTween, Tweener};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone, Copy, Debug, Default)]
pub struct GsapTweener;

impl Tweener for GsapTweener {
    fn scale_pulse(&self, rest: Vec3, peak: Vec3, half_duration_sec: f32) -> Option<Box<dyn ScaleTween>> {
        let window = web::window()?;
        let gsap = Reflect::get(&window, &JsValue::from_str(GSAP_GLOBAL)).ok()?;
        if gsap.is_undefined() || gsap.is_null() {
            return None;
        }
        let target = Object::new();
        set(&target, "x", rest.x.into());
        set(&target, "y", rest.y.into());
        set(&target, "z", rest.z.into());

        let vars = Object::new();
        set(&vars, "duration", half_duration_sec.into());
        set(&vars, "x", peak.x.into());
        set(&vars, "y", peak.y.into());
        set(&vars, "z", peak.z.into());
        set(&vars, "yoyo", JsValue::TRUE);
        set(&vars, "repeat", 1.into());
        set(&vars, "ease", GSAP_EASE.into());

        let tween = match method(&gsap, "to")?.call2(&gsap, &target, &vars) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[tween] gsap.to failed: {:?}", e);
                return None;
            }
        };
        Some(Box::new(GsapScaleTween { target, tween }))
    }
}

/// Reads the scale GSAP is animating on a plain `{x, y, z}` object.
struct GsapScaleTween {
    target: Object,
    tween: JsValue,
}

impl ScaleTween for GsapScaleTween {
    fn sample(&mut self) -> Option<Vec3> {
        let progress = method(&self.tween, "totalProgress")?
            .call0(&self.tween)
            .ok()?
            .as_f64()?;
        if progress >= 1.0 {
            return None;
        }
        Some(Vec3::new(
            get(&self.target, "x")?,
            get(&self.target, "y")?,
            get(&self.target, "z")?,
        ))
    }
}

impl Drop for GsapScaleTween {
    fn drop(&mut self) {
        if let Some(kill) = method(&self.tween, "kill") {
            let _ = kill.call0(&self.tween);
        }
    }
}

fn set(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn get(obj: &Object, key: &str) -> Option<f32> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()?
        .as_f64()
        .map(|v| v as f32)
}

fn method(obj: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}
