#![cfg(target_arch = "wasm32")]
//! Browser front-end for the house page widgets.

mod background;
mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod mini_house;
mod render;
mod tween;

pub use background::Interactive3DHouse;
pub use mini_house::ThreeDHouse;

use constants::GLOBAL_MINI_HOUSE;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("house-web starting");

    let Some((window, document)) = dom::window_document() else {
        log::warn!("no window/document; widgets unavailable");
        return Ok(());
    };
    dom::install_shake_style(&document);

    if document.ready_state() == "loading" {
        let w = window.clone();
        let on_ready = Closure::once_into_js(move || register_mini_house(&w));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .ok();
    } else {
        register_mini_house(&window);
    }
    Ok(())
}

/// Expose one mini widget as `window.threeDHouse` when WebGPU is available.
fn register_mini_house(window: &web::Window) {
    if !dom::has_webgpu(window) {
        log::warn!("[mini-house] WebGPU not available; widget not created");
        return;
    }
    let widget = JsValue::from(ThreeDHouse::new(None));
    if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL_MINI_HOUSE), &widget) {
        log::error!("[mini-house] registering window.{}: {:?}", GLOBAL_MINI_HOUSE, e);
    }
}
