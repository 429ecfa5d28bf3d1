use crate::constants::*;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::JsCast;
use web_sys as web;

static SHAKE_STYLE_INSTALLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Add the global `shake` keyframes to `<head>`. Later calls are no-ops.
pub fn install_shake_style(document: &web::Document) {
    if SHAKE_STYLE_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let Some(head) = document.head() else {
        log::warn!("[dom] no <head>; shake animation unavailable");
        SHAKE_STYLE_INSTALLED.store(false, Ordering::SeqCst);
        return;
    };
    if document.get_element_by_id(SHAKE_STYLE_ID).is_some() {
        return;
    }
    match document.create_element("style") {
        Ok(style) => {
            style.set_id(SHAKE_STYLE_ID);
            style.set_text_content(Some(SHAKE_KEYFRAMES));
            let _ = head.append_child(&style);
        }
        Err(e) => log::error!("[dom] style element: {:?}", e),
    }
}

fn create_div(document: &web::Document, id: &str, css: &str) -> anyhow::Result<web::HtmlElement> {
    let div: web::HtmlElement = document
        .create_element("div")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    div.set_id(id);
    div.style().set_css_text(css);
    Ok(div)
}

/// Full-viewport background container, inserted as the first child of `<body>`.
pub fn create_background_container(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let div = create_div(document, BG_CONTAINER_ID, BG_CONTAINER_CSS)?;
    body.insert_before(&div, body.first_child().as_ref())
        .map_err(js_err)?;
    Ok(div)
}

/// Existing element with `id`, or a new floating container appended to `<body>`.
/// The flag is true when the container was created here.
pub fn ensure_mini_container(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<(web::HtmlElement, bool)> {
    if let Some(el) = document.get_element_by_id(id) {
        let el = el
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not an HTML element: {:?}", id, e))?;
        return Ok((el, false));
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let div = create_div(document, id, MINI_CONTAINER_CSS)?;
    body.append_child(&div).map_err(js_err)?;
    Ok((div, true))
}

pub fn append_canvas(
    document: &web::Document,
    parent: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.style().set_css_text(CANVAS_CSS);
    parent.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn viewport_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

pub fn viewport_width(window: &web::Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[inline]
pub fn client_size(el: &web::Element) -> (u32, u32) {
    (el.client_width().max(0) as u32, el.client_height().max(0) as u32)
}

/// Match the canvas CSS box to `width`×`height` and its backing store to the
/// same size times the clamped device pixel ratio. Returns the backing size.
pub fn sync_canvas_size(
    canvas: &web::HtmlCanvasElement,
    width: u32,
    height: u32,
    max_pixel_ratio: f64,
) -> (u32, u32) {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(max_pixel_ratio)
        .max(1.0);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", width));
    let _ = style.set_property("height", &format!("{}px", height));
    let w_px = ((width as f64) * dpr).round() as u32;
    let h_px = ((height as f64) * dpr).round() as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    (w_px, h_px)
}

/// Whether the page exposes WebGPU.
pub fn has_webgpu(window: &web::Window) -> bool {
    js_sys::Reflect::has(&window.navigator(), &wasm_bindgen::JsValue::from_str("gpu"))
        .unwrap_or(false)
}
