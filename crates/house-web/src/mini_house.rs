//! `ThreeDHouse`: the small floating house in the page corner.

use crate::constants::*;
use crate::dom;
use crate::events::ListenerSet;
use crate::frame::RenderLoop;
use crate::render::GpuRenderer;
use house_core::constants::MINI_CONTAINER_ID;
use house_core::layout::mini_widget_display;
use house_core::{MiniHouse, MiniHouseConfig, RenderError, Renderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type SharedHouse = Rc<RefCell<MiniHouse<GpuRenderer>>>;

#[derive(Default)]
struct Parts {
    container: Option<web::HtmlElement>,
    state: Option<SharedHouse>,
    render_loop: Option<RenderLoop>,
    listeners: ListenerSet,
    destroyed: bool,
}

#[wasm_bindgen(js_name = ThreeDHouse)]
pub struct ThreeDHouse {
    parts: Rc<RefCell<Parts>>,
}

#[wasm_bindgen(js_class = ThreeDHouse)]
impl ThreeDHouse {
    /// Attach to the element with `container_id` (default `threejs-container`),
    /// creating a floating container when it does not exist, and start
    /// initializing in the background.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: Option<String>) -> ThreeDHouse {
        let parts = Rc::new(RefCell::new(Parts::default()));
        let id = container_id.unwrap_or_else(|| MINI_CONTAINER_ID.to_string());
        match container(&id) {
            Ok(el) => {
                parts.borrow_mut().container = Some(el);
                let p = parts.clone();
                spawn_local(async move {
                    if let Err(e) = init(p).await {
                        log::error!("[mini-house] init error: {:?}", e);
                    }
                });
            }
            Err(e) => log::error!("[mini-house] container #{}: {:?}", id, e),
        }
        Self { parts }
    }

    pub fn show(&self) {
        if let Some(c) = self.parts.borrow().container.as_ref() {
            dom::set_style(c, "opacity", "1");
        }
    }

    pub fn hide(&self) {
        if let Some(c) = self.parts.borrow().container.as_ref() {
            dom::set_style(c, "opacity", "0");
        }
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, top: f64, right: f64) {
        if let Some(c) = self.parts.borrow().container.as_ref() {
            dom::set_style(c, "top", &format!("{}px", top));
            dom::set_style(c, "right", &format!("{}px", right));
        }
    }

    pub fn destroy(&self) {
        let mut parts = self.parts.borrow_mut();
        if parts.destroyed {
            return;
        }
        parts.destroyed = true;
        if let Some(render_loop) = parts.render_loop.take() {
            render_loop.stop();
        }
        parts.listeners.clear();
        if let Some(state) = parts.state.take() {
            state.borrow_mut().destroy();
        }
        if let Some(c) = parts.container.take() {
            c.remove();
        }
        log::info!("[mini-house] destroyed");
    }
}

fn container(id: &str) -> anyhow::Result<web::HtmlElement> {
    let (_, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let (el, created) = dom::ensure_mini_container(&document, id)?;
    if created {
        log::info!("[mini-house] created container #{}", id);
    }
    Ok(el)
}

async fn init(parts: Rc<RefCell<Parts>>) -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let Some(container) = parts.borrow().container.clone() else {
        return Ok(());
    };

    let size = dom::client_size(&container);
    let state: SharedHouse = Rc::new(RefCell::new(MiniHouse::new(
        MiniHouseConfig::default(),
        size,
    )));

    let canvas = dom::append_canvas(&document, &container)?;
    let mut renderer = GpuRenderer::new(canvas, MINI_MAX_PIXEL_RATIO, "mini-house").await?;
    if parts.borrow().destroyed {
        renderer.dispose();
        return Ok(());
    }
    state
        .borrow_mut()
        .attach_renderer(renderer, dom::client_size(&container));

    let listeners = wire_listeners(&window, &container, &state)?;
    apply_display(&window, &container);
    state.borrow_mut().on_scroll(window.scroll_y().unwrap_or(0.0) as f32);

    let s = state.clone();
    let render_loop = RenderLoop::new(move || {
        let time_sec = js_sys::Date::now() * 0.001;
        match s.borrow_mut().frame(time_sec) {
            Ok(()) => {}
            Err(e @ (RenderError::SurfaceLost | RenderError::SurfaceOutdated)) => {
                log::debug!("[mini-house] frame skipped: {}", e)
            }
            Err(e) => log::error!("[mini-house] render error: {}", e),
        }
    });
    render_loop.start();

    let mut p = parts.borrow_mut();
    p.listeners = listeners;
    p.state = Some(state);
    p.render_loop = Some(render_loop);
    log::info!("[mini-house] running at {}x{}", size.0, size.1);
    Ok(())
}

fn wire_listeners(
    window: &web::Window,
    container: &web::HtmlElement,
    state: &SharedHouse,
) -> anyhow::Result<ListenerSet> {
    let mut listeners = ListenerSet::default();

    let s = state.clone();
    let w = window.clone();
    listeners.add(window, "scroll", move |_: web::Event| {
        s.borrow_mut()
            .on_scroll(w.scroll_y().unwrap_or(0.0) as f32);
    })?;

    let s = state.clone();
    let w = window.clone();
    let c = container.clone();
    listeners.add(window, "resize", move |_: web::Event| {
        apply_display(&w, &c);
        let (width, height) = dom::client_size(&c);
        s.borrow_mut().on_resize(width, height);
    })?;

    let c = container.clone();
    listeners.add(container, "mouseenter", move |_: web::Event| {
        dom::set_style(&c, "transform", MINI_HOVER_TRANSFORM);
    })?;
    let c = container.clone();
    listeners.add(container, "mouseleave", move |_: web::Event| {
        dom::set_style(&c, "transform", MINI_REST_TRANSFORM);
    })?;

    Ok(listeners)
}

fn apply_display(window: &web::Window, container: &web::HtmlElement) {
    let display = mini_widget_display(dom::viewport_width(window));
    dom::set_style(container, "display", display.as_css());
}
