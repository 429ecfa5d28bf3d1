//! `Interactive3DHouse`: the fixed full-viewport background scene.

use crate::constants::*;
use crate::dom::{self, js_err};
use crate::events::ListenerSet;
use crate::frame::RenderLoop;
use crate::loader::FetchLoader;
use crate::render::GpuRenderer;
use crate::tween::GsapTweener;
use house_core::constants::BG_MAX_PIXEL_RATIO;
use house_core::layout::{loop_action, section_in_view, LoopAction};
use house_core::{BackgroundConfig, BackgroundScene, RenderError, Renderer};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type SharedScene = Rc<RefCell<BackgroundScene<GpuRenderer>>>;

#[derive(Default)]
struct Parts {
    container: Option<web::HtmlElement>,
    state: Option<SharedScene>,
    render_loop: Option<Rc<RenderLoop>>,
    listeners: ListenerSet,
    started: bool,
    destroyed: bool,
}

#[wasm_bindgen(js_name = Interactive3DHouse)]
pub struct Interactive3DHouse {
    parts: Rc<RefCell<Parts>>,
}

#[wasm_bindgen(js_class = Interactive3DHouse)]
impl Interactive3DHouse {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Interactive3DHouse {
        Self {
            parts: Rc::new(RefCell::new(Parts::default())),
        }
    }

    /// Build the scene and start rendering. Runs asynchronously; failures are
    /// logged and leave whatever was set up so far in place.
    pub fn init(&self) {
        {
            let mut parts = self.parts.borrow_mut();
            if parts.destroyed || parts.started {
                log::warn!("[background] init ignored (already started or destroyed)");
                return;
            }
            parts.started = true;
        }
        let parts = self.parts.clone();
        spawn_local(async move {
            if let Err(e) = init(parts).await {
                log::error!("[background] init error: {:?}", e);
            }
        });
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.parts
            .borrow()
            .render_loop
            .as_ref()
            .map(|l| l.is_running())
            .unwrap_or(false)
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
        if let Some(container) = parts.container.take() {
            container.remove();
        }
        if let Some(state) = parts.state.take() {
            state.borrow_mut().destroy();
        }
        log::info!("[background] destroyed");
    }
}

impl Default for Interactive3DHouse {
    fn default() -> Self {
        Self::new()
    }
}

async fn init(parts: Rc<RefCell<Parts>>) -> anyhow::Result<()> {
    if parts.borrow().destroyed {
        return Ok(());
    }
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    dom::install_shake_style(&document);

    let container = dom::create_background_container(&document)?;
    parts.borrow_mut().container = Some(container.clone());

    let viewport = dom::viewport_size(&window);
    let state: SharedScene = Rc::new(RefCell::new(BackgroundScene::new(
        BackgroundConfig::default(),
        viewport,
        &mut rand::thread_rng(),
    )));

    let canvas = dom::append_canvas(&document, &container)?;
    let mut renderer = GpuRenderer::new(canvas, BG_MAX_PIXEL_RATIO, "background").await?;
    if parts.borrow().destroyed {
        renderer.dispose();
        log::info!("[background] destroyed during init; renderer released");
        return Ok(());
    }
    state.borrow_mut().attach_renderer(renderer);
    state.borrow().begin_model_load(&FetchLoader);

    let listeners = wire_listeners(&window, &document, &container, &state, &parts)?;
    let render_loop = Rc::new(frame_loop(state.clone()));

    let mut p = parts.borrow_mut();
    p.listeners = listeners;
    p.state = Some(state);
    p.render_loop = Some(render_loop.clone());
    drop(p);

    render_loop.start();
    log::info!("[background] running at {}x{}", viewport.0, viewport.1);
    Ok(())
}

fn frame_loop(state: SharedScene) -> RenderLoop {
    let last = Cell::new(Instant::now());
    RenderLoop::new(move || {
        let now = Instant::now();
        let dt = now.duration_since(last.replace(now));
        match state.borrow_mut().frame(dt) {
            Ok(()) => {}
            Err(e @ (RenderError::SurfaceLost | RenderError::SurfaceOutdated)) => {
                log::debug!("[background] frame skipped: {}", e)
            }
            Err(e) => log::error!("[background] render error: {}", e),
        }
    })
}

fn wire_listeners(
    window: &web::Window,
    document: &web::Document,
    container: &web::HtmlElement,
    state: &SharedScene,
    parts: &Rc<RefCell<Parts>>,
) -> anyhow::Result<ListenerSet> {
    let mut listeners = ListenerSet::default();

    let s = state.clone();
    listeners.add(window, "mousemove", move |e: web::MouseEvent| {
        s.borrow_mut()
            .on_pointer_move(e.client_x() as f32, e.client_y() as f32);
    })?;

    let root = document
        .document_element()
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    let s = state.clone();
    listeners.add(&root, "mouseenter", move |_: web::Event| {
        s.borrow_mut().on_pointer_enter();
    })?;
    let s = state.clone();
    listeners.add(&root, "mouseleave", move |_: web::Event| {
        s.borrow_mut().on_pointer_leave();
    })?;

    let s = state.clone();
    let shake_target = container.clone();
    listeners.add(window, "click", move |_: web::MouseEvent| {
        s.borrow_mut().on_click(&GsapTweener);
        shake(&shake_target);
    })?;

    let s = state.clone();
    let w = window.clone();
    listeners.add(window, "resize", move |_: web::Event| {
        let (width, height) = dom::viewport_size(&w);
        s.borrow_mut().on_resize(width, height);
    })?;

    let section_id = state.borrow().config().visibility_section_id.clone();
    let weak_parts = Rc::downgrade(parts);
    let w = window.clone();
    let doc = document.clone();
    listeners.add(window, "scroll", move |_: web::Event| {
        let Some(parts) = weak_parts.upgrade() else {
            return;
        };
        let Some(render_loop) = parts.borrow().render_loop.clone() else {
            return;
        };
        let Some(section) = doc.get_element_by_id(&section_id) else {
            return;
        };
        let rect = section.get_bounding_client_rect();
        let viewport_height = dom::viewport_size(&w).1 as f64;
        let visible = section_in_view(rect.top(), rect.bottom(), viewport_height);
        match loop_action(visible, render_loop.is_running()) {
            LoopAction::Pause => {
                render_loop.stop();
                log::debug!("[background] #{} out of view; paused", section_id);
            }
            LoopAction::Resume => {
                render_loop.start();
                log::debug!("[background] #{} in view; resumed", section_id);
            }
            LoopAction::Keep => {}
        }
    })?;

    log::info!("[background] {} listeners attached", listeners.len());
    Ok(listeners)
}

fn shake(container: &web::HtmlElement) {
    dom::set_style(container, "animation", SHAKE_ANIMATION);
    let Some(window) = web::window() else {
        return;
    };
    let target = container.clone();
    let clear = Closure::once_into_js(move || {
        dom::set_style(&target, "animation", "");
    });
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(clear.unchecked_ref(), SHAKE_CLEAR_MS)
        .map_err(js_err)
    {
        log::warn!("[background] shake timer: {:?}", e);
    }
}
