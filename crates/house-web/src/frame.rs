use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A requestAnimationFrame loop that can be paused and resumed.
///
/// The tick closure only holds weak references back to the loop, so dropping
/// the loop (after [`RenderLoop::stop`]) frees it.
pub struct RenderLoop {
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl RenderLoop {
    pub fn new(mut on_frame: impl FnMut() + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(false));

        let tick_weak: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&tick);
        let handle_tick = handle.clone();
        let running_tick = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_tick.set(None);
            if !running_tick.get() {
                return;
            }
            on_frame();
            // on_frame may have paused the loop
            if running_tick.get() {
                if let Some(tick) = tick_weak.upgrade() {
                    handle_tick.set(request_frame(&tick));
                }
            }
        }) as Box<dyn FnMut()>));

        Self {
            tick,
            handle,
            running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.handle.set(request_frame(&self.tick));
    }

    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let callback = tick.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}
