use crate::dom::js_err;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: js_sys::Function,
}

/// Event listeners owned by one widget. Everything registered here is
/// detached again by [`ListenerSet::clear`] or on drop.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn add<E, F>(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: F,
    ) -> anyhow::Result<()>
    where
        E: FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
        // The JS function owns the closure from here on
        let callback: js_sys::Function = closure.into_js_value().unchecked_into();
        target
            .add_event_listener_with_callback(kind, &callback)
            .map_err(js_err)?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, &l.callback);
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
