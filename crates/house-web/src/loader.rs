use crate::dom::js_err;
use house_core::{content_length, parse_glb, ModelLoader, PendingModel};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetches a GLB over HTTP and hands the parsed group to the widget.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchLoader;

impl ModelLoader for FetchLoader {
    fn load(&self, path: &str, slot: PendingModel) {
        let path = path.to_string();
        spawn_local(async move {
            match fetch_model(&path).await {
                Ok(group) => {
                    let meshes = group.meshes.len();
                    if slot.deliver(group) {
                        log::info!("[model] {} loaded ({} meshes)", path, meshes);
                    } else {
                        log::info!("[model] {} arrived after teardown; dropped", path);
                    }
                }
                Err(e) => log::error!("[model] failed to load {}: {:?}", path, e),
            }
        });
    }
}

async fn fetch_model(path: &str) -> anyhow::Result<house_core::Group> {
    let bytes = fetch_bytes(path).await?;
    Ok(parse_glb(&bytes)?)
}

async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        return Err(anyhow::anyhow!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        ));
    }
    let header = response.headers().get("content-length").ok().flatten();
    match content_length(header.as_deref()) {
        Some(bytes) => log::debug!("[model] {}: receiving {} bytes", path, bytes),
        None => log::debug!("[model] {}: receiving (size unknown)", path),
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
