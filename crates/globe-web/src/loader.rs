use globe_core::{AssetLoader, LoadError, LoadRequest, LoadSender};
use globe_render::{decode_marker_image, MarkerImage};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetches marker images over HTTP and decodes them on the UI thread.
pub struct FetchLoader;

impl AssetLoader<MarkerImage> for FetchLoader {
    fn load(&self, request: LoadRequest, done: LoadSender<MarkerImage>) {
        spawn_local(async move {
            let result = fetch_bytes(&request.uri)
                .await
                .and_then(|bytes| decode_marker_image(&bytes));
            match result {
                Ok(image) => done.loaded(request.id, image),
                Err(e) => done.failed(request.id, e),
            }
        });
    }
}

fn fetch_error(e: JsValue) -> LoadError {
    LoadError::Fetch(format!("{:?}", e))
}

async fn fetch_bytes(uri: &str) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(uri))
        .await
        .map_err(fetch_error)?
        .dyn_into::<web::Response>()
        .map_err(fetch_error)?;
    if !resp.ok() {
        return Err(LoadError::Fetch(format!("HTTP {} for {uri}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
