use base64::Engine;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

/// Capture the canvas as a PNG data URL.
pub fn canvas_data_url(canvas: &web::HtmlCanvasElement) -> anyhow::Result<String> {
    canvas.to_data_url().map_err(js_err)
}

/// Trigger a browser download of a data URL via a transient anchor element.
pub fn download_data_url(data_url: &str, filename: &str) -> anyhow::Result<()> {
    let document = crate::dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let anchor: web::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("anchor creation failed"))?;
    anchor.set_href(data_url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

fn data_url_png_bytes(data_url: &str) -> anyhow::Result<Vec<u8>> {
    let encoded = data_url
        .strip_prefix("data:image/png;base64,")
        .ok_or_else(|| anyhow::anyhow!("snapshot is not a base64 PNG data URL"))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
}

/// Put the snapshot on the system clipboard as an image. The async clipboard
/// objects are reached through js-sys reflection; the typed bindings for
/// ClipboardItem differ between web-sys releases.
pub async fn copy_data_url_to_clipboard(data_url: &str) -> anyhow::Result<()> {
    let bytes = data_url_png_bytes(data_url)?;
    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let options = web::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob =
        web::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;

    let items = js_sys::Object::new();
    js_sys::Reflect::set(&items, &JsValue::from_str("image/png"), &blob).map_err(js_err)?;
    let ctor = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("ClipboardItem"))
        .map_err(js_err)?;
    let ctor: js_sys::Function = ctor
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("ClipboardItem is not available"))?;
    let item = js_sys::Reflect::construct(&ctor, &js_sys::Array::of1(&items)).map_err(js_err)?;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let clipboard = js_sys::Reflect::get(window.navigator().as_ref(), &JsValue::from_str("clipboard"))
        .map_err(js_err)?;
    if clipboard.is_undefined() {
        return Err(anyhow::anyhow!("clipboard API is not available"));
    }
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("write")).map_err(js_err)?;
    let write: js_sys::Function = write
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("clipboard.write is not available"))?;
    let promise = write
        .call1(&clipboard, &js_sys::Array::of1(&item))
        .map_err(js_err)?;
    JsFuture::from(js_sys::Promise::from(promise))
        .await
        .map_err(js_err)?;
    log::info!("[export] snapshot copied to clipboard");
    Ok(())
}
