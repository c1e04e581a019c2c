use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element that the widget cannot run without.
pub fn required<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("#{id} has an unexpected element type"))
}

/// Look up an optional control; hosts may omit any of them.
pub fn optional<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn add_click_listener(el: &web::HtmlElement, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn add_change_listener(
    el: &web::HtmlInputElement,
    mut handler: impl FnMut(web::HtmlInputElement) + 'static,
) {
    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || handler(target.clone())) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Like `add_change_listener` but fires continuously, for range sliders.
pub fn add_input_listener(
    el: &web::HtmlInputElement,
    mut handler: impl FnMut(web::HtmlInputElement) + 'static,
) {
    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || handler(target.clone())) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn add_pointer_listener(
    el: &web::HtmlCanvasElement,
    kind: &str,
    mut handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| handler(ev))
        as Box<dyn FnMut(web::PointerEvent)>);
    let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn add_wheel_listener(
    el: &web::HtmlCanvasElement,
    mut handler: impl FnMut(web::WheelEvent) + 'static,
) {
    let closure = Closure::wrap(
        Box::new(move |ev: web::WheelEvent| handler(ev)) as Box<dyn FnMut(web::WheelEvent)>
    );
    let _ = el.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Right-button drags move whole bodies; keep the browser menu out of the way.
pub fn suppress_context_menu(el: &web::HtmlCanvasElement) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        ev.prevent_default();
    }) as Box<dyn FnMut(web::MouseEvent)>);
    let _ = el.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
