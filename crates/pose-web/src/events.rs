use crate::frame::App;
use crate::ui::Severity;
use crate::{api, dom, export, input};
use pose_core::PointerButton;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Wire every pointer, wheel and control listener to the shared app state.
pub fn wire_all(app: &App) {
    wire_pointer(app);
    wire_commands(app);
    wire_settings(app);
    wire_background(app);
    wire_export(app);
}

fn wire_pointer(app: &App) {
    let canvas = app.ui.canvas.clone();
    dom::suppress_context_menu(&canvas);

    {
        let app = app.clone();
        let canvas = canvas.clone();
        dom::add_pointer_listener(&app.ui.canvas.clone(), "pointerdown", move |ev| {
            let px = input::pointer_canvas_px(&ev, &canvas);
            let button = PointerButton::from_code(ev.button());
            let mut scene = app.scene.borrow_mut();
            let started = app
                .interaction
                .borrow_mut()
                .pointer_down(&mut scene, px.x, px.y, button);
            if !started {
                // empty space: the same buttons steer the camera instead
                match button {
                    PointerButton::Primary => scene.controls.begin_rotate(px.x, px.y),
                    PointerButton::Secondary => scene.controls.begin_pan(px.x, px.y),
                    PointerButton::Other => {}
                }
            } else {
                app.ui.place_notation(None);
            }
            ev.prevent_default();
        });
    }

    {
        let app = app.clone();
        let canvas = canvas.clone();
        dom::add_pointer_listener(&app.ui.canvas.clone(), "pointermove", move |ev| {
            let px = input::pointer_canvas_px(&ev, &canvas);
            let mut scene = app.scene.borrow_mut();
            let scene = &mut *scene;
            if app.interaction.borrow().is_dragging() {
                app.interaction
                    .borrow_mut()
                    .pointer_move(scene, px.x, px.y);
                return;
            }
            if scene.controls.is_gesturing() {
                scene.controls.pointer_move(&mut scene.camera, px.x, px.y);
                return;
            }
            let hover = app
                .interaction
                .borrow_mut()
                .pointer_move(&mut scene, px.x, px.y);
            match hover {
                // joint name floats 32px above the pointer
                Some(info) => app
                    .ui
                    .place_notation(Some((px.x, px.y - 32.0, info.joint_name))),
                None => app.ui.place_notation(None),
            }
        });
    }

    {
        let app = app.clone();
        dom::add_pointer_listener(&app.ui.canvas.clone(), "pointerup", move |ev| {
            let mut scene = app.scene.borrow_mut();
            app.interaction.borrow_mut().pointer_up(&mut scene);
            ev.prevent_default();
        });
    }

    {
        let app = app.clone();
        dom::add_pointer_listener(&app.ui.canvas.clone(), "pointerleave", move |_ev| {
            let mut scene = app.scene.borrow_mut();
            app.interaction.borrow_mut().pointer_up(&mut scene);
            scene.set_hovered(None);
            app.ui.place_notation(None);
        });
    }

    {
        let app = app.clone();
        dom::add_wheel_listener(&canvas, move |ev| {
            let mut scene = app.scene.borrow_mut();
            let scene = &mut *scene;
            scene.controls.wheel(&mut scene.camera, ev.delta_y() as f32);
            ev.prevent_default();
        });
    }
}

fn wire_commands(app: &App) {
    if let Some(el) = &app.ui.all_reset {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            app.scene.borrow_mut().all_reset();
        });
    }
    if let Some(el) = &app.ui.reset_camera {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            app.scene.borrow_mut().reset_camera();
        });
    }
    if let Some(el) = &app.ui.reset_pose {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            app.scene.borrow_mut().reset_pose();
        });
    }
    if let Some(el) = &app.ui.add_body {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            let name = app.scene.borrow_mut().spawn_body();
            app.ui.notify(Severity::Info, &format!("added {name}"));
        });
    }
    if let Some(el) = &app.ui.remove_body {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            let removed = app.scene.borrow_mut().remove_selected();
            match removed {
                Ok(()) => app.ui.notify(Severity::Info, "body removed"),
                Err(e) => app.ui.notify(Severity::Error, &e.to_string()),
            }
        });
    }
}

// sub-minimum sizes are silently ignored, matching Scene::resize
fn apply_canvas_size(app: &App, width: u32, height: u32) {
    if app.scene.borrow_mut().resize(width, height) {
        app.ui.canvas.set_width(width);
        app.ui.canvas.set_height(height);
    }
}

fn wire_settings(app: &App) {
    for input in [&app.ui.canvas_width, &app.ui.canvas_height] {
        if let Some(el) = input {
            let app = app.clone();
            dom::add_change_listener(el, move |_| {
                let width = crate::ui::input_number(&app.ui.canvas_width);
                let height = crate::ui::input_number(&app.ui.canvas_height);
                if let (Some(w), Some(h)) = (width, height) {
                    apply_canvas_size(&app, w as u32, h as u32);
                }
            });
        }
    }
    if let Some(el) = &app.ui.limb_width {
        let app = app.clone();
        // "input" so the width tracks the slider while it is being dragged
        dom::add_input_listener(el, move |el| {
            if let Ok(width) = el.value().parse::<f32>() {
                app.scene.borrow_mut().set_limb_width(width);
            }
        });
    }
    if let Some(el) = &app.ui.elliptic_limbs {
        let app = app.clone();
        dom::add_change_listener(el, move |el| {
            app.scene.borrow_mut().set_elliptic_limbs(el.checked());
        });
    }
    if let Some(el) = &app.ui.fixed_roll {
        let app = app.clone();
        dom::add_change_listener(el, move |el| {
            app.scene.borrow_mut().set_fixed_roll(el.checked());
        });
    }
    if let Some(el) = &app.ui.low_fps {
        let app = app.clone();
        dom::add_change_listener(el, move |el| {
            app.scene.borrow_mut().set_low_fps(el.checked());
        });
    }
}

fn wire_background(app: &App) {
    if let Some(el) = &app.ui.bg_file {
        let app = app.clone();
        dom::add_change_listener(el, move |el| {
            let Some(file) = el.files().and_then(|list| list.get(0)) else {
                return;
            };
            let Ok(reader) = web::FileReader::new() else {
                app.ui.notify(Severity::Error, "FileReader unavailable");
                return;
            };
            let app_load = app.clone();
            let reader_load = reader.clone();
            let onload = Closure::wrap(Box::new(move |_ev: web::Event| {
                let Ok(buffer) = reader_load.result() else {
                    app_load.ui.notify(Severity::Error, "background read failed");
                    return;
                };
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                if let Err(e) = app_load.gpu.borrow_mut().set_background(&bytes) {
                    app_load
                        .ui
                        .notify(Severity::Error, &format!("background decode failed: {e}"));
                }
            }) as Box<dyn FnMut(web::Event)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            if reader.read_as_array_buffer(&file).is_err() {
                app.ui.notify(Severity::Error, "background read failed");
            }
        });
    }
    if let Some(el) = &app.ui.reset_bg {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            app.gpu.borrow_mut().clear_background();
            if let Some(input) = &app.ui.bg_file {
                input.set_value("");
            }
        });
    }
}

fn wire_export(app: &App) {
    if let Some(el) = &app.ui.save_button {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            let ui = app.ui.clone();
            app.queue_snapshot(move |capture| match capture {
                Ok(data_url) => {
                    if let Err(e) = export::download_data_url(&data_url, "pose.png") {
                        ui.notify(Severity::Error, &format!("download failed: {e}"));
                    }
                }
                Err(e) => ui.notify(Severity::Error, &format!("snapshot failed: {e}")),
            });
        });
    }
    if let Some(el) = &app.ui.copy_button {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            let ui = app.ui.clone();
            app.queue_snapshot(move |capture| match capture {
                Ok(data_url) => spawn_local(async move {
                    match export::copy_data_url_to_clipboard(&data_url).await {
                        Ok(()) => ui.notify(Severity::Success, "copied to clipboard"),
                        Err(e) => ui.notify(Severity::Error, &format!("copy failed: {e}")),
                    }
                }),
                Err(e) => ui.notify(Severity::Error, &format!("snapshot failed: {e}")),
            });
        });
    }
    if let Some(el) = &app.ui.save_pose {
        let app = app.clone();
        dom::add_click_listener(el, move || {
            let Some(window) = web::window() else {
                return;
            };
            let name = window
                .prompt_with_message("Name of this pose:")
                .ok()
                .flatten()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            let Some(name) = name else {
                app.ui.notify(Severity::Info, "save cancelled");
                return;
            };
            let app_snap = app.clone();
            app.queue_snapshot(move |capture| {
                let image = match capture {
                    Ok(data_url) => Some(data_url),
                    Err(e) => {
                        log::warn!("[export] saving pose without image: {e}");
                        None
                    }
                };
                let record = app_snap.scene.borrow().to_record(name.clone(), image);
                let ui = app_snap.ui.clone();
                spawn_local(async move {
                    match api::save_pose(&record).await {
                        Ok(_) => ui.notify(Severity::Success, &format!("saved pose {name:?}")),
                        Err(e) => ui.notify(Severity::Error, &format!("save failed: {e}")),
                    }
                });
            });
        });
    }
}
