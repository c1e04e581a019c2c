#![cfg(target_arch = "wasm32")]

pub mod api;
pub mod dom;
pub mod events;
pub mod export;
pub mod frame;
pub mod input;
pub mod render;
pub mod ui;

use frame::App;
use pose_core::{Scene, MIN_CANVAS_SIZE};
use render::GpuState;
use std::cell::RefCell;
use ui::UiHandles;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pose-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let ui = UiHandles::from_document(&document)?;

    let width = ui::input_number(&ui.canvas_width)
        .map(|v| v as u32)
        .unwrap_or_else(|| ui.canvas.width())
        .max(MIN_CANVAS_SIZE);
    let height = ui::input_number(&ui.canvas_height)
        .map(|v| v as u32)
        .unwrap_or_else(|| ui.canvas.height())
        .max(MIN_CANVAS_SIZE);
    ui.canvas.set_width(width);
    ui.canvas.set_height(height);

    let mut scene = Scene::new(width, height);
    if let Some(el) = &ui.limb_width {
        if let Ok(v) = el.value().parse::<f32>() {
            scene.set_limb_width(v);
        }
    }
    if let Some(el) = &ui.elliptic_limbs {
        scene.set_elliptic_limbs(el.checked());
    }
    if let Some(el) = &ui.fixed_roll {
        scene.set_fixed_roll(el.checked());
    }
    if let Some(el) = &ui.low_fps {
        scene.set_low_fps(el.checked());
    }

    // leak a canvas clone to satisfy the 'static lifetime of the surface
    let leaked_canvas = Box::leak(Box::new(ui.canvas.clone()));
    let gpu = GpuState::new(leaked_canvas).await?;

    let app = App::new(scene, gpu, ui);
    events::wire_all(&app);
    frame::start_loop(&app);
    log::info!("[init] widget running at {width}x{height}");

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Resume the frame loop after `stop`.
#[wasm_bindgen]
pub fn play() {
    APP.with(|slot| {
        if let Some(app) = &*slot.borrow() {
            app.play();
        }
    });
}

/// Halt the frame loop; pending snapshot callbacks resolve immediately.
#[wasm_bindgen]
pub fn stop() {
    APP.with(|slot| {
        if let Some(app) = &*slot.borrow() {
            app.stop();
        }
    });
}

/// Fetch a stored pose from the backend and replace the scene with it.
#[wasm_bindgen]
pub fn load_pose(name: String) {
    let Some(app) = APP.with(|slot| slot.borrow().clone()) else {
        return;
    };
    spawn_local(async move {
        match api::load_pose(&name).await {
            Ok(record) => {
                let mut scene = app.scene.borrow_mut();
                scene.load_record(&record);
                app.ui.canvas.set_width(scene.width());
                app.ui.canvas.set_height(scene.height());
                // keep the size inputs in step so their next change event
                // starts from the restored dimensions
                if let Some(el) = &app.ui.canvas_width {
                    el.set_value(&scene.width().to_string());
                }
                if let Some(el) = &app.ui.canvas_height {
                    el.set_value(&scene.height().to_string());
                }
                drop(scene);
                app.ui
                    .notify(ui::Severity::Success, &format!("loaded pose {name:?}"));
            }
            Err(e) => app
                .ui
                .notify(ui::Severity::Error, &format!("load failed: {e}")),
        }
    });
}
