use crate::export;
use crate::render::GpuState;
use crate::ui::UiHandles;
use instant::Instant;
use pose_core::{Interaction, Scene, LOW_FPS_MIN_INTERVAL_MS};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type Oneshot = Box<dyn FnOnce(anyhow::Result<String>)>;

/// Shared widget state threaded through event closures and the frame loop.
#[derive(Clone)]
pub struct App {
    pub scene: Rc<RefCell<Scene>>,
    pub interaction: Rc<RefCell<Interaction>>,
    pub gpu: Rc<RefCell<GpuState>>,
    pub ui: Rc<UiHandles>,
    running: Rc<Cell<bool>>,
    suppress_background: Rc<Cell<bool>>,
    oneshots: Rc<RefCell<Vec<Oneshot>>>,
    last_heavy: Rc<Cell<Option<Instant>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl App {
    pub fn new(scene: Scene, gpu: GpuState, ui: UiHandles) -> Self {
        Self {
            scene: Rc::new(RefCell::new(scene)),
            interaction: Rc::new(RefCell::new(Interaction::new())),
            gpu: Rc::new(RefCell::new(gpu)),
            ui: Rc::new(ui),
            running: Rc::new(Cell::new(false)),
            suppress_background: Rc::new(Cell::new(false)),
            oneshots: Rc::new(RefCell::new(Vec::new())),
            last_heavy: Rc::new(Cell::new(None)),
            tick: Rc::new(RefCell::new(None)),
        }
    }

    /// Queue a snapshot callback. The next frame renders without the
    /// background, the canvas is captured, and the callback runs with the
    /// resulting data URL.
    pub fn queue_snapshot(&self, callback: impl FnOnce(anyhow::Result<String>) + 'static) {
        self.suppress_background.set(true);
        self.oneshots.borrow_mut().push(Box::new(callback));
    }

    pub fn play(&self) {
        if self.running.replace(true) {
            return;
        }
        log::info!("[frame] play");
        self.interaction
            .borrow_mut()
            .set_enabled(&mut self.scene.borrow_mut(), true);
        self.request_frame();
    }

    /// Halt the loop. Pointer and wheel handling is disarmed (cancelling any
    /// in-flight drag) and pending snapshot callbacks are resolved against
    /// the current canvas contents so callers never wait on a frame that
    /// will not come.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        log::info!("[frame] stop");
        self.interaction
            .borrow_mut()
            .set_enabled(&mut self.scene.borrow_mut(), false);
        self.drain_oneshots();
        self.suppress_background.set(false);
    }

    fn drain_oneshots(&self) {
        let pending: Vec<Oneshot> = self.oneshots.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            return;
        }
        let capture = export::canvas_data_url(&self.ui.canvas);
        for callback in pending {
            let result = match &capture {
                Ok(url) => Ok(url.clone()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            };
            callback(result);
        }
    }

    fn request_frame(&self) {
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                self.tick.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            );
        }
    }

    fn heavy_work_due(&self, now: Instant) -> bool {
        if !self.scene.borrow().low_fps {
            return true;
        }
        // snapshots bypass the throttle so they never capture a stale frame
        if !self.oneshots.borrow().is_empty() {
            return true;
        }
        match self.last_heavy.get() {
            Some(last) => (now - last).as_secs_f64() * 1000.0 >= LOW_FPS_MIN_INTERVAL_MS,
            None => true,
        }
    }

    fn frame(&self) {
        let now = Instant::now();
        if !self.heavy_work_due(now) {
            return;
        }
        let suppress = self.suppress_background.get();
        {
            let mut scene = self.scene.borrow_mut();
            scene.update();
            let mut gpu = self.gpu.borrow_mut();
            gpu.resize_if_needed(self.ui.canvas.width(), self.ui.canvas.height());
            if let Err(e) = gpu.render(&scene, suppress) {
                log::error!("[frame] render error: {:?}", e);
            }
        }
        if suppress {
            self.drain_oneshots();
            self.suppress_background.set(false);
        }
        self.last_heavy.set(Some(now));
        let scene = self.scene.borrow();
        self.ui
            .place_indicator(&self.ui.indicator_selection, scene.selection_rect());
        self.ui
            .place_indicator(&self.ui.indicator_hover, scene.hover_rect());
    }
}

/// Install the self-scheduling requestAnimationFrame loop and start it.
pub fn start_loop(app: &App) {
    let app_tick = app.clone();
    *app.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !app_tick.running.get() {
            return;
        }
        app_tick.frame();
        app_tick.request_frame();
    }) as Box<dyn FnMut()>));
    app.play();
}
