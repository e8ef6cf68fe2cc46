// Render loop orchestration: once per display frame, advance the control
// smoother from the latest gesture snapshot (or the active preset), sweep
// the kernel over the particle field and hand the buffers to the GPU.

use crate::core::constants::MAX_FRAME_DT;
use crate::core::controls::ControlState;
use crate::core::gesture::SharedGestures;
use crate::core::particles::ParticleField;
use crate::core::presets::PresetState;
use crate::render;
use glam::{Vec3, Vec4};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub field: ParticleField,
    pub controls: Rc<RefCell<ControlState>>,
    pub preset: Rc<RefCell<Option<PresetState>>>,
    pub gestures: SharedGestures,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    // Instance buffers reused across frames.
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    pub scales: Vec<f32>,
}

impl FrameContext<'_> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Latest-value read across the rate seam; the tracker may not have
        // published since the previous frame and that is fine.
        let snapshot = self.gestures.snapshot();

        let preset_targets = self
            .preset
            .borrow_mut()
            .as_mut()
            .map(|p| p.drive(dt.min(MAX_FRAME_DT)));

        let params =
            self.controls
                .borrow_mut()
                .advance(dt, &snapshot, preset_targets.as_ref());

        self.field.evaluate_into(
            &params,
            &mut self.positions,
            &mut self.colors,
            &mut self.scales,
        );

        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = gpu.render(&self.positions, &self.colors, &self.scales) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    instance_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, instance_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
