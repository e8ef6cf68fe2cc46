#![cfg(target_arch = "wasm32")]
// Bootstrap and the configuration surface exposed to the page. The pure
// simulation lives under `core`; everything here is wiring.

use crate::core::controls::ControlState;
use crate::core::gesture::{GestureState, SharedGestures};
use crate::core::particles::ParticleField;
use crate::core::presets::{PresetKind, PresetState};
use crate::core::PARTICLE_COUNT;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;
mod tracker;

struct App {
    controls: Rc<RefCell<ControlState>>,
    preset: Rc<RefCell<Option<PresetState>>>,
    gestures: SharedGestures,
    tracker: Rc<RefCell<Option<tracker::TrackerHandle>>>,
    detector: Rc<RefCell<Option<js_sys::Function>>>,
    canvas: web::HtmlCanvasElement,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

fn with_app(f: impl FnOnce(&App)) {
    APP.with(|slot| {
        if let Some(app) = slot.borrow().as_ref() {
            f(app);
        } else {
            log::warn!("app not initialized yet");
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fractal-field starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::wire_canvas_resize(&canvas);

    let controls = Rc::new(RefCell::new(ControlState::new()));
    let preset: Rc<RefCell<Option<PresetState>>> = Rc::new(RefCell::new(None));
    let gestures = SharedGestures::new();
    let tracker_slot: Rc<RefCell<Option<tracker::TrackerHandle>>> = Rc::new(RefCell::new(None));
    let detector: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));

    let toggle_interactive: Rc<dyn Fn()> = {
        let controls = controls.clone();
        let gestures = gestures.clone();
        let tracker_slot = tracker_slot.clone();
        let detector = detector.clone();
        Rc::new(move || {
            let on = !controls.borrow().interactive();
            set_tracking(&controls, &gestures, &tracker_slot, &detector, on);
        })
    };

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        preset: preset.clone(),
        toggle_interactive,
    });

    let field = ParticleField::new(PARTICLE_COUNT, constants::FIELD_SEED);
    log::info!("[field] {} particles seeded", field.len());
    let gpu = frame::init_gpu(&canvas, field.len()).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        field,
        controls: controls.clone(),
        preset: preset.clone(),
        gestures: gestures.clone(),
        canvas: canvas.clone(),
        gpu,
        last_instant: Instant::now(),
        positions: Vec::new(),
        colors: Vec::new(),
        scales: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            controls,
            preset,
            gestures,
            tracker: tracker_slot,
            detector,
            canvas,
        });
    });
    Ok(())
}

/// Enter or leave interactive (gesture-driven) mode. Leaving releases the
/// camera deterministically; entering without a registered detector keeps
/// gesture controls idle while pointer navigation continues to work.
fn set_tracking(
    controls: &Rc<RefCell<ControlState>>,
    gestures: &SharedGestures,
    tracker_slot: &Rc<RefCell<Option<tracker::TrackerHandle>>>,
    detector: &Rc<RefCell<Option<js_sys::Function>>>,
    on: bool,
) {
    if !on {
        controls.borrow_mut().set_interactive(false);
        if let Some(handle) = tracker_slot.borrow_mut().take() {
            handle.stop();
        }
        gestures.publish(GestureState::default());
        return;
    }

    controls.borrow_mut().set_interactive(true);
    if tracker_slot.borrow().is_some() {
        return;
    }
    let Some(detector_fn) = detector.borrow().clone() else {
        log::warn!("[tracker] no hand detector registered; gesture controls idle");
        return;
    };
    let gestures = gestures.clone();
    let tracker_slot = tracker_slot.clone();
    spawn_local(async move {
        match tracker::start(detector_fn, gestures.clone()).await {
            Ok(handle) => {
                *tracker_slot.borrow_mut() = Some(handle);
            }
            Err(e) => {
                // Degrade to a zero-hands state; nothing here is fatal.
                log::warn!("[tracker] {e}; gesture controls idle");
                gestures.publish(GestureState::default());
            }
        }
    });
}

// ---------------- configuration surface ----------------

/// Register the hand-tracking collaborator: a function taking the video
/// element and returning up to 2 hands x 21 [x, y, z] landmarks.
#[wasm_bindgen]
pub fn set_hand_detector(f: js_sys::Function) {
    with_app(move |app| {
        *app.detector.borrow_mut() = Some(f);
    });
}

#[wasm_bindgen]
pub fn set_fractal_mode(index: u32) {
    with_app(|app| app.controls.borrow_mut().select_mode(index as usize));
}

#[wasm_bindgen]
pub fn set_palette(id: u32) {
    with_app(|app| app.controls.borrow_mut().set_palette(id as u8));
}

#[wasm_bindgen]
pub fn set_iteration_cap(cap: u32) {
    with_app(|app| app.controls.borrow_mut().set_iteration_cap(cap));
}

#[wasm_bindgen]
pub fn set_power(power: f32) {
    with_app(|app| app.controls.borrow_mut().set_power(power));
}

#[wasm_bindgen]
pub fn set_attraction_gain(gain: f32) {
    with_app(|app| app.controls.borrow_mut().set_attraction_gain(gain));
}

#[wasm_bindgen]
pub fn set_pinch_gain(gain: f32) {
    with_app(|app| app.controls.borrow_mut().set_pinch_gain(gain));
}

#[wasm_bindgen]
pub fn set_morph_speed(rate: f32) {
    with_app(|app| app.controls.borrow_mut().set_morph_rate(rate));
}

#[wasm_bindgen]
pub fn set_interactive(on: bool) {
    with_app(|app| {
        set_tracking(&app.controls, &app.gestures, &app.tracker, &app.detector, on);
    });
}

/// Select an animation preset by name ("dive", "morph", "sponge"). Returns
/// false for an unknown name.
#[wasm_bindgen]
pub fn set_preset(name: &str) -> bool {
    let kind = PresetKind::by_name(name);
    with_app(|app| {
        if let Some(kind) = kind {
            log::info!("[preset] {}", kind.name());
            *app.preset.borrow_mut() = Some(PresetState::new(kind));
        }
    });
    kind.is_some()
}

#[wasm_bindgen]
pub fn clear_preset() {
    with_app(|app| {
        app.preset.borrow_mut().take();
    });
}

/// Current display label for the recognized gesture.
#[wasm_bindgen]
pub fn gesture_label() -> String {
    let mut label = "idle";
    with_app(|app| {
        label = app.gestures.snapshot().label();
    });
    label.to_string()
}

/// Synchronously capture the current frame as a data-URL raster image.
#[wasm_bindgen]
pub fn capture_frame() -> Result<String, JsValue> {
    APP.with(|slot| {
        let borrowed = slot.borrow();
        let app = borrowed
            .as_ref()
            .ok_or_else(|| JsValue::from_str("app not initialized"))?;
        app.canvas.to_data_url()
    })
}
