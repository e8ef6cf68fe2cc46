// Pointer, wheel and keyboard wiring: the non-gesture navigation source and
// the keyboard half of the configuration surface.

use crate::constants::{DRAG_PAN_GAIN, WHEEL_ZOOM_STEP};
use crate::core::controls::ControlState;
use crate::core::presets::{PresetKind, PresetState};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    last_x: f32,
    last_y: f32,
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<ControlState>>,
    pub preset: Rc<RefCell<Option<PresetState>>>,
    pub toggle_interactive: Rc<dyn Fn()>,
}

pub fn wire_input_handlers(w: InputWiring) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(&w, &drag);
    wire_pointermove(&w, &drag);
    wire_pointerup(&drag);
    wire_wheel(&w);
    wire_keyboard(&w);
}

fn wire_pointerdown(w: &InputWiring, drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let canvas = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut d = drag.borrow_mut();
        d.active = true;
        d.last_x = ev.client_x() as f32;
        d.last_y = ev.client_y() as f32;
        _ = canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring, drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let controls = w.controls.clone();
    let canvas = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut d = drag.borrow_mut();
        if !d.active {
            return;
        }
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        let height = canvas.get_bounding_client_rect().height().max(1.0) as f32;
        let du = (x - d.last_x) / height;
        let dv = (y - d.last_y) / height;
        d.last_x = x;
        d.last_y = y;
        let mut c = controls.borrow_mut();
        // Drag moves the viewed window against the pointer; scale with zoom
        // so a screen-width drag covers the visible span at any depth.
        let zoom = c.nav().zoom_target();
        c.nav_mut()
            .pan_by(Vec2::new(-du, dv) * (DRAG_PAN_GAIN / zoom));
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        drag.borrow_mut().active = false;
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let controls = w.controls.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let factor = (-(ev.delta_y() as f32) * WHEEL_ZOOM_STEP).exp();
        controls.borrow_mut().nav_mut().zoom_by_factor(factor);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    controls: &Rc<RefCell<ControlState>>,
    preset: &Rc<RefCell<Option<PresetState>>>,
    toggle_interactive: &dyn Fn(),
) {
    let key = ev.key();
    if let Ok(digit) = key.parse::<usize>() {
        if (1..=7).contains(&digit) {
            controls.borrow_mut().select_mode(digit - 1);
            return;
        }
    }
    match key.as_str() {
        "p" | "P" => controls.borrow_mut().advance_palette(),
        "i" | "I" => toggle_interactive(),
        "[" => {
            let mut c = controls.borrow_mut();
            let cap = c.iteration_cap().saturating_sub(16);
            c.set_iteration_cap(cap);
        }
        "]" => {
            let mut c = controls.borrow_mut();
            let cap = c.iteration_cap() + 16;
            c.set_iteration_cap(cap);
        }
        "-" | "_" => {
            let mut c = controls.borrow_mut();
            let p = c.power() - 0.5;
            c.set_power(p);
        }
        "=" | "+" => {
            let mut c = controls.borrow_mut();
            let p = c.power() + 0.5;
            c.set_power(p);
        }
        "z" | "Z" => start_preset(preset, PresetKind::Dive),
        "x" | "X" => start_preset(preset, PresetKind::JuliaMorph),
        "c" | "C" => start_preset(preset, PresetKind::SpongeOrbit),
        "Escape" => {
            if preset.borrow_mut().take().is_some() {
                log::info!("[preset] cancelled");
            }
        }
        _ => {}
    }
}

fn start_preset(preset: &Rc<RefCell<Option<PresetState>>>, kind: PresetKind) {
    log::info!("[preset] {}", kind.name());
    *preset.borrow_mut() = Some(PresetState::new(kind));
}

fn wire_keyboard(w: &InputWiring) {
    let controls = w.controls.clone();
    let preset = w.preset.clone();
    let toggle = w.toggle_interactive.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &controls, &preset, toggle.as_ref());
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
