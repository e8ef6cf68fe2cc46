// Hand Tracking Adapter: acquires the camera, feeds frames to a
// page-supplied detector callback, classifies the resulting landmarks and
// publishes into the shared gesture cell.
//
// The detector is the external collaborator: a JS function taking the video
// element and returning up to two hands of 21 `[x, y, z]` landmarks (or
// `{x, y, z}` objects). A failed or empty exchange is skipped silently and
// the previous GestureState stays current.

use crate::constants::TRACKER_INTERVAL_MS;
use crate::core::gesture::{GestureClassifier, HandFrame, SharedGestures, LANDMARK_COUNT};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Failures at the collaborator boundary. None of these are fatal: the core
/// degrades to a zero-hands GestureState and pointer navigation still works.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("no window/document available")]
    NoWindow,
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("tracker setup failed: {0}")]
    Setup(String),
}

/// A running tracking pipeline. `stop` releases the camera deterministically:
/// the poll interval is cleared, every media track stopped and the hidden
/// video element removed.
pub struct TrackerHandle {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl TrackerHandle {
    pub fn stop(self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.interval_id);
        }
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.remove();
        log::info!("[tracker] camera released");
    }
}

/// Start the camera and the detector poll loop.
pub async fn start(
    detector: js_sys::Function,
    gestures: SharedGestures,
) -> Result<TrackerHandle, TrackerError> {
    let window = web::window().ok_or(TrackerError::NoWindow)?;
    let document = window.document().ok_or(TrackerError::NoWindow)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| TrackerError::CameraUnavailable(format!("{e:?}")))?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| TrackerError::CameraUnavailable(format!("{e:?}")))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| TrackerError::PermissionDenied(format!("{e:?}")))?
        .dyn_into()
        .map_err(|e| TrackerError::Setup(format!("{e:?}")))?;

    let video: web::HtmlVideoElement = document
        .create_element("video")
        .map_err(|e| TrackerError::Setup(format!("{e:?}")))?
        .dyn_into()
        .map_err(|e| TrackerError::Setup(format!("{e:?}")))?;
    video.set_autoplay(true);
    video.set_muted(true);
    _ = video.set_attribute("playsinline", "");
    _ = video.style().set_property("display", "none");
    video.set_src_object(Some(&stream));
    if let Some(body) = document.body() {
        _ = body.append_child(&video);
    }
    _ = video.play();

    let classifier = Rc::new(RefCell::new(GestureClassifier::new()));
    let tick = {
        let video = video.clone();
        let classifier = classifier.clone();
        Closure::wrap(Box::new(move || {
            match detector.call1(&JsValue::NULL, video.as_ref()) {
                Ok(result) => {
                    if let Some(frame) = parse_hand_frame(&result) {
                        let state = classifier.borrow_mut().classify(&frame);
                        // One-shot feedback keys off the classifier's own
                        // edge flags; each published state is fresh exactly
                        // once here, unlike in the render loop.
                        if state.wave_started {
                            log::debug!("[gesture] wave started");
                        }
                        if state.fist_started {
                            log::debug!("[gesture] fist closed");
                        }
                        gestures.publish(state);
                    }
                    // Unparseable result: keep the previous state, no retry.
                }
                Err(e) => {
                    // Transient inference error; cadence bounds the retry rate.
                    log::debug!("[tracker] detector error: {:?}", e);
                }
            }
        }) as Box<dyn FnMut()>)
    };
    let interval_id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            TRACKER_INTERVAL_MS,
        )
        .map_err(|e| TrackerError::Setup(format!("{e:?}")))?;
    log::info!("[tracker] camera running, polling every {TRACKER_INTERVAL_MS}ms");

    Ok(TrackerHandle {
        stream,
        video,
        interval_id,
        _tick: tick,
    })
}

/// Parse `[hands][21][x,y,z]` (arrays or `{x,y,z}` objects) into a frame.
/// Returns None for anything malformed; the caller skips the frame.
fn parse_hand_frame(value: &JsValue) -> Option<HandFrame> {
    let hands = value.dyn_ref::<js_sys::Array>()?;
    let mut frame = HandFrame::default();
    for hand_value in hands.iter().take(2) {
        let landmarks = hand_value.dyn_into::<js_sys::Array>().ok()?;
        if (landmarks.length() as usize) < LANDMARK_COUNT {
            return None;
        }
        let mut hand = [Vec3::ZERO; LANDMARK_COUNT];
        for (i, slot) in hand.iter_mut().enumerate() {
            *slot = parse_landmark(&landmarks.get(i as u32))?;
        }
        frame.hands.push(hand);
    }
    Some(frame)
}

fn parse_landmark(value: &JsValue) -> Option<Vec3> {
    if let Some(triplet) = value.dyn_ref::<js_sys::Array>() {
        Some(Vec3::new(
            triplet.get(0).as_f64()? as f32,
            triplet.get(1).as_f64()? as f32,
            triplet.get(2).as_f64().unwrap_or(0.0) as f32,
        ))
    } else {
        let field = |name: &str| {
            js_sys::Reflect::get(value, &JsValue::from_str(name))
                .ok()
                .and_then(|v| v.as_f64())
        };
        Some(Vec3::new(
            field("x")? as f32,
            field("y")? as f32,
            field("z").unwrap_or(0.0) as f32,
        ))
    }
}
