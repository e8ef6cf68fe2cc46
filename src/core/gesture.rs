// Gesture classification over hand-landmark frames, plus the shared
// latest-value cell the tracking callback and the render loop hand off
// through.

use crate::core::constants::*;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const LANDMARK_COUNT: usize = 21;

// Landmark indices, matching the usual 21-point hand topology.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// One detected hand: 21 normalized 2-D landmarks with approximate depth.
pub type HandLandmarks = [Vec3; LANDMARK_COUNT];

/// Ephemeral per-callback snapshot of up to two hands. Not retained past
/// classification.
#[derive(Clone, Debug, Default)]
pub struct HandFrame {
    pub hands: SmallVec<[HandLandmarks; 2]>,
}

/// Derived gesture signals, overwritten wholesale on each tracking callback
/// and read every render frame. Booleans are not mutually exclusive.
#[derive(Clone, Debug, Default)]
pub struct GestureState {
    pub hand_count: usize,
    pub pinching: bool,
    pub fist: bool,
    pub palm_open: bool,
    pub victory: bool,
    pub snapping: bool,
    pub waving: bool,
    pub clapping: bool,
    pub punching: bool,
    pub two_hand_smash: bool,
    /// 0 at the pinch threshold, 1 when the fingertips touch.
    pub pinch_strength: f32,
    /// Wrist-to-wrist distance when two hands are visible.
    pub hands_distance: f32,
    /// Smoothed index-fingertip position of the primary hand (normalized).
    pub pointer: Vec2,
    /// Edge flags for one-shot haptic feedback: true only on the frame the
    /// gesture began, from an explicit previous-value comparison.
    pub wave_started: bool,
    pub fist_started: bool,
}

impl GestureState {
    /// Single display label, by fixed priority.
    pub fn label(&self) -> &'static str {
        if self.clapping {
            "clap"
        } else if self.two_hand_smash {
            "smash"
        } else if self.snapping {
            "snap"
        } else if self.victory {
            "victory"
        } else if self.punching {
            "punch"
        } else if self.fist {
            "fist"
        } else if self.pinching {
            "pinch"
        } else if self.palm_open {
            "palm"
        } else {
            "tracking"
        }
    }
}

/// Explicit cross-frame classifier memory, updated once per callback.
#[derive(Clone, Debug, Default)]
struct ClassifierMemory {
    prev_wrist_depth: Option<f32>,
    wave_window: VecDeque<f32>,
    prev_fist: bool,
    prev_waving: bool,
}

/// Derives gesture signals from landmark frames. Owns all cross-frame state
/// (previous wrist depth for the punch delta, the rolling wave window, and
/// previous booleans for edge-triggered feedback).
#[derive(Default)]
pub struct GestureClassifier {
    memory: ClassifierMemory,
    pointer: Vec2,
    pointer_initialized: bool,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one frame. A zero-hand frame yields the idle state and
    /// resets motion history; stale-frame retention is the publisher's
    /// concern, not the classifier's.
    pub fn classify(&mut self, frame: &HandFrame) -> GestureState {
        let mut state = GestureState {
            hand_count: frame.hands.len(),
            pointer: self.pointer,
            ..GestureState::default()
        };
        let Some(primary) = frame.hands.first() else {
            self.memory.prev_wrist_depth = None;
            self.memory.wave_window.clear();
            self.memory.prev_fist = false;
            self.memory.prev_waving = false;
            return state;
        };

        let wrist = primary[WRIST];
        let thumb = primary[THUMB_TIP];
        let index = primary[INDEX_TIP];
        let middle = primary[MIDDLE_TIP];

        // Fingertip extension relative to the wrist, in the image plane.
        let ext_index = planar_dist(index, wrist);
        let ext_middle = planar_dist(middle, wrist);
        let ext_ring = planar_dist(primary[RING_TIP], wrist);
        let ext_pinky = planar_dist(primary[PINKY_TIP], wrist);
        let mean_ext = (ext_index + ext_middle + ext_ring + ext_pinky) / 4.0;

        let pinch_dist = planar_dist(thumb, index);
        state.pinching = pinch_dist < PINCH_DIST;
        state.pinch_strength = if state.pinching {
            (1.0 - pinch_dist / PINCH_DIST).clamp(0.0, 1.0)
        } else {
            0.0
        };

        state.fist = mean_ext < FIST_MEAN_EXTENSION;
        state.palm_open = !state.fist && !state.pinching && mean_ext > PALM_MEAN_EXTENSION;
        state.victory = ext_index > VICTORY_EXTENDED
            && ext_middle > VICTORY_EXTENDED
            && ext_ring < VICTORY_CURLED
            && ext_pinky < VICTORY_CURLED;
        state.snapping =
            planar_dist(thumb, middle) < SNAP_DIST && ext_index > SNAP_INDEX_EXTENDED;

        // Punch: fist plus a large wrist-depth jump over one frame.
        if let Some(prev_z) = self.memory.prev_wrist_depth {
            state.punching = state.fist && (wrist.z - prev_z).abs() > PUNCH_DEPTH_DELTA;
        }
        self.memory.prev_wrist_depth = Some(wrist.z);

        // Wave: peak-to-peak range of a rolling horizontal-position window.
        self.memory.wave_window.push_back(wrist.x);
        while self.memory.wave_window.len() > WAVE_WINDOW {
            self.memory.wave_window.pop_front();
        }
        let (mut lo, mut hi) = (f32::MAX, f32::MIN);
        for &x in &self.memory.wave_window {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        state.waving = self.memory.wave_window.len() > 2 && (hi - lo) > WAVE_RANGE && !state.fist;

        // Two-hand gestures.
        if let Some(second) = frame.hands.get(1) {
            let d = planar_dist(wrist, second[WRIST]);
            state.hands_distance = d;
            state.clapping = d < CLAP_WRIST_DIST;
            let second_fist = mean_extension(second) < FIST_MEAN_EXTENSION;
            state.two_hand_smash = state.fist && second_fist && d < SMASH_WRIST_DIST;
        }

        // Smoothed fingertip pointer.
        let tip = index.truncate();
        if self.pointer_initialized {
            self.pointer += (tip - self.pointer) * POINTER_BLEND_ALPHA;
        } else {
            self.pointer = tip;
            self.pointer_initialized = true;
        }
        state.pointer = self.pointer;

        // Edge flags from explicit previous-value comparison.
        state.fist_started = state.fist && !self.memory.prev_fist;
        state.wave_started = state.waving && !self.memory.prev_waving;
        self.memory.prev_fist = state.fist;
        self.memory.prev_waving = state.waving;

        state
    }
}

fn planar_dist(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}

fn mean_extension(hand: &HandLandmarks) -> f32 {
    let wrist = hand[WRIST];
    (planar_dist(hand[INDEX_TIP], wrist)
        + planar_dist(hand[MIDDLE_TIP], wrist)
        + planar_dist(hand[RING_TIP], wrist)
        + planar_dist(hand[PINKY_TIP], wrist))
        / 4.0
}

/// Latest-value cell shared between the tracking callback and the render
/// loop: overwrite-in-place publish, wholesale snapshot read. No queue; a
/// failed tracking exchange simply leaves the previous value in place.
#[derive(Clone, Default)]
pub struct SharedGestures {
    inner: Arc<Mutex<GestureState>>,
}

impl SharedGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, state: GestureState) {
        *self.inner.lock().unwrap() = state;
    }

    pub fn snapshot(&self) -> GestureState {
        self.inner.lock().unwrap().clone()
    }
}
