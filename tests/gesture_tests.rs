// Host-side tests for the gesture classifier.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod gesture {
        include!("../src/core/gesture.rs");
    }
}

use crate::core::constants::*;
use crate::core::gesture::*;
use glam::Vec3;

/// Build a hand whose four non-thumb fingertips sit `extension` away from
/// the wrist, with the thumb parked off to the side.
fn hand(wrist: Vec3, extension: f32) -> HandLandmarks {
    let mut hand = [wrist; LANDMARK_COUNT];
    hand[INDEX_TIP] = wrist + Vec3::new(-0.05, -extension, 0.0);
    hand[MIDDLE_TIP] = wrist + Vec3::new(0.0, -extension, 0.0);
    hand[RING_TIP] = wrist + Vec3::new(0.05, -extension, 0.0);
    hand[PINKY_TIP] = wrist + Vec3::new(0.10, -extension, 0.0);
    hand[THUMB_TIP] = wrist + Vec3::new(-0.2, -0.1, 0.0);
    hand
}

fn frame_of(hands: &[HandLandmarks]) -> HandFrame {
    let mut frame = HandFrame::default();
    for h in hands {
        frame.hands.push(*h);
    }
    frame
}

#[test]
fn zero_hands_is_idle() {
    let mut classifier = GestureClassifier::new();
    let state = classifier.classify(&HandFrame::default());
    assert_eq!(state.hand_count, 0);
    assert!(!state.fist && !state.pinching && !state.palm_open);
    assert_eq!(state.label(), "tracking");
}

#[test]
fn pinch_from_touching_thumb_and_index() {
    let wrist = Vec3::new(0.5, 0.8, 0.0);
    let mut hand = hand(wrist, 0.32);
    hand[THUMB_TIP] = Vec3::new(0.50, 0.52, 0.0);
    hand[INDEX_TIP] = Vec3::new(0.53, 0.50, 0.0);
    let state = GestureClassifier::new().classify(&frame_of(&[hand]));
    assert!(state.pinching);
    assert!(state.pinch_strength > 0.0);
    assert!(!state.fist);
    assert!(!state.palm_open, "pinch excludes palm-open");
    assert_eq!(state.label(), "pinch");
}

#[test]
fn fist_from_curled_fingers() {
    let state = GestureClassifier::new().classify(&frame_of(&[hand(
        Vec3::new(0.5, 0.5, 0.0),
        0.08,
    )]));
    assert!(state.fist);
    assert!(!state.palm_open);
    assert!(state.fist_started, "first fist frame sets the edge flag");
    assert_eq!(state.label(), "fist");
}

#[test]
fn fist_edge_flag_fires_once() {
    let mut classifier = GestureClassifier::new();
    let curled = frame_of(&[hand(Vec3::new(0.5, 0.5, 0.0), 0.08)]);
    let first = classifier.classify(&curled);
    let second = classifier.classify(&curled);
    assert!(first.fist_started);
    assert!(second.fist && !second.fist_started);
}

#[test]
fn open_palm_from_extended_fingers() {
    let state = GestureClassifier::new().classify(&frame_of(&[hand(
        Vec3::new(0.5, 0.8, 0.0),
        0.5,
    )]));
    assert!(state.palm_open);
    assert!(!state.fist && !state.pinching);
    assert_eq!(state.label(), "palm");
}

#[test]
fn victory_needs_two_up_two_down() {
    let wrist = Vec3::new(0.5, 0.8, 0.0);
    let mut v = hand(wrist, 0.45);
    v[RING_TIP] = wrist + Vec3::new(0.05, -0.2, 0.0);
    v[PINKY_TIP] = wrist + Vec3::new(0.10, -0.2, 0.0);
    let state = GestureClassifier::new().classify(&frame_of(&[v]));
    assert!(state.victory);
    assert_eq!(state.label(), "victory");
}

#[test]
fn snap_needs_thumb_on_middle_with_index_up() {
    let wrist = Vec3::new(0.5, 0.8, 0.0);
    let mut s = hand(wrist, 0.3);
    s[INDEX_TIP] = wrist + Vec3::new(0.0, -0.45, 0.0);
    s[MIDDLE_TIP] = Vec3::new(0.52, 0.50, 0.0);
    s[THUMB_TIP] = Vec3::new(0.50, 0.50, 0.0);
    let state = GestureClassifier::new().classify(&frame_of(&[s]));
    assert!(state.snapping);
    assert_eq!(state.label(), "snap");
}

#[test]
fn punch_is_fist_plus_depth_jump() {
    let mut classifier = GestureClassifier::new();
    let still = hand(Vec3::new(0.5, 0.5, 0.0), 0.08);
    let first = classifier.classify(&frame_of(&[still]));
    assert!(!first.punching, "no previous depth on the first frame");
    let thrust = hand(Vec3::new(0.5, 0.5, 0.25), 0.08);
    let second = classifier.classify(&frame_of(&[thrust]));
    assert!(second.punching);
    assert_eq!(second.label(), "punch");
    // A slow drift below the delta threshold is not a punch.
    let drift = hand(Vec3::new(0.5, 0.5, 0.27), 0.08);
    let third = classifier.classify(&frame_of(&[drift]));
    assert!(!third.punching);
}

#[test]
fn clap_from_close_wrists() {
    let a = hand(Vec3::new(0.46, 0.5, 0.0), 0.5);
    let b = hand(Vec3::new(0.54, 0.5, 0.0), 0.5);
    let state = GestureClassifier::new().classify(&frame_of(&[a, b]));
    assert_eq!(state.hand_count, 2);
    assert!(state.clapping);
    assert!((state.hands_distance - 0.08).abs() < 1e-6);
    assert_eq!(state.label(), "clap");
}

#[test]
fn two_fists_close_together_is_a_smash() {
    // Both hands fist, wrist distance 0.05.
    let a = hand(Vec3::new(0.475, 0.5, 0.0), 0.08);
    let b = hand(Vec3::new(0.525, 0.5, 0.0), 0.08);
    let state = GestureClassifier::new().classify(&frame_of(&[a, b]));
    assert!(state.two_hand_smash);
    // Both booleans may hold at once; the label ranks clap first.
    assert!(state.clapping);
    assert_eq!(state.label(), "clap");
}

#[test]
fn distant_fists_do_not_smash() {
    let a = hand(Vec3::new(0.3, 0.5, 0.0), 0.08);
    let b = hand(Vec3::new(0.7, 0.5, 0.0), 0.08);
    let state = GestureClassifier::new().classify(&frame_of(&[a, b]));
    assert!(!state.two_hand_smash && !state.clapping);
}

#[test]
fn waving_needs_a_wide_horizontal_range() {
    let mut classifier = GestureClassifier::new();
    let mut state = GestureState::default();
    for i in 0..WAVE_WINDOW {
        let x = if i % 2 == 0 { 0.3 } else { 0.7 };
        state = classifier.classify(&frame_of(&[hand(Vec3::new(x, 0.5, 0.0), 0.5)]));
    }
    assert!(state.waving);
    // A fist suppresses the wave even while the hand still moves.
    let fist_state = classifier.classify(&frame_of(&[hand(Vec3::new(0.3, 0.5, 0.0), 0.08)]));
    assert!(!fist_state.waving);
}

#[test]
fn still_hand_does_not_wave() {
    let mut classifier = GestureClassifier::new();
    let mut state = GestureState::default();
    for _ in 0..WAVE_WINDOW {
        state = classifier.classify(&frame_of(&[hand(Vec3::new(0.5, 0.5, 0.0), 0.5)]));
    }
    assert!(!state.waving);
}

#[test]
fn pointer_follows_the_index_fingertip() {
    let mut classifier = GestureClassifier::new();
    let first = classifier.classify(&frame_of(&[hand(Vec3::new(0.2, 0.6, 0.0), 0.4)]));
    // First sighting snaps the pointer instead of easing from zero.
    assert!((first.pointer - (Vec3::new(0.2, 0.6, 0.0) + Vec3::new(-0.05, -0.4, 0.0)).truncate())
        .length()
        < 1e-6);
    let moved = classifier.classify(&frame_of(&[hand(Vec3::new(0.8, 0.6, 0.0), 0.4)]));
    // Subsequent frames ease toward the new fingertip.
    assert!(moved.pointer.x > first.pointer.x);
    assert!(moved.pointer.x < 0.8);
}

#[test]
fn shared_cell_is_overwrite_in_place() {
    let cell = SharedGestures::new();
    assert_eq!(cell.snapshot().hand_count, 0);
    let mut state = GestureState::default();
    state.hand_count = 2;
    state.fist = true;
    cell.publish(state);
    let read = cell.snapshot();
    assert_eq!(read.hand_count, 2);
    assert!(read.fist);
    // A second publish replaces wholesale, it does not merge.
    cell.publish(GestureState::default());
    assert_eq!(cell.snapshot().hand_count, 0);
}
