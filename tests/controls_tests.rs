// Host-side tests for the control smoother, cooldown gate and the per-frame
// orchestrator step.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod gesture {
        include!("../src/core/gesture.rs");
    }
    pub mod nav {
        include!("../src/core/nav.rs");
    }
    pub mod presets {
        include!("../src/core/presets.rs");
    }
    pub mod controls {
        include!("../src/core/controls.rs");
    }
}

use crate::core::constants::*;
use crate::core::controls::*;
use crate::core::gesture::GestureState;
use crate::core::params::FractalMode;
use crate::core::presets::{PresetKind, PresetState};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn fist_state() -> GestureState {
    GestureState {
        hand_count: 1,
        fist: true,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    }
}

fn smash_state() -> GestureState {
    GestureState {
        hand_count: 2,
        fist: true,
        pinching: true,
        two_hand_smash: true,
        clapping: false,
        hands_distance: 0.05,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    }
}

// ---------------- smoothing law ----------------

#[test]
fn smoothing_is_step_granularity_independent() {
    // One big step and many small steps must land on the same analytic
    // value: target*(1-e^(-rate*t)) + initial*e^(-rate*t).
    let rate = 5.5_f32;
    let target = 3.0_f32;
    let initial = 1.0_f32;
    let total = 2.0_f32;

    let mut one = Smoothed::new(initial, rate);
    one.step(target, total);

    let mut many = Smoothed::new(initial, rate);
    let n = 2000;
    for _ in 0..n {
        many.step(target, total / n as f32);
    }

    let analytic = target * (1.0 - (-rate * total).exp()) + initial * (-rate * total).exp();
    assert!((one.value() - analytic).abs() < 1e-4);
    assert!((many.value() - analytic).abs() < 1e-3);
    assert!((one.value() - many.value()).abs() < 1e-3);
}

#[test]
fn smoothing_never_overshoots() {
    let mut s = Smoothed::new(0.0, 9.0);
    let mut prev = 0.0_f32;
    for _ in 0..600 {
        s.step(1.0, DT);
        assert!(s.value() >= prev && s.value() <= 1.0);
        prev = s.value();
    }
    assert!((s.value() - 1.0).abs() < 1e-3);
}

// ---------------- cooldown gating ----------------

#[test]
fn sustained_clap_fires_once_per_cooldown_interval() {
    // A clap boolean held across 1000 frames at 60 Hz fires exactly
    // floor(total_time / cooldown) + 1 times.
    let mut cooldowns = Cooldowns::default();
    let mut fires = 0u32;
    for _ in 0..1000 {
        cooldowns.tick(DT);
        if cooldowns.try_clap() {
            fires += 1;
        }
    }
    let total_time = 1000.0 * DT;
    let expected = (total_time / CLAP_COOLDOWN).floor() as u32 + 1;
    assert_eq!(fires, expected);
}

#[test]
fn cooldown_timers_are_independent() {
    let mut cooldowns = Cooldowns::default();
    cooldowns.tick(DT);
    assert!(cooldowns.try_clap());
    // The clap reset must not block a snap.
    assert!(cooldowns.try_snap());
    assert!(!cooldowns.try_clap(), "clap is now cooling down");
    assert!(!cooldowns.try_snap(), "snap is now cooling down");
}

#[test]
fn snap_advances_palette_only_when_gated() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    let snap = GestureState {
        hand_count: 1,
        snapping: true,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    };
    // Held snap across 1 second: fires at t=0 and after each cooldown.
    let mut last_palette = cs.palette();
    let mut changes = 0;
    for _ in 0..60 {
        cs.advance(DT, &snap, None);
        if cs.palette() != last_palette {
            changes += 1;
            last_palette = cs.palette();
        }
    }
    let expected = (60.0 * DT / SNAP_COOLDOWN).floor() as i32 + 1;
    assert_eq!(changes, expected);
}

#[test]
fn palette_wraps_mod_count() {
    let mut cs = ControlState::new();
    for _ in 0..PALETTE_COUNT {
        cs.advance_palette();
    }
    assert_eq!(cs.palette(), 0);
    cs.set_palette(200);
    assert!((cs.palette() as usize) < PALETTE_COUNT);
}

#[test]
fn clap_toggles_the_interaction_sub_mode() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    assert_eq!(cs.interaction_mode(), InteractionMode::Orbit);
    let clap = GestureState {
        hand_count: 2,
        clapping: true,
        hands_distance: 0.08,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    };
    cs.advance(DT, &clap, None);
    assert_eq!(cs.interaction_mode(), InteractionMode::Fly);
    // Still clapping next frame: gated, no second toggle.
    cs.advance(DT, &clap, None);
    assert_eq!(cs.interaction_mode(), InteractionMode::Fly);
}

// ---------------- orchestrator scenarios ----------------

#[test]
fn rest_scenario_converges_within_tolerance() {
    // Excite the forces with a fist, then drop to zero hands; after >= 2 s
    // everything smoothed sits within 1e-3 of its target and the forces
    // have decayed to ~0.
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    cs.select_mode(FractalMode::Mandelbrot.index());
    for _ in 0..30 {
        cs.advance(DT, &fist_state(), None);
    }
    let idle = GestureState::default();
    let mut last = cs.advance(DT, &idle, None);
    for _ in 0..(2.5 / DT) as usize {
        last = cs.advance(DT, &idle, None);
    }
    assert!((last.mode_blend - FractalMode::Mandelbrot.index() as f32).abs() < 1e-3);
    assert!(cs.nav().at_rest(1e-3));
    assert!(last.attract.abs() < 1e-3);
    assert!(last.repel.abs() < 1e-3);
    assert!(last.chaos.abs() < 1e-3);
    assert!(last.explosion.abs() < 1e-3);
    assert!(last.snap_wave.abs() < 1e-3);
    assert!((last.pinch_scale - 1.0).abs() < 1e-3);
}

#[test]
fn smash_selects_the_strong_repulsion_tier() {
    // Two fists at wrist distance 0.05: repulsion goes to the strong tier
    // regardless of the individual pinch/palm classification.
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    let mut last = cs.advance(DT, &smash_state(), None);
    for _ in 0..120 {
        last = cs.advance(DT, &smash_state(), None);
    }
    assert!((last.repel - REPEL_TIER_STRONG).abs() < 1e-2);
    assert!(last.attract < 1e-2, "smash outranks the fist/pinch attract tiers");
}

#[test]
fn force_targets_follow_priority() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    // Fist alone attracts.
    let mut last = cs.advance(DT, &fist_state(), None);
    for _ in 0..120 {
        last = cs.advance(DT, &fist_state(), None);
    }
    assert!((last.attract - ATTRACT_TIER_STRONG).abs() < 1e-2);
    // Open palm alone repels softly.
    let palm = GestureState {
        hand_count: 1,
        palm_open: true,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    };
    for _ in 0..240 {
        last = cs.advance(DT, &palm, None);
    }
    assert!((last.repel - REPEL_TIER_SOFT).abs() < 1e-2);
    assert!(last.attract < 1e-2);
}

#[test]
fn forces_stay_idle_without_interactive_mode() {
    let mut cs = ControlState::new();
    let mut last = cs.advance(DT, &fist_state(), None);
    for _ in 0..120 {
        last = cs.advance(DT, &fist_state(), None);
    }
    assert!(last.attract < 1e-4);
    assert!(!last.interactive);
}

#[test]
fn dt_stalls_are_clamped() {
    let mut cs = ControlState::new();
    let before = cs.time();
    cs.advance(10.0, &GestureState::default(), None);
    assert!((cs.time() - before - MAX_FRAME_DT).abs() < 1e-6);
    // Non-finite dt is absorbed, not propagated.
    let p = cs.advance(f32::NAN, &GestureState::default(), None);
    assert!(p.time.is_finite());
    assert!(p.mode_blend.is_finite());
}

#[test]
fn published_parameters_respect_invariants() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    cs.set_iteration_cap(9999);
    cs.set_power(100.0);
    cs.select_mode(99);
    let mut p = cs.advance(DT, &smash_state(), None);
    for _ in 0..300 {
        p = cs.advance(DT, &smash_state(), None);
    }
    assert!(p.zoom >= ZOOM_MIN && p.zoom <= ZOOM_MAX);
    assert!((0.0..=(MODE_COUNT - 1) as f32).contains(&p.mode_blend));
    assert!((p.palette as usize) < PALETTE_COUNT);
    assert!(p.iteration_cap <= ITER_CAP_MAX);
    assert!(p.power <= POWER_MAX);
}

#[test]
fn fly_mode_fist_throttles_zoom_exponentially() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    // Clap into fly mode.
    let clap = GestureState {
        hand_count: 2,
        clapping: true,
        pointer: Vec2::new(0.5, 0.5),
        ..GestureState::default()
    };
    cs.advance(DT, &clap, None);
    assert_eq!(cs.interaction_mode(), InteractionMode::Fly);
    let z0 = cs.nav().zoom_target();
    for _ in 0..60 {
        cs.advance(DT, &fist_state(), None);
    }
    let z1 = cs.nav().zoom_target();
    // One second of throttle multiplies the target by ~e^FLY_ZOOM_RATE.
    let expected = z0 * FLY_ZOOM_RATE.exp();
    assert!((z1 / expected - 1.0).abs() < 0.05, "z1={z1} expected~{expected}");
}

#[test]
fn preset_overrides_manual_targets_and_suppresses_gestures() {
    let mut cs = ControlState::new();
    cs.set_interactive(true);
    cs.select_mode(FractalMode::Sierpinski.index());
    let mut preset = PresetState::new(PresetKind::Dive);
    let mut last = cs.advance(DT, &fist_state(), Some(&preset.drive(DT)));
    for _ in 0..240 {
        let targets = preset.drive(DT);
        last = cs.advance(DT, &fist_state(), Some(&targets));
    }
    // The dive drives Mandelbrot, not the manually selected Sierpinski.
    assert!((last.mode_blend - FractalMode::Mandelbrot.index() as f32).abs() < 0.05);
    // Gesture forces stay decayed while the preset runs.
    assert!(last.attract < 1e-2);
    assert!(!last.interactive);
    // Cancelling hands control back to the manual selection.
    for _ in 0..600 {
        last = cs.advance(DT, &GestureState::default(), None);
    }
    assert!((last.mode_blend - FractalMode::Sierpinski.index() as f32).abs() < 1e-2);
}

// ---------------- navigation ----------------

#[test]
fn zoom_target_stays_clamped() {
    let mut cs = ControlState::new();
    let nav = cs.nav_mut();
    for _ in 0..200 {
        nav.zoom_by_factor(10.0);
    }
    assert!(nav.zoom_target() <= ZOOM_MAX);
    for _ in 0..200 {
        nav.zoom_by_factor(0.01);
    }
    assert!(nav.zoom_target() >= ZOOM_MIN);
    // Degenerate factors are ignored.
    let before = nav.zoom_target();
    nav.zoom_by_factor(f32::NAN);
    nav.zoom_by_factor(-3.0);
    nav.zoom_by_factor(0.0);
    assert_eq!(nav.zoom_target(), before);
}

#[test]
fn pan_accumulates_and_clamps() {
    let mut cs = ControlState::new();
    let nav = cs.nav_mut();
    nav.pan_by(Vec2::new(0.5, -0.25));
    assert!((nav.pan_target() - Vec2::new(0.5, -0.25)).length() < 1e-6);
    for _ in 0..100 {
        nav.pan_by(Vec2::splat(1.0));
    }
    assert!(nav.pan_target().x <= PAN_LIMIT && nav.pan_target().y <= PAN_LIMIT);
}
