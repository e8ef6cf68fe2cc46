// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
}

use crate::core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_thresholds_keep_their_relative_ordering() {
    // A fist must read as more curled than an open palm.
    assert!(FIST_MEAN_EXTENSION < PALM_MEAN_EXTENSION);
    // Snap contact is tighter than a pinch.
    assert!(SNAP_DIST < PINCH_DIST);
    // A smash tolerates more wrist separation than a clap.
    assert!(CLAP_WRIST_DIST < SMASH_WRIST_DIST);
    // Victory's curled threshold sits below its extended threshold.
    assert!(VICTORY_CURLED < VICTORY_EXTENDED);
    assert!(WAVE_WINDOW > 2);
    assert!(WAVE_RANGE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_rates_and_clamps_are_sane() {
    assert!(RATE_MODE > 0.0);
    assert!(RATE_ZOOM > 0.0 && RATE_PAN > 0.0 && RATE_FORCE > 0.0);
    assert!(MAX_FRAME_DT > 0.0 && MAX_FRAME_DT < 1.0);
    // Snap re-fires faster than clap.
    assert!(SNAP_COOLDOWN < CLAP_COOLDOWN);
    assert!(SNAP_COOLDOWN > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn zoom_bounds_are_strictly_positive_and_ordered() {
    assert!(ZOOM_MIN > 0.0);
    assert!(ZOOM_MIN < ZOOM_DEFAULT && ZOOM_DEFAULT < ZOOM_MAX);
    assert!(PAN_LIMIT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn kernel_caps_are_ordered() {
    assert!(ITER_CAP_MIN < ITER_CAP_DEFAULT);
    assert!(ITER_CAP_DEFAULT < ITER_CAP_MAX);
    assert!(ITER_CAP_MAX <= ITER_CAP_HARD);
    assert!(POWER_MIN < POWER_DEFAULT && POWER_DEFAULT < POWER_MAX);
    assert!(BULB_ESCAPE_RADIUS > 0.0);
    assert!(DEPTH_HIDE_THRESHOLD > 0.0 && DEPTH_HIDE_THRESHOLD < 1.0);
    assert!(EPSILON > 0.0 && EPSILON < 1e-3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn field_shape_matches_the_design() {
    assert!(PARTICLE_COUNT >= 10_000, "the field is tens of thousands");
    assert!(FIELD_RADIUS > 0.0);
    assert!(PARTICLE_SIZE_MIN < PARTICLE_SIZE_MAX);
    assert_eq!(MODE_COUNT, 7);
    assert_eq!(PALETTE_COUNT, 5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn force_tiers_rank_strong_above_soft() {
    assert!(ATTRACT_TIER_SOFT < ATTRACT_TIER_STRONG);
    assert!(REPEL_TIER_SOFT < REPEL_TIER_STRONG);
    assert!(ATTRACT_RADIUS < REPEL_RADIUS, "repulsion reaches further");
}
