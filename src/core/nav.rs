use crate::core::constants::{
    PAN_LIMIT, RATE_PAN, RATE_ZOOM, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN,
};
use crate::core::controls::{Smoothed, SmoothedVec2};
use glam::Vec2;

/// Navigation accumulated from pointer and/or gesture deltas: a zoom scalar
/// clamped to a strictly positive range and a 2-D pan, each holding a target
/// and an independently smoothed current value.
pub struct NavigationState {
    zoom_target: f32,
    pan_target: Vec2,
    zoom: Smoothed,
    pan: SmoothedVec2,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            zoom_target: ZOOM_DEFAULT,
            pan_target: Vec2::ZERO,
            zoom: Smoothed::new(ZOOM_DEFAULT, RATE_ZOOM),
            pan: SmoothedVec2::new(Vec2::ZERO, RATE_PAN),
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the pan target; pointer drags and gesture drags share this.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_target =
            (self.pan_target + delta).clamp(Vec2::splat(-PAN_LIMIT), Vec2::splat(PAN_LIMIT));
    }

    pub fn set_pan_target(&mut self, pan: Vec2) {
        self.pan_target = pan.clamp(Vec2::splat(-PAN_LIMIT), Vec2::splat(PAN_LIMIT));
    }

    /// Scale the zoom target by a positive factor (wheel steps, fist
    /// throttle). The target never leaves [ZOOM_MIN, ZOOM_MAX].
    pub fn zoom_by_factor(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom_target = (self.zoom_target * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn set_zoom_target(&mut self, zoom: f32) {
        self.zoom_target = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_target(&self) -> f32 {
        self.zoom_target
    }

    pub fn pan_target(&self) -> Vec2 {
        self.pan_target
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.value()
    }

    pub fn pan(&self) -> Vec2 {
        self.pan.value()
    }

    /// Advance both smoothed values toward their targets.
    pub fn step(&mut self, dt: f32) {
        self.zoom.step(self.zoom_target, dt);
        self.pan.step(self.pan_target, dt);
    }

    /// True once both smoothed values sit within `tol` of their targets.
    pub fn at_rest(&self, tol: f32) -> bool {
        (self.zoom.value() - self.zoom_target).abs() <= tol
            && (self.pan.value() - self.pan_target).length() <= tol
    }
}
