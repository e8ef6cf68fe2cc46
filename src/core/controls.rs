// Control smoothing, cooldown gating and the per-frame orchestrator step
// that turns gesture output (or an active preset) into the published
// parameter record.

use crate::core::constants::*;
use crate::core::gesture::GestureState;
use crate::core::nav::NavigationState;
use crate::core::params::{ControlParameters, FractalMode};
use crate::core::presets::PresetTargets;
use glam::{Vec2, Vec3};

/// Critically-damped exponential smoothing toward a moving target:
/// `x <- x + (target - x) * (1 - e^(-rate * dt))`.
///
/// Total convergence after elapsed wall time t is
/// `target * (1 - e^(-rate*t)) + initial * e^(-rate*t)` regardless of how
/// the time was sliced into steps, so behavior is frame-rate independent.
#[derive(Clone, Copy, Debug)]
pub struct Smoothed {
    value: f32,
    rate: f32,
}

impl Smoothed {
    pub fn new(value: f32, rate: f32) -> Self {
        Self { value, rate }
    }

    pub fn step(&mut self, target: f32, dt: f32) {
        let alpha = 1.0 - (-self.rate * dt.max(0.0)).exp();
        self.value += (target - self.value) * alpha;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(EPSILON);
    }

    /// Add an impulse to the current value (used for one-shot ripples that
    /// then decay toward a zero target).
    pub fn kick(&mut self, amount: f32) {
        self.value = (self.value + amount).min(1.5);
    }
}

/// Two-component variant of [`Smoothed`].
#[derive(Clone, Copy, Debug)]
pub struct SmoothedVec2 {
    value: Vec2,
    rate: f32,
}

impl SmoothedVec2 {
    pub fn new(value: Vec2, rate: f32) -> Self {
        Self { value, rate }
    }

    pub fn step(&mut self, target: Vec2, dt: f32) {
        let alpha = 1.0 - (-self.rate * dt.max(0.0)).exp();
        self.value += (target - self.value) * alpha;
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }
}

/// Per-gesture countdown table. Timers decrement every frame
/// unconditionally; an action fires only at <= 0 and firing resets its
/// timer, so a gesture held across many frames cannot re-fire within the
/// cooldown interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cooldowns {
    clap: f32,
    snap: f32,
}

impl Cooldowns {
    pub fn tick(&mut self, dt: f32) {
        self.clap -= dt;
        self.snap -= dt;
    }

    pub fn try_clap(&mut self) -> bool {
        if self.clap <= 0.0 {
            self.clap = CLAP_COOLDOWN;
            true
        } else {
            false
        }
    }

    pub fn try_snap(&mut self) -> bool {
        if self.snap <= 0.0 {
            self.snap = SNAP_COOLDOWN;
            true
        } else {
            false
        }
    }
}

/// The two gesture-navigation sub-modes; clap toggles between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    /// Fist drags pan by fingertip delta; pinch scales zoom vertically.
    Orbit,
    /// Open palm steers pan from the screen-center offset; fist throttles
    /// zoom exponentially over time.
    Fly,
}

/// All smoothed control signals plus the manual configuration surface.
/// `advance` runs once per display frame and publishes the parameter record.
pub struct ControlState {
    // Manual configuration
    selected_mode: FractalMode,
    palette: u8,
    iteration_cap: u32,
    power: f32,
    attraction_gain: f32,
    pinch_gain: f32,
    interactive: bool,
    interaction_mode: InteractionMode,

    // Smoothed signals
    mode_blend: Smoothed,
    nav: NavigationState,
    attract: Smoothed,
    repel: Smoothed,
    chaos: Smoothed,
    explosion: Smoothed,
    snap_wave: Smoothed,
    pinch_scale: Smoothed,
    julia_c: SmoothedVec2,

    cooldowns: Cooldowns,
    time: f32,
    prev_pointer: Option<Vec2>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            selected_mode: FractalMode::Mandelbulb,
            palette: 0,
            iteration_cap: ITER_CAP_DEFAULT,
            power: POWER_DEFAULT,
            attraction_gain: 1.0,
            pinch_gain: 1.0,
            interactive: false,
            interaction_mode: InteractionMode::Orbit,
            mode_blend: Smoothed::new(0.0, RATE_MODE),
            nav: NavigationState::new(),
            attract: Smoothed::new(0.0, RATE_FORCE),
            repel: Smoothed::new(0.0, RATE_FORCE),
            chaos: Smoothed::new(0.0, RATE_FORCE),
            explosion: Smoothed::new(0.0, RATE_FORCE),
            snap_wave: Smoothed::new(0.0, RATE_SNAP_DECAY),
            pinch_scale: Smoothed::new(1.0, RATE_FORCE),
            julia_c: SmoothedVec2::new(Vec2::from(JULIA_C_DEFAULT), RATE_JULIA),
            cooldowns: Cooldowns::default(),
            time: 0.0,
            prev_pointer: None,
        }
    }
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------- configuration surface ----------------

    pub fn select_mode(&mut self, index: usize) {
        self.selected_mode = FractalMode::from_index(index);
    }

    pub fn set_palette(&mut self, id: u8) {
        self.palette = id % PALETTE_COUNT as u8;
    }

    pub fn advance_palette(&mut self) {
        self.palette = (self.palette + 1) % PALETTE_COUNT as u8;
    }

    pub fn palette(&self) -> u8 {
        self.palette
    }

    pub fn set_iteration_cap(&mut self, cap: u32) {
        self.iteration_cap = cap.clamp(ITER_CAP_MIN, ITER_CAP_MAX);
    }

    pub fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    pub fn set_power(&mut self, power: f32) {
        if power.is_finite() {
            self.power = power.clamp(POWER_MIN, POWER_MAX);
        }
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn set_attraction_gain(&mut self, gain: f32) {
        if gain.is_finite() {
            self.attraction_gain = gain.clamp(0.0, 4.0);
        }
    }

    pub fn set_pinch_gain(&mut self, gain: f32) {
        if gain.is_finite() {
            self.pinch_gain = gain.clamp(0.0, 4.0);
        }
    }

    /// Morph-speed constant: the smoothing rate of the mode blend.
    pub fn set_morph_rate(&mut self, rate: f32) {
        if rate.is_finite() && rate > 0.0 {
            self.mode_blend.set_rate(rate);
        }
    }

    pub fn set_interactive(&mut self, on: bool) {
        self.interactive = on;
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    pub fn nav_mut(&mut self) -> &mut NavigationState {
        &mut self.nav
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    // ---------------- per-frame step ----------------

    /// One orchestrator step: clamp dt, gate discrete actions, derive
    /// targets (preset overrides manual and suppresses gestures), advance
    /// every smoothed value, and publish the frame's parameters.
    pub fn advance(
        &mut self,
        raw_dt: f32,
        gestures: &GestureState,
        preset: Option<&PresetTargets>,
    ) -> ControlParameters {
        let dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.time += dt;
        self.cooldowns.tick(dt);

        let gestures_live = preset.is_none() && self.interactive && gestures.hand_count > 0;

        // Discrete one-shots ride the cooldown table, not boolean edges: the
        // boolean may read true across many more render frames than tracking
        // callbacks.
        if gestures_live {
            if gestures.clapping && self.cooldowns.try_clap() {
                self.interaction_mode = match self.interaction_mode {
                    InteractionMode::Orbit => InteractionMode::Fly,
                    InteractionMode::Fly => InteractionMode::Orbit,
                };
                log::info!("[gesture] clap -> {:?}", self.interaction_mode);
            }
            if gestures.snapping && self.cooldowns.try_snap() {
                self.advance_palette();
                self.snap_wave.kick(1.0);
                log::info!("[gesture] snap -> palette {}", self.palette);
            }
        }

        // Targets.
        let mode_target;
        let julia_target;
        if let Some(pr) = preset {
            mode_target = pr.mode.index() as f32;
            julia_target = pr.julia_c;
            self.nav.set_zoom_target(pr.zoom);
            self.nav.set_pan_target(pr.pan);
        } else {
            mode_target = self.selected_mode.index() as f32;
            julia_target = Vec2::from(JULIA_C_DEFAULT);
            if gestures_live {
                self.steer_navigation(gestures, dt);
            }
        }

        // Force targets switch instantly by priority; the smoothed values
        // still damp continuously.
        let mut attract_t = 0.0;
        let mut repel_t = 0.0;
        let mut pinch_scale_t = 1.0;
        if gestures_live {
            if gestures.two_hand_smash {
                repel_t = REPEL_TIER_STRONG;
            } else if gestures.fist {
                attract_t = ATTRACT_TIER_STRONG * self.attraction_gain;
            } else if gestures.pinching {
                attract_t = ATTRACT_TIER_SOFT * self.attraction_gain;
                pinch_scale_t =
                    1.0 - gestures.pinch_strength * (1.0 - PINCH_SCALE_MIN) * self.pinch_gain;
            } else if gestures.palm_open {
                repel_t = REPEL_TIER_SOFT;
            }
        }
        let chaos_t = if gestures_live && gestures.waving { 1.0 } else { 0.0 };
        let explosion_t = if gestures_live && gestures.punching { 1.0 } else { 0.0 };

        // Advance every smoothed value.
        self.mode_blend.step(mode_target, dt);
        self.nav.step(dt);
        self.attract.step(attract_t, dt);
        self.repel.step(repel_t, dt);
        self.chaos.step(chaos_t, dt);
        self.explosion.step(explosion_t, dt);
        self.snap_wave.step(0.0, dt);
        self.pinch_scale
            .step(pinch_scale_t.clamp(PINCH_SCALE_MIN, 1.0), dt);
        self.julia_c.step(julia_target, dt);
        self.prev_pointer = Some(gestures.pointer);

        let mode_blend = self.mode_blend.value().clamp(0.0, (MODE_COUNT - 1) as f32);
        ControlParameters {
            mode_blend,
            mode: FractalMode::from_blend(mode_blend),
            time: self.time,
            zoom: self.nav.zoom().clamp(ZOOM_MIN, ZOOM_MAX),
            pan: self.nav.pan(),
            attract: self.attract.value(),
            repel: self.repel.value(),
            palette: self.palette,
            power: self.power,
            iteration_cap: self.iteration_cap,
            julia_c: self.julia_c.value(),
            chaos: self.chaos.value(),
            explosion: self.explosion.value(),
            snap_wave: self.snap_wave.value(),
            pinch_scale: self.pinch_scale.value(),
            attractor: pointer_to_world(gestures.pointer),
            interactive: self.interactive && preset.is_none(),
        }
    }

    /// Gesture-driven navigation, split by sub-mode.
    fn steer_navigation(&mut self, gestures: &GestureState, dt: f32) {
        match self.interaction_mode {
            InteractionMode::Orbit => {
                if let Some(prev) = self.prev_pointer {
                    let delta = gestures.pointer - prev;
                    if gestures.fist {
                        // Image-space y grows downward; pan space grows up.
                        self.nav
                            .pan_by(Vec2::new(delta.x, -delta.y) * ORBIT_PAN_GAIN);
                    }
                    if gestures.pinching {
                        let factor =
                            (-delta.y * PINCH_ZOOM_GAIN * self.pinch_gain).exp();
                        self.nav.zoom_by_factor(factor);
                    }
                }
            }
            InteractionMode::Fly => {
                if gestures.palm_open {
                    let offset = gestures.pointer - Vec2::splat(0.5);
                    self.nav
                        .pan_by(Vec2::new(offset.x, -offset.y) * FLY_STEER_GAIN * dt);
                }
                if gestures.fist {
                    self.nav.zoom_by_factor((FLY_ZOOM_RATE * dt).exp());
                }
            }
        }
    }
}

/// Map the normalized fingertip position (y down) into field world space.
fn pointer_to_world(pointer: Vec2) -> Vec3 {
    Vec3::new(
        (pointer.x - 0.5) * 2.0 * FIELD_RADIUS,
        (0.5 - pointer.y) * 2.0 * FIELD_RADIUS,
        0.0,
    )
}
