use crate::core::constants::{
    ITER_CAP_DEFAULT, JULIA_C_DEFAULT, MODE_COUNT, POWER_DEFAULT, ZOOM_DEFAULT,
};
use glam::{Vec2, Vec3};

/// The seven fractal families the particle field can morph among.
///
/// The driving control value is a continuous scalar in `[0, 6]` that is
/// damped toward the selected family's index, so fractional values occur
/// during transitions. Dispatch quantizes that scalar into this tag; the raw
/// scalar is kept only for morph display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FractalMode {
    Mandelbulb,
    Julia,
    Mandelbrot,
    Tricorn,
    BurningShip,
    MengerSponge,
    Sierpinski,
}

impl FractalMode {
    pub const ALL: [FractalMode; MODE_COUNT] = [
        FractalMode::Mandelbulb,
        FractalMode::Julia,
        FractalMode::Mandelbrot,
        FractalMode::Tricorn,
        FractalMode::BurningShip,
        FractalMode::MengerSponge,
        FractalMode::Sierpinski,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            FractalMode::Mandelbulb => 0,
            FractalMode::Julia => 1,
            FractalMode::Mandelbrot => 2,
            FractalMode::Tricorn => 3,
            FractalMode::BurningShip => 4,
            FractalMode::MengerSponge => 5,
            FractalMode::Sierpinski => 6,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> FractalMode {
        FractalMode::ALL[index.min(MODE_COUNT - 1)]
    }

    /// Quantize a continuous mode scalar into a family tag.
    ///
    /// Rounds half away from zero, so an exact `x.5` blend selects the
    /// *higher* index: during a morph the scalar moves toward the newly
    /// selected family, and ties resolve in the direction of travel.
    /// Non-finite input falls back to the first family.
    #[inline]
    pub fn from_blend(blend: f32) -> FractalMode {
        if !blend.is_finite() {
            return FractalMode::Mandelbulb;
        }
        FractalMode::from_index(blend.round().clamp(0.0, (MODE_COUNT - 1) as f32) as usize)
    }
}

/// The per-frame published parameter record consumed by the kernel.
///
/// Produced once per display frame by the control smoother; every field is
/// already smoothed, clamped and safe to feed straight into per-particle
/// evaluation.
#[derive(Clone, Debug)]
pub struct ControlParameters {
    /// Continuous mode scalar in [0, 6].
    pub mode_blend: f32,
    /// Quantized dispatch tag derived from `mode_blend`.
    pub mode: FractalMode,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    /// Strictly positive, bounded navigation zoom.
    pub zoom: f32,
    pub pan: Vec2,
    /// Smoothed interaction force strengths.
    pub attract: f32,
    pub repel: f32,
    /// Palette id, wraps mod PALETTE_COUNT.
    pub palette: u8,
    /// Mandelbulb power exponent in [POWER_MIN, POWER_MAX].
    pub power: f32,
    /// Escape-time iteration cap in [ITER_CAP_MIN, ITER_CAP_MAX].
    pub iteration_cap: u32,
    pub julia_c: Vec2,
    pub chaos: f32,
    pub explosion: f32,
    pub snap_wave: f32,
    /// Uniform pinch-driven cloud scale.
    pub pinch_scale: f32,
    /// Tracked hand position in world space, target of attraction/repulsion.
    pub attractor: Vec3,
    /// False while an animation preset or ambient mode suppresses
    /// gesture-driven displacements.
    pub interactive: bool,
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self {
            mode_blend: 0.0,
            mode: FractalMode::Mandelbulb,
            time: 0.0,
            zoom: ZOOM_DEFAULT,
            pan: Vec2::ZERO,
            attract: 0.0,
            repel: 0.0,
            palette: 0,
            power: POWER_DEFAULT,
            iteration_cap: ITER_CAP_DEFAULT,
            julia_c: Vec2::from(JULIA_C_DEFAULT),
            chaos: 0.0,
            explosion: 0.0,
            snap_wave: 0.0,
            pinch_scale: 1.0,
            attractor: Vec3::ZERO,
            interactive: false,
        }
    }
}
