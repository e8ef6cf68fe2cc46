// Scripted animation presets. While one is active it overrides manual
// control: targets become explicit functions of an internal phase timer and
// gesture-driven interaction is suppressed. A preset runs until cancelled,
// except where it defines its own wraparound.

use crate::core::constants::*;
use crate::core::params::FractalMode;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetKind {
    /// Exponential Mandelbrot zoom toward a fixed pan; loops past a bound.
    Dive,
    /// Sinusoidal Julia-constant trajectory.
    JuliaMorph,
    /// Slow pan orbit around the Menger sponge.
    SpongeOrbit,
}

impl PresetKind {
    pub fn name(self) -> &'static str {
        match self {
            PresetKind::Dive => "dive",
            PresetKind::JuliaMorph => "morph",
            PresetKind::SpongeOrbit => "sponge",
        }
    }

    pub fn by_name(name: &str) -> Option<PresetKind> {
        match name {
            "dive" => Some(PresetKind::Dive),
            "morph" => Some(PresetKind::JuliaMorph),
            "sponge" => Some(PresetKind::SpongeOrbit),
            _ => None,
        }
    }
}

/// Targets a preset feeds into the control smoother each frame.
#[derive(Clone, Copy, Debug)]
pub struct PresetTargets {
    pub mode: FractalMode,
    pub zoom: f32,
    pub pan: Vec2,
    pub julia_c: Vec2,
}

/// An active preset and its phase timer.
pub struct PresetState {
    kind: PresetKind,
    phase: f32,
}

impl PresetState {
    pub fn new(kind: PresetKind) -> Self {
        Self { kind, phase: 0.0 }
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance the phase timer and produce this frame's targets.
    pub fn drive(&mut self, dt: f32) -> PresetTargets {
        self.phase += dt.max(0.0);
        match self.kind {
            PresetKind::Dive => {
                let mut zoom = DIVE_ZOOM_START * (DIVE_ZOOM_RATE * self.phase).exp();
                if zoom > DIVE_ZOOM_WRAP {
                    // Loop the dive instead of pinning at the zoom bound.
                    self.phase = 0.0;
                    zoom = DIVE_ZOOM_START;
                }
                PresetTargets {
                    mode: FractalMode::Mandelbrot,
                    zoom,
                    pan: Vec2::from(DIVE_PAN),
                    julia_c: Vec2::from(JULIA_C_DEFAULT),
                }
            }
            PresetKind::JuliaMorph => PresetTargets {
                mode: FractalMode::Julia,
                zoom: 1.0,
                pan: Vec2::ZERO,
                julia_c: Vec2::new(
                    -0.7 + 0.25 * (self.phase * 0.4).sin(),
                    0.270_15 + 0.12 * (self.phase * 0.52).cos(),
                ),
            },
            PresetKind::SpongeOrbit => {
                let angle = self.phase * SPONGE_ORBIT_RATE;
                PresetTargets {
                    mode: FractalMode::MengerSponge,
                    zoom: 1.4 + 0.3 * (self.phase * 0.3).sin(),
                    pan: Vec2::new(angle.cos(), angle.sin()) * 0.4,
                    julia_c: Vec2::from(JULIA_C_DEFAULT),
                }
            }
        }
    }
}
