// Pure simulation core, shared by the web shell and host-side tests.

pub mod constants;
pub mod controls;
pub mod fractal;
pub mod gesture;
pub mod nav;
pub mod params;
pub mod particles;
pub mod presets;

pub use constants::*;
pub use controls::{ControlState, Cooldowns, InteractionMode, Smoothed, SmoothedVec2};
pub use gesture::{GestureClassifier, GestureState, HandFrame, SharedGestures};
pub use nav::NavigationState;
pub use params::{ControlParameters, FractalMode};
pub use particles::ParticleField;
pub use presets::{PresetKind, PresetState, PresetTargets};

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
