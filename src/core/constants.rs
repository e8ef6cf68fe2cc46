// Shared simulation tuning constants used by the kernel, the gesture
// pipeline and the control smoother. Kept in one place so thresholds and
// rates stay out of the code paths that apply them.

// ---------------- Particle field ----------------

// Number of particles in the field; fixed at initialization.
pub const PARTICLE_COUNT: usize = 20_000;
// Half-extent of the cube particle seeds are sampled from.
pub const FIELD_RADIUS: f32 = 1.6;
// Sprite size range (world units).
pub const PARTICLE_SIZE_MIN: f32 = 0.006;
pub const PARTICLE_SIZE_MAX: f32 = 0.022;
// Parking position for particles hidden by the interior heuristic.
pub const OFFSCREEN_Z: f32 = 1.0e4;

// ---------------- Fractal kernel ----------------

// Floor for divisions and normalizations.
pub const EPSILON: f32 = 1e-6;

// Continuous mode scalar spans seven fractal families.
pub const MODE_COUNT: usize = 7;

// Mandelbulb distance estimator
pub const BULB_ITERATIONS: u32 = 8;
pub const BULB_ESCAPE_RADIUS: f32 = 2.0;
// Angular drift applied to phi per second of elapsed time (radians/sec).
pub const BULB_DRIFT_RATE: f32 = 0.12;
pub const POWER_MIN: f32 = 2.0;
pub const POWER_MAX: f32 = 16.0;
pub const POWER_DEFAULT: f32 = 8.0;

// Menger sponge / Sierpinski fold counts
pub const MENGER_ITERATIONS: u32 = 4;
pub const SIERPINSKI_ITERATIONS: u32 = 8;

// Projection steps walking a seed toward the estimated surface.
pub const DE_PROJECT_STEPS: u32 = 4;

// Escape-time iteration cap: configurable range plus a hard internal bound
// on per-particle cost regardless of configuration.
pub const ITER_CAP_MIN: u32 = 10;
pub const ITER_CAP_MAX: u32 = 500;
pub const ITER_CAP_DEFAULT: u32 = 64;
pub const ITER_CAP_HARD: u32 = 512;

// Points below this normalized pseudo-depth are inside the set; they are
// parked off-screen instead of rendered.
pub const DEPTH_HIDE_THRESHOLD: f32 = 0.05;

// Scale from seed space to the complex plane at zoom 1.
pub const PLANE_SCALE: f32 = 1.25;
// Vertical relief applied to escape-time depth.
pub const DEPTH_RELIEF: f32 = 1.2;

// Default Julia constant when no preset is driving it.
pub const JULIA_C_DEFAULT: [f32; 2] = [-0.7, 0.270_15];

// Palette
pub const PALETTE_COUNT: usize = 5;
// Palette scroll rate versus elapsed time (cycles/sec).
pub const PALETTE_DRIFT_RATE: f32 = 0.02;

// ---------------- Interaction displacements ----------------

pub const CHAOS_AMPLITUDE: f32 = 0.35;
pub const EXPLOSION_AMPLITUDE: f32 = 1.1;
pub const SNAP_AMPLITUDE: f32 = 0.45;
pub const SNAP_WAVE_FREQ: f32 = 6.0; // radians per world unit
pub const SNAP_WAVE_SPEED: f32 = 5.0; // radians per second
pub const ATTRACT_RADIUS: f32 = 0.8;
pub const ATTRACT_GAIN: f32 = 0.55;
pub const REPEL_RADIUS: f32 = 1.2;
pub const REPEL_GAIN: f32 = 0.7;
// Pinch shrinks the cloud down to this fraction at full strength.
pub const PINCH_SCALE_MIN: f32 = 0.55;

// ---------------- Gesture thresholds (normalized landmark space) --------

pub const PINCH_DIST: f32 = 0.05;
pub const FIST_MEAN_EXTENSION: f32 = 0.25;
pub const PALM_MEAN_EXTENSION: f32 = 0.4;
pub const VICTORY_EXTENDED: f32 = 0.4;
pub const VICTORY_CURLED: f32 = 0.3;
pub const SNAP_DIST: f32 = 0.04;
pub const SNAP_INDEX_EXTENDED: f32 = 0.4;
pub const PUNCH_DEPTH_DELTA: f32 = 0.1;
pub const CLAP_WRIST_DIST: f32 = 0.11;
pub const SMASH_WRIST_DIST: f32 = 0.15;
pub const WAVE_WINDOW: usize = 20;
pub const WAVE_RANGE: f32 = 0.25;
// Per-callback blend factor for the smoothed fingertip position.
pub const POINTER_BLEND_ALPHA: f32 = 0.5;

// ---------------- Control smoothing ----------------

// Exponential smoothing rates (1/sec). Larger converges faster.
pub const RATE_MODE: f32 = 5.5;
pub const RATE_ZOOM: f32 = 9.0;
pub const RATE_PAN: f32 = 9.0;
pub const RATE_FORCE: f32 = 9.0;
pub const RATE_JULIA: f32 = 2.5;
// Snap ripple intensity decays toward zero at this rate.
pub const RATE_SNAP_DECAY: f32 = 3.0;

// Frame dt is clamped to absorb stalls without a convergence jump.
pub const MAX_FRAME_DT: f32 = 0.1;

// ---------------- Discrete action cooldowns (seconds) ----------------

pub const CLAP_COOLDOWN: f32 = 0.8;
pub const SNAP_COOLDOWN: f32 = 0.45;

// ---------------- Navigation ----------------

pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 40.0;
pub const ZOOM_DEFAULT: f32 = 1.0;
pub const PAN_LIMIT: f32 = 4.0;

// Orbit sub-mode: fist drag and pinch zoom mapping.
pub const ORBIT_PAN_GAIN: f32 = 2.2;
pub const PINCH_ZOOM_GAIN: f32 = 3.0;
// Fly sub-mode: palm steering and fist throttle.
pub const FLY_STEER_GAIN: f32 = 1.6;
pub const FLY_ZOOM_RATE: f32 = 0.9; // exponential zoom per second while throttling

// ---------------- Force tiers ----------------

pub const ATTRACT_TIER_STRONG: f32 = 1.0;
pub const ATTRACT_TIER_SOFT: f32 = 0.5;
pub const REPEL_TIER_STRONG: f32 = 2.0;
pub const REPEL_TIER_SOFT: f32 = 0.6;

// ---------------- Animation presets ----------------

pub const DIVE_ZOOM_START: f32 = 0.8;
pub const DIVE_ZOOM_RATE: f32 = 0.35; // exponent per second
pub const DIVE_ZOOM_WRAP: f32 = 32.0; // loop the dive past this zoom
pub const DIVE_PAN: [f32; 2] = [-0.745, 0.113];
pub const SPONGE_ORBIT_RATE: f32 = 0.25; // radians per second
