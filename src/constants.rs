/// Front-end tuning constants: camera, DOM wiring and input sensitivities.
// Camera distance from the field origin.
pub const CAMERA_Z: f32 = 3.5;

// Canvas element the renderer attaches to.
pub const CANVAS_ID: &str = "field-canvas";

// Hand-tracking poll interval (ms). The tracker runs slower and jitterier
// than the display; the shared gesture cell absorbs the rate mismatch.
pub const TRACKER_INTERVAL_MS: i32 = 33;

// Pointer navigation mapping
pub const DRAG_PAN_GAIN: f32 = 1.6; // pan units per canvas height dragged
pub const WHEEL_ZOOM_STEP: f32 = 0.0012; // exponent per wheel delta unit

// Deterministic base seed for the particle field.
pub const FIELD_SEED: u64 = 42;
