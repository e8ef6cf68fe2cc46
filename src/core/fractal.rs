// Fractal evaluation kernel: a pure function of (particle seed, parameters)
// -> (render position, color). No dependency on other particles or prior
// frames, so the per-particle sweep is trivially parallel.

use crate::core::constants::*;
use crate::core::params::{ControlParameters, FractalMode};
use glam::{Vec2, Vec3, Vec4};

/// Result of one escape-time iteration run.
#[derive(Clone, Copy, Debug)]
pub struct Escape {
    pub iterations: u32,
    pub magnitude_sq: f32,
    pub escaped: bool,
}

/// Evaluate one particle against the current parameter set.
///
/// `seed` is the particle's immutable home position, `jitter` its random
/// triplet in [0, 1). Output is always finite for any `mode_blend` in
/// [0, 6], any configured iteration cap and any power in range; degenerate
/// inputs clamp rather than error.
pub fn evaluate(seed: Vec3, jitter: Vec3, p: &ControlParameters) -> (Vec3, Vec4) {
    let (mut pos, t, alpha) = match p.mode {
        FractalMode::Mandelbulb => project_mandelbulb(seed, p),
        FractalMode::MengerSponge => project_menger(seed, p),
        FractalMode::Sierpinski => project_sierpinski(seed, p),
        _ => escape_time_position(seed, p),
    };
    if p.interactive {
        pos = displace(pos, jitter, p);
    }
    let rgb = palette(t, p.palette);
    (pos, Vec4::from((rgb, alpha)))
}

// ---------------- 3-D distance-estimated branch ----------------

/// Walk a seed a few steps toward the estimated surface along its own
/// direction from the origin, returning (position, color scalar, alpha).
fn project_toward_surface(
    seed: Vec3,
    color_phase: f32,
    de: impl Fn(Vec3) -> f32,
) -> (Vec3, f32, f32) {
    let dir = safe_normalize(seed);
    let mut pt = seed;
    for _ in 0..DE_PROJECT_STEPS {
        let d = de(pt).clamp(-FIELD_RADIUS, FIELD_RADIUS);
        pt -= dir * d;
        if !pt.is_finite() {
            pt = seed;
            break;
        }
    }
    let t = pt.length() / (FIELD_RADIUS * 2.0) + color_phase;
    (pt, t, 0.85)
}

fn project_mandelbulb(seed: Vec3, p: &ControlParameters) -> (Vec3, f32, f32) {
    let power = p.power.clamp(POWER_MIN, POWER_MAX);
    let drift = p.time * BULB_DRIFT_RATE;
    project_toward_surface(seed, p.time * PALETTE_DRIFT_RATE, |pt| {
        mandelbulb_de(pt, power, drift)
    })
}

fn project_menger(seed: Vec3, p: &ControlParameters) -> (Vec3, f32, f32) {
    project_toward_surface(seed, p.time * PALETTE_DRIFT_RATE, menger_de)
}

fn project_sierpinski(seed: Vec3, p: &ControlParameters) -> (Vec3, f32, f32) {
    project_toward_surface(seed, p.time * PALETTE_DRIFT_RATE, sierpinski_de)
}

/// Mandelbulb distance estimate via power-N spherical-coordinate folding.
/// `drift` rotates phi continuously with elapsed time.
pub fn mandelbulb_de(pos: Vec3, power: f32, drift: f32) -> f32 {
    let mut z = pos;
    let mut dr = 1.0_f32;
    let mut r = z.length();
    for _ in 0..BULB_ITERATIONS {
        r = z.length();
        if r > BULB_ESCAPE_RADIUS {
            break;
        }
        let r = r.max(EPSILON);
        let theta = (z.z / r).clamp(-1.0, 1.0).acos();
        let phi = z.y.atan2(z.x) + drift;
        dr = r.powf(power - 1.0) * power * dr + 1.0;
        let zr = r.powf(power);
        let theta = theta * power;
        let phi = phi * power;
        z = zr
            * Vec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            )
            + pos;
    }
    0.5 * r.max(EPSILON).ln() * r / dr.max(EPSILON)
}

/// Menger sponge distance estimate: fixed folds over a cubic domain.
pub fn menger_de(pos: Vec3) -> f32 {
    let s = pos + Vec3::splat(0.5);
    let xx = (s.x - 0.5).abs() - 0.5;
    let yy = (s.y - 0.5).abs() - 0.5;
    let zz = (s.z - 0.5).abs() - 0.5;
    let mut d = xx.max(yy.max(zz));
    let mut p = 1.0_f32;
    for _ in 0..MENGER_ITERATIONS {
        p *= 3.0;
        let xa = (s.x * p).rem_euclid(3.0);
        let ya = (s.y * p).rem_euclid(3.0);
        let za = (s.z * p).rem_euclid(3.0);
        let xx = 0.5 - (xa - 1.5).abs();
        let yy = 0.5 - (ya - 1.5).abs();
        let zz = 0.5 - (za - 1.5).abs();
        let hole = xx.max(zz).min(xx.max(yy).min(yy.max(zz))) / p;
        d = d.max(hole);
    }
    d
}

/// Sierpinski tetrahedron distance estimate: nearest-vertex reflections.
pub fn sierpinski_de(pos: Vec3) -> f32 {
    const VERTICES: [Vec3; 4] = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
    ];
    let mut z = pos;
    let mut scale = 1.0_f32;
    for _ in 0..SIERPINSKI_ITERATIONS {
        let mut nearest = VERTICES[0];
        let mut best = (z - nearest).length_squared();
        for v in &VERTICES[1..] {
            let d = (z - *v).length_squared();
            if d < best {
                best = d;
                nearest = *v;
            }
        }
        z = z * 2.0 - nearest;
        scale *= 2.0;
    }
    (z.length() - 2.0) / scale.max(EPSILON)
}

// ---------------- 2-D escape-time branch ----------------

/// Iterate `z <- f(z) + c` until |z|^2 > 4 or the cap is reached.
///
/// The configured cap is bounded by ITER_CAP_HARD regardless of caller
/// configuration so worst-case per-particle cost stays bounded.
pub fn escape_iterations(z0: Vec2, c: Vec2, mode: FractalMode, cap: u32) -> Escape {
    let cap = cap.min(ITER_CAP_HARD);
    let mut z = z0;
    for i in 0..cap {
        let mag2 = z.length_squared();
        if mag2 > 4.0 {
            return Escape {
                iterations: i,
                magnitude_sq: mag2,
                escaped: true,
            };
        }
        z = match mode {
            FractalMode::Tricorn => {
                // conjugate, then square
                let zc = Vec2::new(z.x, -z.y);
                Vec2::new(zc.x * zc.x - zc.y * zc.y, 2.0 * zc.x * zc.y)
            }
            FractalMode::BurningShip => {
                let za = z.abs();
                Vec2::new(za.x * za.x - za.y * za.y, 2.0 * za.x * za.y)
            }
            // Mandelbrot and Julia share the plain complex square.
            _ => Vec2::new(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y),
        } + c;
    }
    Escape {
        iterations: cap,
        magnitude_sq: z.length_squared(),
        escaped: false,
    }
}

/// Smoothed fractional iteration count, removing integer banding.
pub fn smoothed_count(esc: &Escape) -> f32 {
    if !esc.escaped {
        return esc.iterations as f32;
    }
    // Bound the magnitude before the double log so an overflowing orbit
    // cannot drive the count to -inf.
    let mag2 = esc.magnitude_sq.clamp(4.0 + EPSILON, 1.0e20);
    esc.iterations as f32 - mag2.log2().log2() + 4.0
}

fn escape_time_position(seed: Vec3, p: &ControlParameters) -> (Vec3, f32, f32) {
    let zoom = p.zoom.max(EPSILON);
    let plane = p.pan + seed.truncate() * (PLANE_SCALE / zoom);
    let (z0, c) = if p.mode == FractalMode::Julia {
        (plane, p.julia_c)
    } else {
        (Vec2::ZERO, plane)
    };
    let cap = p.iteration_cap.clamp(ITER_CAP_MIN, ITER_CAP_MAX);
    let esc = escape_iterations(z0, c, p.mode, cap);
    // Fraction of the cap spent before escaping; 1 for interior points.
    let boundary = (smoothed_count(&esc) / cap as f32).clamp(0.0, 1.0);
    let depth = 1.0 - boundary;
    if depth < DEPTH_HIDE_THRESHOLD {
        // Inside the set (or nearly): park the particle behind the camera
        // instead of branching in the shader.
        return (Vec3::new(0.0, 0.0, OFFSCREEN_Z), 0.0, 0.0);
    }
    let pos = Vec3::new(seed.x, seed.y, (boundary - 0.5) * DEPTH_RELIEF);
    let t = boundary + p.time * PALETTE_DRIFT_RATE;
    (pos, t, 0.35 + 0.65 * boundary)
}

// ---------------- Color ----------------

// Three gradient stops plus a gamma exponent per palette.
const PALETTES: [([f32; 3], [f32; 3], [f32; 3], f32); PALETTE_COUNT] = [
    // ember
    ([0.02, 0.01, 0.05], [0.85, 0.25, 0.10], [1.0, 0.9, 0.55], 0.9),
    // lagoon
    ([0.01, 0.05, 0.10], [0.10, 0.55, 0.75], [0.75, 1.0, 0.95], 1.1),
    // orchid
    ([0.05, 0.01, 0.08], [0.60, 0.20, 0.80], [1.0, 0.80, 0.95], 1.0),
    // meadow
    ([0.02, 0.06, 0.02], [0.20, 0.70, 0.30], [0.95, 1.0, 0.70], 1.2),
    // glacier
    ([0.03, 0.03, 0.06], [0.45, 0.55, 0.90], [0.95, 0.98, 1.0], 0.8),
];

/// Map a scalar through a three-stop gradient with a palette-specific gamma.
/// Deterministic in (t, id); every channel lands in [0, 1] for any finite t.
pub fn palette(t: f32, id: u8) -> Vec3 {
    let (a, b, c, gamma) = PALETTES[id as usize % PALETTE_COUNT];
    let x = if t.is_finite() { t.rem_euclid(1.0) } else { 0.0 };
    let rgb = if x < 0.5 {
        lerp3(Vec3::from(a), Vec3::from(b), x * 2.0)
    } else {
        lerp3(Vec3::from(b), Vec3::from(c), (x - 0.5) * 2.0)
    };
    Vec3::new(
        rgb.x.powf(gamma),
        rgb.y.powf(gamma),
        rgb.z.powf(gamma),
    )
    .clamp(Vec3::ZERO, Vec3::ONE)
}

// ---------------- Interaction displacements ----------------

/// Apply the gesture-driven displacement pipeline in fixed order. Each step
/// reads the previous step's output.
pub fn displace(pos: Vec3, jitter: Vec3, p: &ControlParameters) -> Vec3 {
    let mut q = pos;
    // 1. chaos: periodic per-axis jitter
    if p.chaos > EPSILON {
        let tau = std::f32::consts::TAU;
        q += Vec3::new(
            (p.time * 3.1 + jitter.x * tau).sin(),
            (p.time * 2.7 + jitter.y * tau).sin(),
            (p.time * 3.7 + jitter.z * tau).sin(),
        ) * (p.chaos * CHAOS_AMPLITUDE);
    }
    // 2. explosion: radial, scaled by the per-particle random factor
    if p.explosion > EPSILON {
        q += safe_normalize(q) * (p.explosion * (0.4 + jitter.x) * EXPLOSION_AMPLITUDE);
    }
    // 3. snap: radial ripple wave
    if p.snap_wave > EPSILON {
        let r = q.length();
        let wave = (r * SNAP_WAVE_FREQ - p.time * SNAP_WAVE_SPEED).sin();
        q += safe_normalize(q) * (wave * p.snap_wave * SNAP_AMPLITUDE);
    }
    // 4. attraction toward the tracked hand, smoothstep falloff, capped radius
    if p.attract > EPSILON {
        let to_hand = p.attractor - q;
        let d = to_hand.length();
        let w = 1.0 - smoothstep(0.0, ATTRACT_RADIUS, d);
        q += to_hand / d.max(EPSILON) * (w * p.attract * ATTRACT_GAIN);
    }
    // 5. repulsion, same shape, larger radius
    if p.repel > EPSILON {
        let away = q - p.attractor;
        let d = away.length();
        let w = 1.0 - smoothstep(0.0, REPEL_RADIUS, d);
        q += safe_normalize(away) * (w * p.repel * REPEL_GAIN);
    }
    // 6. uniform pinch-driven scale
    q * p.pinch_scale.clamp(PINCH_SCALE_MIN, 1.5)
}

// ---------------- Helpers ----------------

#[inline]
fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0).max(EPSILON)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalize with an epsilon floor; degenerate vectors fall back to +X.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < EPSILON {
        Vec3::X
    } else {
        v / len
    }
}
