//! archer-trajectory
//!
//! Point-mass trajectory integrator for the launcher solver.
//! - 2-D state (x downrange, y up), launch point at the origin.
//! - Gravity plus constant-coefficient quadratic drag (`archer-models`).
//! - Fixed-step semi-implicit Euler: velocity first, then position with the new velocity.
//! - Stops as soon as x reaches the target range and linearly interpolates the exact
//!   crossing height/time between the last two samples.
//!
//! A run that can never reach the range is a MISS (`None`):
//! - horizontal velocity is no longer positive while still short of the range,
//! - the projectile is below launch height and still falling,
//! - the speed is exactly zero (drag direction undefined),
//! - the flight exceeds `max_flight_time_s`.
//!
//! Angles are degrees at the interface, radians inside.

use archer_core::LaunchConfig;
use archer_models::QuadraticDrag;

/// One `(x, y)` point of a sampled path [m].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
}

/// Integrator sample: time and position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Successful run: the projectile crossed `x = distance`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flight {
    /// Interpolated height at the target range [m].
    pub height_m: f64,
    /// Interpolated time at the target range [s].
    pub time_s: f64,
    /// Last sample before and first sample at/after the range.
    pub bracket: [Sample; 2],
    /// Sampled path from the origin, last point pinned to `(distance, height_m)`.
    /// Only filled when requested.
    pub path: Option<Vec<PathPoint>>,
}

impl Flight {
    /// Path points, empty when the path was not requested.
    pub fn points(&self) -> &[PathPoint] {
        self.path.as_deref().unwrap_or(&[])
    }
}

/// Drag model described by `config`.
pub fn drag_model(config: &LaunchConfig) -> QuadraticDrag {
    QuadraticDrag::new(
        config.air_density_kg_m3,
        config.drag_coefficient,
        config.cross_sectional_area_m2,
    )
}

/// Fly a projectile launched at `angle_deg` above horizontal with `speed_ms` and
/// report where it crosses the horizontal range `distance_m`.
///
/// Returns `None` on a MISS. When `want_path` is set the returned flight carries
/// every integration sample.
pub fn simulate(
    angle_deg: f64,
    speed_ms: f64,
    distance_m: f64,
    config: &LaunchConfig,
    want_path: bool,
) -> Option<Flight> {
    let dt = config.time_step_s;
    if !(distance_m > 0.0 && dt > 0.0 && speed_ms.is_finite() && angle_deg.is_finite()) {
        return None;
    }

    let drag = drag_model(config);
    let theta = angle_deg.to_radians();
    let mut s = State {
        t: 0.0,
        x: 0.0,
        y: 0.0,
        vx: speed_ms * theta.cos(),
        vy: speed_ms * theta.sin(),
    };
    let mut path = want_path.then(|| vec![PathPoint::ORIGIN]);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_steps = (config.max_flight_time_s / dt).ceil() as usize;

    for _ in 0..max_steps {
        if s.cannot_reach(distance_m) {
            return None;
        }
        let prev = s;

        let (ax, ay) = drag.acceleration(s.vx, s.vy, config.mass_kg, config.gravity_ms2)?;
        s.vx += ax * dt;
        s.vy += ay * dt;
        s.x += s.vx * dt;
        s.y += s.vy * dt;
        s.t += dt;

        if let Some(p) = path.as_mut() {
            p.push(PathPoint { x: s.x, y: s.y });
        }

        if s.x >= distance_m {
            let (height_m, time_s) = interpolate_crossing(&prev, &s, distance_m);
            if let Some(last) = path.as_mut().and_then(|p| p.last_mut()) {
                *last = PathPoint { x: distance_m, y: height_m };
            }
            return Some(Flight {
                height_m,
                time_s,
                bracket: [prev.sample(), s.sample()],
                path,
            });
        }
    }
    None
}

/* ------------------------------- internals ------------------------------- */

#[derive(Clone, Copy, Debug)]
struct State {
    t: f64,          // time (s)
    x: f64, y: f64,  // position (m)
    vx: f64, vy: f64, // velocity (m/s)
}

impl State {
    // Miss checks, evaluated before every step.
    fn cannot_reach(&self, distance_m: f64) -> bool {
        (self.vx <= 0.0 && self.x < distance_m) || (self.y < 0.0 && self.vy < 0.0)
    }

    fn sample(&self) -> Sample {
        Sample { t: self.t, x: self.x, y: self.y }
    }
}

// Height & time at x = r on the segment a -> b.
fn interpolate_crossing(a: &State, b: &State, r: f64) -> (f64, f64) {
    let dx = b.x - a.x;
    if dx == 0.0 {
        return (b.y, b.t);
    }
    let u = (r - a.x) / dx;
    (a.y + (b.y - a.y) * u, a.t + (b.t - a.t) * u)
}

/* ----------------------------------- tests ---------------------------------- */
