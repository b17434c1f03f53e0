//! Core launcher math utilities
//!
//! Includes:
//! - Units & conversions (metric/imperial, angles)
//! - The launch configuration record shared by every solver call
//! - Competition field geometry (distance & bearing to the alliance target)
//! - Friction-wheel motor RPM estimate

pub mod config;
pub mod field;
pub mod motor;

pub use config::{ConfigError, LaunchConfig, MotorConfig};
pub use field::{Alliance, Bearing, Field};
pub use motor::estimate_rpm;

/// -------------------------
/// Units & Conversions
/// -------------------------

/// Exact inch → metre factor.
pub const INCHES_TO_METERS: f64 = 0.0254;

pub fn in_to_m(inches: f64) -> f64 { inches * INCHES_TO_METERS }

pub fn rad_per_s_to_rpm(w: f64) -> f64 { w * 60.0 / (2.0 * std::f64::consts::PI) }

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_deg(deg: f64) -> f64 {
    let mut a = deg % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}
