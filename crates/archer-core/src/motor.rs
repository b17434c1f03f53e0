//! Friction-wheel launcher RPM estimate.

use crate::{rad_per_s_to_rpm, MotorConfig};

/// Wheel RPM needed for a launcher exit speed [m/s].
///
/// The no-slip surface speed gives the theoretical RPM; the loss factor adds the
/// percentage lost to slip and projectile compression. Non-positive speeds map to 0.
pub fn estimate_rpm(velocity_ms: f64, motor: &MotorConfig) -> f64 {
    if velocity_ms <= 0.0 {
        return 0.0;
    }
    let radius = 0.5 * motor.friction_wheel_diameter_m;
    let theoretical = rad_per_s_to_rpm(velocity_ms / radius);
    theoretical * (1.0 + motor.rpm_loss_factor_percent / 100.0)
}
