//! Projectile frame -> launcher frame.
//!
//! The projectile leaves with the launcher's exit velocity plus the vehicle's
//! ground velocity. To get a given world-frame projectile velocity the launcher
//! must impart that velocity minus the vehicle velocity. Only the horizontal
//! part changes; the vehicle is assumed to move on flat ground at constant
//! velocity for the whole flight.

use archer_core::wrap_deg;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{TargetDirection, VehicleMotion};

/// What the launcher mechanism must do.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LauncherCommand {
    pub velocity: f64,        // m/s
    pub angle_deg: f64,       // pitch above horizontal
    pub aim_azimuth_deg: f64, // world frame, (-180, 180]
}

/// Launcher command producing a projectile with world-frame `speed_ms` at pitch
/// `angle_deg`, headed along `direction`, from a vehicle moving with `vehicle`.
pub fn launcher_frame(
    speed_ms: f64,
    angle_deg: f64,
    direction: TargetDirection,
    vehicle: VehicleMotion,
) -> LauncherCommand {
    let pitch = angle_deg.to_radians();
    let horizontal = speed_ms * pitch.cos();
    let vertical = speed_ms * pitch.sin();

    let az = direction.azimuth_deg.to_radians();
    let projectile_h = Vector2::new(horizontal * az.cos(), horizontal * az.sin());
    let launcher_h = projectile_h - vehicle.velocity();
    let launcher_h_mag = launcher_h.norm();

    LauncherCommand {
        velocity: launcher_h_mag.hypot(vertical),
        angle_deg: vertical.atan2(launcher_h_mag).to_degrees(),
        aim_azimuth_deg: wrap_deg(launcher_h.y.atan2(launcher_h.x).to_degrees()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn stationary_vehicle_is_identity() {
        let cmd = launcher_frame(8.0, 62.0, TargetDirection::new(-35.0), VehicleMotion::stationary());
        assert_abs_diff_eq!(cmd.velocity, 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cmd.angle_deg, 62.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cmd.aim_azimuth_deg, -35.0, epsilon = 1e-9);
    }

    #[test]
    fn driving_toward_target_needs_less_speed_and_steeper_pitch() {
        let dir = TargetDirection::new(0.0);
        let toward = VehicleMotion { speed_ms: 1.0, heading_deg: 0.0 };
        let cmd = launcher_frame(8.0, 60.0, dir, toward);
        // horizontal: 4.0 - 1.0 = 3.0; vertical unchanged
        let vertical = 8.0 * 60.0_f64.to_radians().sin();
        assert_abs_diff_eq!(cmd.velocity, 3.0_f64.hypot(vertical), epsilon = 1e-9);
        assert!(cmd.angle_deg > 60.0);
        assert_abs_diff_eq!(cmd.aim_azimuth_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn crosswise_drift_is_aimed_off() {
        // Target along +x, vehicle sliding toward +y: aim must lean toward -y.
        let cmd = launcher_frame(
            6.0,
            55.0,
            TargetDirection::new(0.0),
            VehicleMotion { speed_ms: 1.5, heading_deg: 90.0 },
        );
        let h = 6.0 * 55.0_f64.to_radians().cos();
        assert_abs_diff_eq!(cmd.aim_azimuth_deg, (-1.5_f64).atan2(h).to_degrees(), epsilon = 1e-9);
        assert!(cmd.aim_azimuth_deg < 0.0);
        assert!(cmd.velocity > 6.0);
    }

    #[test]
    fn outrun_projectile_aims_backward_at_plus_180() {
        // Vehicle faster than the projectile's horizontal speed along the
        // bearing; atan2(-0.0, x < 0) alone would give -180.
        let cmd = launcher_frame(
            6.0,
            60.0,
            TargetDirection::new(-0.0),
            VehicleMotion { speed_ms: 10.0, heading_deg: 0.0 },
        );
        assert_eq!(cmd.aim_azimuth_deg, 180.0);
        assert!(cmd.aim_azimuth_deg > -180.0 && cmd.aim_azimuth_deg <= 180.0);
    }

    #[test]
    fn vertical_component_is_unchanged() {
        let vehicle = VehicleMotion { speed_ms: 2.0, heading_deg: 135.0 };
        let cmd = launcher_frame(7.5, 70.0, TargetDirection::new(20.0), vehicle);
        let v_before = 7.5 * 70.0_f64.to_radians().sin();
        let v_after = cmd.velocity * cmd.angle_deg.to_radians().sin();
        assert_abs_diff_eq!(v_before, v_after, epsilon = 1e-9);
    }
}
