//! archer-solver
//!
//! Finds the launcher command (pitch, azimuth, exit speed) that puts a dragged
//! projectile through the target height at the target range, for a launcher
//! riding on a moving vehicle.
//!
//! Per candidate pitch, swept from `min_angle_deg` to `max_angle_deg`:
//!   1. drag-free closed form gives a starting speed (skip the angle if none exists),
//!   2. step the speed up until the crossing height clears the target,
//!   3. bisect between the last failing and first clearing speed,
//!   4. accept only if the re-simulated height is within `hit_tolerance_m`,
//!   5. subtract the vehicle velocity to get the launcher-frame command.
//!
//! The sweep keeps the slowest launcher-frame command and, in the default
//! [`SearchMode::EarlyExit`], stops at the first accepted angle that is no
//! faster than the best so far (launcher speed is unimodal in pitch over the
//! supported range). [`SearchMode::FullSweep`] evaluates every angle.
//!
//! `worker` runs solves off the caller's thread with a single-slot request
//! channel and a result channel.

mod frame;
mod search;
pub mod worker;

pub use frame::{launcher_frame, LauncherCommand};
pub use search::{
    estimate_initial_speed, evaluate_angle, solve, solve_with_mode, sweep_angles, AngleOutcome,
    AngleReport, Candidate, SearchMode,
};

use archer_core::LaunchConfig;
use archer_trajectory::{simulate, Flight};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Horizontal range and height of the target, relative to the launch point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub distance_m: f64,
    pub height_m: f64,
}

impl TargetSpec {
    /// Target at `distance_m`, at the configured (fixed) target height.
    pub fn new(distance_m: f64, config: &LaunchConfig) -> Self {
        Self { distance_m, height_m: config.target_height_m }
    }
}

/// Ground velocity of the vehicle carrying the launcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleMotion {
    pub speed_ms: f64,
    pub heading_deg: f64, // world frame
}

impl VehicleMotion {
    pub fn stationary() -> Self {
        Self::default()
    }

    /// World-frame velocity vector [m/s].
    pub fn velocity(&self) -> Vector2<f64> {
        let h = self.heading_deg.to_radians();
        Vector2::new(self.speed_ms * h.cos(), self.speed_ms * h.sin())
    }
}

/// World-frame bearing from the vehicle to the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetDirection {
    pub azimuth_deg: f64,
}

impl TargetDirection {
    pub fn new(azimuth_deg: f64) -> Self {
        Self { azimuth_deg }
    }
}

/// The best command found by [`solve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchSolution {
    /// Launcher-frame exit speed [m/s].
    pub launcher_velocity: f64,
    /// Launcher-frame pitch above horizontal [deg].
    pub launcher_angle_deg: f64,
    /// Horizontal aim direction of the launcher, world frame [deg], in (-180, 180].
    pub aim_azimuth_deg: f64,
    pub time_of_flight_s: f64,
    /// World-frame projectile speed right after launch [m/s].
    pub projectile_total_velocity: f64,
    /// World-frame projectile pitch right after launch [deg].
    pub projectile_vertical_angle_deg: f64,
}

impl LaunchSolution {
    /// Re-fly the projectile-frame launch to get a displayable path.
    pub fn regenerate_path(&self, distance_m: f64, config: &LaunchConfig) -> Option<Flight> {
        simulate(
            self.projectile_vertical_angle_deg,
            self.projectile_total_velocity,
            distance_m,
            config,
            true,
        )
    }

    /// Friction-wheel RPM for the launcher exit speed.
    pub fn motor_rpm(&self, config: &LaunchConfig) -> f64 {
        archer_core::estimate_rpm(self.launcher_velocity, &config.motor)
    }
}
