// Angle sweep, velocity bracket and bisection.

use archer_core::LaunchConfig;
use archer_trajectory::simulate;
use serde::{Deserialize, Serialize};

use crate::frame::launcher_frame;
use crate::{LaunchSolution, TargetDirection, TargetSpec, VehicleMotion};

/// How far the angle sweep goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Stop at the first accepted angle that is not faster than the best so far.
    #[default]
    EarlyExit,
    /// Evaluate every angle in range; used to validate `EarlyExit`.
    FullSweep,
}

/// Minimal clearing speed found at one angle, re-simulated for acceptance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub angle_deg: f64,
    pub speed_ms: f64,
    pub height_m: f64,
    pub time_s: f64,
}

/// What happened at one candidate angle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AngleOutcome {
    /// Even without drag no speed reaches the target at this pitch.
    NoGeometricSolution,
    /// No speed in the coarse try budget cleared the target height.
    NoBracketFound { estimate_ms: f64 },
    /// Bisection converged but the crossing height is outside the hit tolerance.
    ToleranceMiss { speed_ms: f64, height_m: Option<f64> },
    Accepted(Candidate),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleReport {
    pub angle_deg: f64,
    pub outcome: AngleOutcome,
}

/// Drag-free launch speed reaching `(distance_m, height_m)` at `angle_deg`.
///
/// `None` when `distance * tan(angle) <= height` (or the angle is vertical),
/// i.e. the pitch cannot reach the point even in vacuum.
pub fn estimate_initial_speed(angle_deg: f64, distance_m: f64, height_m: f64, gravity_ms2: f64) -> Option<f64> {
    let a = angle_deg.to_radians();
    let (cos_a, tan_a) = (a.cos(), a.tan());
    let denominator = 2.0 * cos_a * cos_a * (distance_m * tan_a - height_m);
    (denominator > 0.0).then(|| (gravity_ms2 * distance_m * distance_m / denominator).sqrt())
}

/// Run the bracket + bisection search at a single pitch.
pub fn evaluate_angle(angle_deg: f64, target: &TargetSpec, config: &LaunchConfig) -> AngleOutcome {
    let distance = target.distance_m;
    let Some(estimate) = estimate_initial_speed(angle_deg, distance, target.height_m, config.gravity_ms2) else {
        return AngleOutcome::NoGeometricSolution;
    };

    let clears = |speed: f64| {
        simulate(angle_deg, speed, distance, config, false).is_some_and(|f| f.height_m > target.height_m)
    };

    // Coarse scan upward from the estimate.
    let step = config.velocity_step_ms;
    let Some((mut low, mut high)) = (0..config.max_velocity_tries)
        .map(|i| estimate + f64::from(i) * step)
        .find(|&speed| clears(speed))
        .map(|speed| ((speed - step).max(estimate), speed))
    else {
        return AngleOutcome::NoBracketFound { estimate_ms: estimate };
    };

    for _ in 0..config.bisection_iterations {
        let mid = 0.5 * (low + high);
        if mid <= 0.0 {
            break;
        }
        if clears(mid) {
            high = mid;
        } else {
            low = mid;
        }
    }

    match simulate(angle_deg, high, distance, config, false) {
        Some(f) if (f.height_m - target.height_m).abs() <= config.hit_tolerance_m => {
            AngleOutcome::Accepted(Candidate {
                angle_deg,
                speed_ms: high,
                height_m: f.height_m,
                time_s: f.time_s,
            })
        }
        f => AngleOutcome::ToleranceMiss { speed_ms: high, height_m: f.map(|f| f.height_m) },
    }
}

/// Outcome at every angle of the configured sweep, no early exit.
pub fn sweep_angles(target: &TargetSpec, config: &LaunchConfig) -> Vec<AngleReport> {
    if !(target.distance_m > 0.0) || config.validate().is_err() {
        return Vec::new();
    }
    (0..config.angle_count())
        .map(|i| {
            let angle_deg = config.angle_at(i);
            AngleReport { angle_deg, outcome: evaluate_angle(angle_deg, target, config) }
        })
        .collect()
}

/// Slowest launcher command that hits `target`, or `None` when out of range.
pub fn solve(
    target: &TargetSpec,
    vehicle: &VehicleMotion,
    direction: &TargetDirection,
    config: &LaunchConfig,
) -> Option<LaunchSolution> {
    solve_with_mode(target, vehicle, direction, config, SearchMode::EarlyExit)
}

pub fn solve_with_mode(
    target: &TargetSpec,
    vehicle: &VehicleMotion,
    direction: &TargetDirection,
    config: &LaunchConfig,
    mode: SearchMode,
) -> Option<LaunchSolution> {
    if !(target.distance_m > 0.0) || config.validate().is_err() {
        return None;
    }

    let mut best: Option<LaunchSolution> = None;
    for i in 0..config.angle_count() {
        let angle_deg = config.angle_at(i);
        let AngleOutcome::Accepted(c) = evaluate_angle(angle_deg, target, config) else {
            continue;
        };

        let cmd = launcher_frame(c.speed_ms, c.angle_deg, *direction, *vehicle);
        let solution = LaunchSolution {
            launcher_velocity: cmd.velocity,
            launcher_angle_deg: cmd.angle_deg,
            aim_azimuth_deg: cmd.aim_azimuth_deg,
            time_of_flight_s: c.time_s,
            projectile_total_velocity: c.speed_ms,
            projectile_vertical_angle_deg: c.angle_deg,
        };

        match best {
            Some(b) if solution.launcher_velocity >= b.launcher_velocity => {
                if mode == SearchMode::EarlyExit {
                    break;
                }
            }
            _ => best = Some(solution),
        }
    }
    best
}
