// End-to-end checks of the launch solver against the integrator: the default
// scenario, stationary-vehicle identities, path regeneration, and the two
// shape assumptions the search relies on (height monotonic in speed, launcher
// speed unimodal in pitch).

use approx::{assert_abs_diff_eq, assert_relative_eq};

use archer_core::{wrap_deg, LaunchConfig};
use archer_solver::{
    estimate_initial_speed, launcher_frame, solve, solve_with_mode, sweep_angles, AngleOutcome,
    SearchMode, TargetDirection, TargetSpec, VehicleMotion,
};
use archer_trajectory::simulate;

const DISTANCES: [f64; 7] = [0.6, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0];

#[test]
fn default_scenario_has_a_solution() {
    let cfg = LaunchConfig::default();
    let target = TargetSpec::new(3.0, &cfg);
    let sol = solve(&target, &VehicleMotion::stationary(), &TargetDirection::new(0.0), &cfg)
        .expect("3 m target is in range");

    assert!(sol.launcher_velocity > 0.0);
    // atan2 round-off can land a hair under the 55 deg grid point
    assert!(sol.launcher_angle_deg >= 55.0 - 1e-9 && sol.launcher_angle_deg <= 90.0 + 1e-9);
    assert!(sol.time_of_flight_s > 0.0);
    assert!(sol.motor_rpm(&cfg) > 0.0);
}

#[test]
fn stationary_vehicle_needs_no_compensation() {
    let cfg = LaunchConfig::default();
    for &(distance, azimuth) in &[(1.2, 30.0), (2.5, -45.0), (3.3, 170.0)] {
        let target = TargetSpec::new(distance, &cfg);
        let dir = TargetDirection::new(azimuth);
        let sol = solve(&target, &VehicleMotion::stationary(), &dir, &cfg).expect("in range");

        assert_abs_diff_eq!(sol.launcher_angle_deg, sol.projectile_vertical_angle_deg, epsilon = 1e-9);
        assert_abs_diff_eq!(sol.launcher_velocity, sol.projectile_total_velocity, epsilon = 1e-9);
        assert_abs_diff_eq!(wrap_deg(sol.aim_azimuth_deg - azimuth), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn solution_round_trips_through_the_integrator() {
    let cfg = LaunchConfig::default();
    let vehicle = VehicleMotion { speed_ms: 1.2, heading_deg: 75.0 };
    for &d in &DISTANCES {
        let target = TargetSpec::new(d, &cfg);
        let sol = solve(&target, &vehicle, &TargetDirection::new(20.0), &cfg).expect("in range");

        let flight = simulate(sol.projectile_vertical_angle_deg, sol.projectile_total_velocity, d, &cfg, false)
            .expect("solution must hit");
        assert!((flight.height_m - cfg.target_height_m).abs() <= cfg.hit_tolerance_m);
        assert_relative_eq!(flight.time_s, sol.time_of_flight_s);

        let path = sol.regenerate_path(d, &cfg).expect("display path");
        let last = path.points().last().copied().expect("non-empty path");
        assert_eq!(last.x, d);
        assert_eq!(last.y, flight.height_m);
    }
}

#[test]
fn early_exit_matches_full_sweep() {
    let cfg = LaunchConfig::default();
    let cases = [
        (VehicleMotion::stationary(), TargetDirection::new(0.0)),
        (VehicleMotion { speed_ms: 1.5, heading_deg: 90.0 }, TargetDirection::new(30.0)),
        (VehicleMotion { speed_ms: 2.0, heading_deg: 180.0 }, TargetDirection::new(45.0)),
    ];
    for &d in &DISTANCES {
        let target = TargetSpec::new(d, &cfg);
        for (vehicle, dir) in &cases {
            let fast = solve_with_mode(&target, vehicle, dir, &cfg, SearchMode::EarlyExit);
            let full = solve_with_mode(&target, vehicle, dir, &cfg, SearchMode::FullSweep);
            let (fast, full) = (fast.expect("early exit solution"), full.expect("full sweep solution"));
            assert_abs_diff_eq!(fast.launcher_velocity, full.launcher_velocity, epsilon = 0.02);
        }
    }
}

#[test]
fn required_speed_is_unimodal_in_pitch() {
    let cfg = LaunchConfig::default();
    for &d in &DISTANCES {
        let speeds: Vec<f64> = sweep_angles(&TargetSpec::new(d, &cfg), &cfg)
            .into_iter()
            .filter_map(|r| match r.outcome {
                AngleOutcome::Accepted(c) => Some(c.speed_ms),
                _ => None,
            })
            .collect();
        assert!(speeds.len() >= 5, "too few accepted angles at {d} m");

        assert!(is_unimodal(&speeds), "projectile speed not unimodal at {d} m: {speeds:?}");
    }
}

fn is_unimodal(speeds: &[f64]) -> bool {
    let valley = speeds
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i);
    speeds[..=valley].windows(2).all(|w| w[1] <= w[0] + 1e-6)
        && speeds[valley..].windows(2).all(|w| w[1] >= w[0] - 1e-6)
}

#[test]
fn launcher_speed_is_unimodal_in_pitch_on_a_moving_vehicle() {
    let cfg = LaunchConfig::default();
    let cases = [
        (VehicleMotion { speed_ms: 1.5, heading_deg: 90.0 }, TargetDirection::new(30.0)),
        (VehicleMotion { speed_ms: 2.0, heading_deg: 180.0 }, TargetDirection::new(45.0)),
        (VehicleMotion { speed_ms: 1.0, heading_deg: 0.0 }, TargetDirection::new(0.0)),
    ];
    for &d in &DISTANCES {
        let reports = sweep_angles(&TargetSpec::new(d, &cfg), &cfg);
        for (vehicle, dir) in &cases {
            let speeds: Vec<f64> = reports
                .iter()
                .filter_map(|r| match r.outcome {
                    AngleOutcome::Accepted(c) => {
                        Some(launcher_frame(c.speed_ms, c.angle_deg, *dir, *vehicle).velocity)
                    }
                    _ => None,
                })
                .collect();
            assert!(speeds.len() >= 5, "too few accepted angles at {d} m");
            assert!(is_unimodal(&speeds), "launcher speed not unimodal at {d} m for {vehicle:?}: {speeds:?}");
        }
    }
}

#[test]
fn aim_azimuth_stays_in_half_open_range() {
    let cfg = LaunchConfig::default();
    // Vehicle out-running the projectile along a bearing of -0.0 deg.
    let vehicle = VehicleMotion { speed_ms: 10.0, heading_deg: 0.0 };
    let sol = solve(&TargetSpec::new(1.0, &cfg), &vehicle, &TargetDirection::new(-0.0), &cfg).expect("in range");
    assert!(sol.aim_azimuth_deg > -180.0 && sol.aim_azimuth_deg <= 180.0, "{}", sol.aim_azimuth_deg);
    assert_eq!(sol.aim_azimuth_deg, 180.0);
}

#[test]
fn crossing_height_is_monotonic_in_speed() {
    let cfg = LaunchConfig::default();
    for angle in (55..90).step_by(5).map(f64::from) {
        for &d in &[0.8, 2.0, 3.5] {
            let Some(start) = estimate_initial_speed(angle, d, cfg.target_height_m, cfg.gravity_ms2) else {
                continue;
            };
            let heights: Vec<f64> = (0..100)
                .filter_map(|i| simulate(angle, start + 0.2 * f64::from(i), d, &cfg, false))
                .map(|f| f.height_m)
                .collect();
            assert!(
                heights.windows(2).all(|w| w[1] >= w[0] - 1e-9),
                "height dipped with more speed at {angle} deg, {d} m"
            );
        }
    }
}

#[test]
fn farther_targets_need_more_speed() {
    let cfg = LaunchConfig::default();
    let speeds: Vec<f64> = DISTANCES
        .iter()
        .map(|&d| {
            solve(&TargetSpec::new(d, &cfg), &VehicleMotion::stationary(), &TargetDirection::new(0.0), &cfg)
                .expect("in range")
                .launcher_velocity
        })
        .collect();
    assert!(speeds.windows(2).all(|w| w[1] > w[0]), "{speeds:?}");
}

#[test]
fn solution_serializes_to_json() {
    let cfg = LaunchConfig::default();
    let sol = solve(&TargetSpec::new(2.0, &cfg), &VehicleMotion::stationary(), &TargetDirection::new(0.0), &cfg)
        .expect("in range");
    let json = serde_json::to_value(sol).unwrap();
    assert!(json.get("launcher_velocity").is_some());
    assert!(json.get("projectile_vertical_angle_deg").is_some());
}
