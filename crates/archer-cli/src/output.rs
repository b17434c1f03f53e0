//! Table and JSON rendering for the subcommands.

use serde::Serialize;
use serde_json::json;

use archer_core::{Bearing, LaunchConfig};
use archer_solver::{AngleOutcome, AngleReport, LaunchSolution, TargetSpec};
use archer_trajectory::Flight;

use crate::OutputFormat;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn solution_table(sol: &LaunchSolution, cfg: &LaunchConfig) {
    println!("launcher velocity    {:>9.3} m/s", sol.launcher_velocity);
    println!("launcher angle       {:>9.3} deg", sol.launcher_angle_deg);
    println!("aim azimuth          {:>9.3} deg", sol.aim_azimuth_deg);
    println!("time of flight       {:>9.3} s", sol.time_of_flight_s);
    println!("projectile velocity  {:>9.3} m/s", sol.projectile_total_velocity);
    println!("projectile angle     {:>9.3} deg", sol.projectile_vertical_angle_deg);
    println!("motor speed          {:>9.0} rpm", sol.motor_rpm(cfg));
}

fn path_table(flight: &Flight) {
    println!("{:>10} {:>10}", "x (m)", "y (m)");
    for p in flight.points() {
        println!("{:>10.4} {:>10.4}", p.x, p.y);
    }
}

pub fn solution(
    format: OutputFormat,
    target: &TargetSpec,
    sol: Option<&LaunchSolution>,
    flight: Option<&Flight>,
    cfg: &LaunchConfig,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "target": target,
            "solution": sol,
            "motor_rpm": sol.map(|s| s.motor_rpm(cfg)),
            "path": flight.map(Flight::points),
        })),
        OutputFormat::Table => {
            println!("target {:.3} m at {:.3} m height", target.distance_m, target.height_m);
            match sol {
                Some(sol) => solution_table(sol, cfg),
                None => println!("no solution: target out of range"),
            }
            if let Some(flight) = flight {
                println!();
                path_table(flight);
            }
            Ok(())
        }
    }
}

pub fn flight(format: OutputFormat, distance_m: f64, flight: Option<&Flight>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "distance_m": distance_m, "flight": flight })),
        OutputFormat::Table => {
            match flight {
                Some(f) => {
                    println!("height at {distance_m:.3} m   {:>9.4} m", f.height_m);
                    println!("time of flight      {:>9.4} s", f.time_s);
                    if f.path.is_some() {
                        println!();
                        path_table(f);
                    }
                }
                None => println!("miss: projectile never reaches {distance_m:.3} m"),
            }
            Ok(())
        }
    }
}

fn describe(outcome: &AngleOutcome) -> String {
    match outcome {
        AngleOutcome::NoGeometricSolution => "no geometric solution".to_owned(),
        AngleOutcome::NoBracketFound { estimate_ms } => {
            format!("no bracket from {estimate_ms:.3} m/s")
        }
        AngleOutcome::ToleranceMiss { speed_ms, height_m: Some(h) } => {
            format!("outside tolerance: {speed_ms:.3} m/s crosses at {h:.4} m")
        }
        AngleOutcome::ToleranceMiss { speed_ms, height_m: None } => {
            format!("outside tolerance: {speed_ms:.3} m/s misses")
        }
        AngleOutcome::Accepted(c) => {
            format!("{:.3} m/s, height {:.4} m, {:.3} s", c.speed_ms, c.height_m, c.time_s)
        }
    }
}

pub fn sweep(format: OutputFormat, reports: &[AngleReport]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(reports),
        OutputFormat::Table => {
            println!("{:>7}  outcome", "angle");
            for r in reports {
                println!("{:>7.2}  {}", r.angle_deg, describe(&r.outcome));
            }
            Ok(())
        }
    }
}

pub fn aim(
    format: OutputFormat,
    bearing: &Bearing,
    sol: Option<&LaunchSolution>,
    cfg: &LaunchConfig,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "bearing": bearing,
            "solution": sol,
            "motor_rpm": sol.map(|s| s.motor_rpm(cfg)),
        })),
        OutputFormat::Table => {
            println!("tag at {:.3} m, bearing {:.2} deg", bearing.distance_m, bearing.azimuth_deg);
            match sol {
                Some(sol) => solution_table(sol, cfg),
                None => println!("no solution: target out of range"),
            }
            Ok(())
        }
    }
}

/// One line per streamed result.
pub fn stream_line(
    format: OutputFormat,
    target: &TargetSpec,
    sol: Option<&LaunchSolution>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&json!({ "target": target, "solution": sol }))?);
        }
        OutputFormat::Table => match sol {
            Some(s) => println!(
                "{:>7.3} m  v={:.3} m/s  pitch={:.2} deg  aim={:.2} deg  tof={:.3} s",
                target.distance_m, s.launcher_velocity, s.launcher_angle_deg, s.aim_azimuth_deg, s.time_of_flight_s
            ),
            None => println!("{:>7.3} m  no solution", target.distance_m),
        },
    }
    Ok(())
}
