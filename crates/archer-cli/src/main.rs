use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector2;

use archer_core::{Alliance, Field, LaunchConfig};
use archer_solver::{
    solve_with_mode, sweep_angles, SearchMode, TargetDirection, TargetSpec, VehicleMotion,
};
use archer_trajectory::simulate;

mod config;
mod output;
mod stream;

#[derive(Parser)]
#[command(name = "archer")]
#[command(version, about = "Launch-solution calculator for a moving robot launcher", long_about = None)]
struct Cli {
    /// JSON file with launch constants (missing keys take defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct VehicleArgs {
    /// Vehicle ground speed (m/s)
    #[arg(long, default_value_t = 0.0)]
    vehicle_speed: f64,

    /// Vehicle heading, world frame (degrees)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    vehicle_heading: f64,
}

impl VehicleArgs {
    fn motion(self) -> VehicleMotion {
        VehicleMotion { speed_ms: self.vehicle_speed, heading_deg: self.vehicle_heading }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the launcher command at a given range and bearing
    Solve {
        /// Horizontal distance to the target (m)
        #[arg(short, long)]
        distance: f64,

        /// World-frame bearing to the target (degrees)
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        azimuth: f64,

        #[command(flatten)]
        vehicle: VehicleArgs,

        /// Evaluate every angle instead of stopping at the speed minimum
        #[arg(long)]
        full_sweep: bool,

        /// Also print the display path of the solution
        #[arg(long)]
        path: bool,
    },

    /// Fly one launch and report the crossing at the target range
    Simulate {
        /// Launch pitch (degrees)
        #[arg(short, long, allow_hyphen_values = true)]
        angle: f64,

        /// Launch speed (m/s)
        #[arg(short, long)]
        speed: f64,

        /// Target range (m)
        #[arg(short, long)]
        distance: f64,

        /// Print every integration sample
        #[arg(long)]
        path: bool,
    },

    /// Show what the search does at every candidate angle
    Sweep {
        /// Horizontal distance to the target (m)
        #[arg(short, long)]
        distance: f64,
    },

    /// Solve from a position on the field (normalized 0..1 coordinates)
    Aim {
        #[arg(short, long)]
        x: f64,

        #[arg(short, long)]
        y: f64,

        #[arg(long, value_enum, default_value_t = AllianceArg::Red)]
        alliance: AllianceArg,

        #[command(flatten)]
        vehicle: VehicleArgs,
    },

    /// Read `distance azimuth [vehicle_speed vehicle_heading]` lines from stdin
    /// and print the newest solution as the background solver catches up
    Stream,

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum AllianceArg {
    Red,
    Blue,
}

impl From<AllianceArg> for Alliance {
    fn from(a: AllianceArg) -> Self {
        match a {
            AllianceArg::Red => Alliance::Red,
            AllianceArg::Blue => Alliance::Blue,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => config::load(path)?,
        None => LaunchConfig::default(),
    };

    match cli.command {
        Commands::Solve { distance, azimuth, vehicle, full_sweep, path } => {
            let target = TargetSpec::new(distance, &cfg);
            let mode = if full_sweep { SearchMode::FullSweep } else { SearchMode::EarlyExit };
            let solution = solve_with_mode(&target, &vehicle.motion(), &TargetDirection::new(azimuth), &cfg, mode);
            let flight = match (&solution, path) {
                (Some(sol), true) => sol.regenerate_path(distance, &cfg),
                _ => None,
            };
            output::solution(cli.output, &target, solution.as_ref(), flight.as_ref(), &cfg)?;
        }
        Commands::Simulate { angle, speed, distance, path } => {
            let flight = simulate(angle, speed, distance, &cfg, path);
            output::flight(cli.output, distance, flight.as_ref())?;
        }
        Commands::Sweep { distance } => {
            let target = TargetSpec::new(distance, &cfg);
            if distance <= 0.0 || distance.is_nan() {
                eprintln!("warning: distance must be > 0, nothing to sweep");
            }
            output::sweep(cli.output, &sweep_angles(&target, &cfg))?;
        }
        Commands::Aim { x, y, alliance, vehicle } => {
            let bearing = Field::default().bearing(Vector2::new(x, y), alliance.into());
            let target = TargetSpec::new(bearing.distance_m, &cfg);
            let solution = solve_with_mode(
                &target,
                &vehicle.motion(),
                &TargetDirection::new(bearing.azimuth_deg),
                &cfg,
                SearchMode::EarlyExit,
            );
            output::aim(cli.output, &bearing, solution.as_ref(), &cfg)?;
        }
        Commands::Stream => {
            stream::run(Arc::new(cfg), cli.output).context("stream mode failed")?;
        }
        Commands::Config => {
            println!("{}", cfg.to_json_pretty()?);
        }
    }

    Ok(())
}
