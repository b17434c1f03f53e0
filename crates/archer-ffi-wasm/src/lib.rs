// crates/archer-ffi-wasm/src/lib.rs
//
// WASM bindings: trajectory simulation + launch solve exports.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use archer_core::LaunchConfig;
use archer_solver::{self as solver, LaunchSolution, TargetDirection, TargetSpec, VehicleMotion};
use archer_trajectory as traj;

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsPoint {
    pub x: f64,
    pub y: f64,
}

fn checked_config(cfg: Option<LaunchConfig>) -> Result<LaunchConfig, String> {
    let cfg = cfg.unwrap_or_default();
    cfg.validate().map_err(|e| e.to_string())?;
    Ok(cfg)
}

/* ------------------------------ Simulate ------------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSimulateInput {
    pub angle_deg: f64,
    pub speed_ms: f64,
    pub distance_m: f64,
    #[serde(default)]
    pub want_path: bool,
    /// Omitted -> defaults
    #[serde(default)]
    pub config: Option<LaunchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSimulateResult {
    /// false on a miss; height/time are then meaningless
    pub hit: bool,
    pub height_m: f64,
    pub time_s: f64,
    pub path: Vec<JsPoint>,
}

pub fn run_simulate(inp: &JsSimulateInput) -> Result<JsSimulateResult, String> {
    let cfg = checked_config(inp.config.clone())?;
    let out = match traj::simulate(inp.angle_deg, inp.speed_ms, inp.distance_m, &cfg, inp.want_path) {
        Some(f) => JsSimulateResult {
            hit: true,
            height_m: f.height_m,
            time_s: f.time_s,
            path: f.points().iter().map(|p| JsPoint { x: p.x, y: p.y }).collect(),
        },
        None => JsSimulateResult { hit: false, height_m: -1.0, time_s: -1.0, path: Vec::new() },
    };
    Ok(out)
}

#[wasm_bindgen]
pub fn simulate_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsSimulateInput = swb::from_value(input)?;
    let out = run_simulate(&inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/* -------------------------------- Solve -------------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSolveInput {
    pub distance_m: f64,
    pub target_azimuth_deg: f64,
    #[serde(default)]
    pub vehicle_speed_ms: f64,
    #[serde(default)]
    pub vehicle_heading_deg: f64,
    /// Also return the display path of the solution
    #[serde(default)]
    pub want_path: bool,
    #[serde(default)]
    pub config: Option<LaunchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSolveResult {
    /// null when the target is out of range
    pub solution: Option<LaunchSolution>,
    pub motor_rpm: Option<f64>,
    pub path: Vec<JsPoint>,
}

pub fn run_solve(inp: &JsSolveInput) -> Result<JsSolveResult, String> {
    let cfg = checked_config(inp.config.clone())?;
    let target = TargetSpec::new(inp.distance_m, &cfg);
    let vehicle = VehicleMotion { speed_ms: inp.vehicle_speed_ms, heading_deg: inp.vehicle_heading_deg };
    let direction = TargetDirection::new(inp.target_azimuth_deg);

    let solution = solver::solve(&target, &vehicle, &direction, &cfg);
    let path = match (&solution, inp.want_path) {
        (Some(sol), true) => sol
            .regenerate_path(inp.distance_m, &cfg)
            .map(|f| f.points().iter().map(|p| JsPoint { x: p.x, y: p.y }).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    Ok(JsSolveResult {
        motor_rpm: solution.map(|s| s.motor_rpm(&cfg)),
        solution,
        path,
    })
}

#[wasm_bindgen]
pub fn solve_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsSolveInput = swb::from_value(input)?;
    let out = run_solve(&inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/// Default constants, for seeding a preferences form.
#[wasm_bindgen]
pub fn default_config_js() -> Result<JsValue, JsValue> {
    swb::to_value(&LaunchConfig::default()).map_err(|e| e.into())
}

/* -------------------------------- tests -------------------------------- */
