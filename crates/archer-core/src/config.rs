//! Launch configuration record.
//!
//! Every tunable constant the integrator and solver read lives here: physics,
//! projectile, search bounds and the integration step. A solve call borrows one
//! `LaunchConfig` for its whole duration; callers that edit parameters at runtime
//! hand a fresh value (usually behind an `Arc`) to the next call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or validating a [`LaunchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and > 0 (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be finite and >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie in [-90, 90] degrees (got {value})")]
    AngleOutOfRange { field: &'static str, value: f64 },
    #[error("min_angle_deg ({min}) is greater than max_angle_deg ({max})")]
    EmptyAngleRange { min: f64, max: f64 },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Friction-wheel launcher parameters (used for the RPM readout only).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    pub friction_wheel_diameter_m: f64, // m
    pub rpm_loss_factor_percent: f64,   // extra RPM for slip & compression, %
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            friction_wheel_diameter_m: 0.072,
            rpm_loss_factor_percent: 55.0,
        }
    }
}

/// All constants read at solve time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    // physics
    pub gravity_ms2: f64,             // m/s^2
    pub air_density_kg_m3: f64,       // kg/m^3
    pub target_height_m: f64,         // m, above launch point
    // projectile
    pub mass_kg: f64,                 // kg
    pub drag_coefficient: f64,        // C_d (dimensionless)
    pub cross_sectional_area_m2: f64, // m^2
    // search
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
    pub angle_step_deg: f64,
    pub velocity_step_ms: f64,
    pub max_velocity_tries: u32,
    pub bisection_iterations: u32,
    pub hit_tolerance_m: f64,
    // integration
    pub time_step_s: f64,
    pub max_flight_time_s: f64,
    pub motor: MotorConfig,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            gravity_ms2: 9.81,
            air_density_kg_m3: 1.225,
            target_height_m: 1.065,
            mass_kg: 0.012,
            drag_coefficient: 0.25,
            cross_sectional_area_m2: 0.00928,
            min_angle_deg: 55.0,
            max_angle_deg: 90.0,
            angle_step_deg: 1.0,
            velocity_step_ms: 0.1,
            max_velocity_tries: 200,
            bisection_iterations: 8,
            hit_tolerance_m: 0.055,
            time_step_s: 0.006,
            max_flight_time_s: 10.0,
            motor: MotorConfig::default(),
        }
    }
}

impl LaunchConfig {
    /// Parse a (possibly partial) JSON document; missing keys take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of candidate angles in the sweep, both endpoints included when the
    /// step lands on them.
    pub fn angle_count(&self) -> usize {
        let span = (self.max_angle_deg - self.min_angle_deg) / self.angle_step_deg;
        // 1e-9 absorbs float error so 55..=90 step 1 yields 36 candidates
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (span + 1e-9).floor() as usize;
        steps + 1
    }

    /// Candidate launch angle `i` of the sweep, in degrees.
    #[allow(clippy::cast_precision_loss)]
    pub fn angle_at(&self, i: usize) -> f64 {
        self.min_angle_deg + i as f64 * self.angle_step_deg
    }

    /// Check every field; the solver refuses to run on a config that fails this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity_ms2", self.gravity_ms2)?;
        non_negative("air_density_kg_m3", self.air_density_kg_m3)?;
        finite("target_height_m", self.target_height_m)?;
        positive("mass_kg", self.mass_kg)?;
        non_negative("drag_coefficient", self.drag_coefficient)?;
        non_negative("cross_sectional_area_m2", self.cross_sectional_area_m2)?;

        angle("min_angle_deg", self.min_angle_deg)?;
        angle("max_angle_deg", self.max_angle_deg)?;
        if self.min_angle_deg > self.max_angle_deg {
            return Err(ConfigError::EmptyAngleRange {
                min: self.min_angle_deg,
                max: self.max_angle_deg,
            });
        }
        positive("angle_step_deg", self.angle_step_deg)?;
        positive("velocity_step_ms", self.velocity_step_ms)?;
        if self.max_velocity_tries == 0 {
            return Err(ConfigError::ZeroCount { field: "max_velocity_tries" });
        }
        non_negative("hit_tolerance_m", self.hit_tolerance_m)?;

        positive("time_step_s", self.time_step_s)?;
        positive("max_flight_time_s", self.max_flight_time_s)?;

        positive("motor.friction_wheel_diameter_m", self.motor.friction_wheel_diameter_m)?;
        non_negative("motor.rpm_loss_factor_percent", self.motor.rpm_loss_factor_percent)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn angle(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::AngleOutOfRange { field, value })
    }
}
