//! archer-models
//!
//! Quadratic air drag with a constant coefficient, the only drag law the
//! launcher solver supports:
//!
//!   F_drag = k * v^2,   k = 0.5 * rho * C_d * A
//!
//! acting opposite the velocity vector. The model is 2-D (x downrange, y up);
//! the solver never needs a lateral axis because aim azimuth is handled as a
//! separate frame transform.
//!
//! Exports:
//!   - `QuadraticDrag` (force & acceleration on a point mass)

/// Constant-coefficient quadratic drag.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadraticDrag {
    pub air_density: f64,      // kg/m^3
    pub drag_coefficient: f64, // C_d
    pub area_m2: f64,          // reference cross-section, m^2
}

impl QuadraticDrag {
    pub fn new(air_density: f64, drag_coefficient: f64, area_m2: f64) -> Self {
        Self { air_density, drag_coefficient, area_m2 }
    }

    /// `k` such that |F| = k * v^2 [kg/m].
    #[inline]
    pub fn factor(&self) -> f64 {
        0.5 * self.air_density * self.drag_coefficient * self.area_m2
    }

    /// Drag force vector [N] for velocity `(vx, vy)`.
    ///
    /// `None` when the velocity is exactly zero: the drag direction is undefined
    /// and the caller treats the state as degenerate.
    #[inline]
    pub fn force(&self, vx: f64, vy: f64) -> Option<(f64, f64)> {
        let v_sq = vx * vx + vy * vy;
        if v_sq == 0.0 {
            return None;
        }
        let v = v_sq.sqrt();
        let drag = self.factor() * v_sq;
        Some((-drag * vx / v, -drag * vy / v))
    }

    /// Total acceleration [m/s^2] of a point mass under this drag plus gravity.
    #[inline]
    pub fn acceleration(&self, vx: f64, vy: f64, mass_kg: f64, gravity_ms2: f64) -> Option<(f64, f64)> {
        let (fx, fy) = self.force(vx, vy)?;
        let weight = -mass_kg * gravity_ms2;
        Some((fx / mass_kg, (weight + fy) / mass_kg))
    }
}

/* -------------------------------- tests -------------------------------- */
