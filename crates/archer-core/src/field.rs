//! Competition field geometry.
//!
//! The field is a square, handled internally in normalized units (side = 1.0).
//! Each alliance's target tag sits at the midpoint of a corner panel on the far
//! wall: blue in the upper-left corner, red in the upper-right one. Positions are
//! `(x, y)` with `x` to the right and `y` away from the driver station; bearings
//! are `atan2(dy, dx)` in degrees, the same world frame the solver uses for
//! vehicle heading and aim azimuth.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::in_to_m;

/// Side length of the real field [in].
pub const FIELD_SIZE_IN: f64 = 141.170031;
/// Length of the angled corner panel carrying the target tag [in].
pub const PANEL_LENGTH_IN: f64 = 27.889412;
/// Angle between the corner panel and the side wall [deg].
pub const PANEL_ANGLE_WITH_SIDE_WALL_DEG: f64 = 54.046;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    Red,
    Blue,
}

/// Distance & world-frame direction from the robot to its target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bearing {
    pub distance_m: f64,
    pub azimuth_deg: f64,
}

/// Field with precomputed tag positions (normalized units).
#[derive(Clone, Copy, Debug)]
pub struct Field {
    size_in: f64,
    tag_blue: Vector2<f64>,
    tag_red: Vector2<f64>,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_SIZE_IN, PANEL_LENGTH_IN, PANEL_ANGLE_WITH_SIDE_WALL_DEG)
    }
}

impl Field {
    pub fn new(size_in: f64, panel_length_in: f64, panel_angle_deg: f64) -> Self {
        let panel = panel_length_in / size_in;
        let tilt = (90.0 - panel_angle_deg).to_radians();
        let (dx, dy) = (panel * tilt.cos(), panel * tilt.sin());

        // Panel endpoints: one on the far wall, one on the side wall.
        let blue = (Vector2::new(dx, 1.0) + Vector2::new(0.0, 1.0 - dy)) * 0.5;
        let red = (Vector2::new(1.0 - dx, 1.0) + Vector2::new(1.0, 1.0 - dy)) * 0.5;

        Self { size_in, tag_blue: blue, tag_red: red }
    }

    /// Tag position of `alliance`, normalized units.
    pub fn tag(&self, alliance: Alliance) -> Vector2<f64> {
        match alliance {
            Alliance::Red => self.tag_red,
            Alliance::Blue => self.tag_blue,
        }
    }

    /// Clamp a normalized position onto the field.
    pub fn clamp(position: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(position.x.clamp(0.0, 1.0), position.y.clamp(0.0, 1.0))
    }

    /// Distance [m] and bearing [deg] from `position` (normalized, clamped) to the
    /// alliance tag.
    pub fn bearing(&self, position: Vector2<f64>, alliance: Alliance) -> Bearing {
        let to_target = self.tag(alliance) - Self::clamp(position);
        Bearing {
            distance_m: in_to_m(to_target.norm() * self.size_in),
            azimuth_deg: to_target.y.atan2(to_target.x).to_degrees(),
        }
    }
}
