//! Turns the torch tip pose into the process parameters a [`super::WeldSample`]
//! records.

use serde::{Deserialize, Serialize};

use super::types::SampleParams;
use crate::Vec3f;

/// The plate being welded, as a plane in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkSurface {
    pub point: Vec3f,
    /// Outward normal; need not be unit length.
    pub normal: Vec3f,
}

impl WorkSurface {
    pub fn unit_normal(&self) -> Vec3f {
        let n = self.normal.normalize_or_zero();
        if n == Vec3f::ZERO {
            Vec3f::Y
        } else {
            n
        }
    }

    /// Signed height of `p` above the plane (m).
    pub fn height_of(&self, p: Vec3f) -> f32 {
        (p - self.point).dot(self.unit_normal())
    }
}

impl Default for WorkSurface {
    fn default() -> Self {
        Self { point: Vec3f::ZERO, normal: Vec3f::Y }
    }
}

/// Derives travel speed, work/travel angles and arc length for one frame.
///
/// - travel speed: tip velocity projected onto the plate (m/s); zero on the
///   first frame or when `dt` is not positive.
/// - work angle: angle between the nozzle axis and the plate measured across
///   the seam (ignoring lean along the travel direction), 90° when
///   perpendicular. Falls back to the plain axis-to-plane angle while still.
/// - travel angle: lean of the nozzle toward the direction of travel, positive
///   when pushing; zero while the tip is not moving along the plate.
/// - arc length: tip standoff above the plate in mm, floored at 0.
pub fn derive_sample(
    prev_tip: Option<Vec3f>,
    tip: Vec3f,
    torch_dir: Vec3f,
    surface: &WorkSurface,
    dt: f32,
    distance_to_target_mm: f32,
) -> SampleParams {
    let n = surface.unit_normal();
    let d = torch_dir.normalize_or_zero();

    let travel = match prev_tip {
        Some(prev) if dt > 0.0 => {
            let v = (tip - prev) / dt;
            v - n * v.dot(n)
        }
        _ => Vec3f::ZERO,
    };
    let travel_speed = travel.length();
    let travel_dir = travel.normalize_or_zero();

    let (work_angle, travel_angle) = if travel_dir == Vec3f::ZERO || d == Vec3f::ZERO {
        (d.dot(n).abs().clamp(0.0, 1.0).asin().to_degrees(), 0.0)
    } else {
        let across = travel_dir.cross(n);
        (
            (-d.dot(n)).atan2(d.dot(across).abs()).to_degrees(),
            d.dot(travel_dir).atan2(-d.dot(n)).to_degrees(),
        )
    };
    let arc_length = surface.height_of(tip).max(0.0) * 1000.0;

    SampleParams {
        travel_speed,
        work_angle,
        travel_angle,
        arc_length,
        distance_to_target: distance_to_target_mm,
    }
}
