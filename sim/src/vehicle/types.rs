use serde::{Deserialize, Serialize};

use crate::{Quatf, Vec3f};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Vec3f,
    /// Orientation as quaternion (body→world).
    /// Body axes: +Z forward, +Y up, +X right (starboard).
    pub orientation: Quatf,
    /// World-frame linear velocity (m/s).
    pub velocity: Vec3f,
    /// Body-frame angular velocity (rad/s). `.z` is roll about forward.
    pub ang_vel: Vec3f,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vec3f::ZERO,
            orientation: Quatf::IDENTITY,
            velocity: Vec3f::ZERO,
            ang_vel: Vec3f::ZERO,
        }
    }
}

/// One tick of normalized thruster commands, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustCommand {
    pub forward: f32,
    /// +1 = starboard.
    pub strafe: f32,
    /// +1 = up.
    pub vertical: f32,
    /// +1 = roll to starboard.
    pub roll: f32,
}

impl ThrustCommand {
    pub fn new(forward: f32, strafe: f32, vertical: f32, roll: f32) -> Self {
        Self { forward, strafe, vertical, roll }.clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            forward: axis(self.forward),
            strafe: axis(self.strafe),
            vertical: axis(self.vertical),
            roll: axis(self.roll),
        }
    }
}

// NaN collapses to 0 rather than poisoning the integrator.
fn axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

/// Per-step force breakdown, filled by `VehicleDynamics::update_with_debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleStepDebug {
    /// Timestep actually integrated (after the safety clamp).
    pub dt: f32,
    pub command: ThrustCommand,
    pub buoyancy_n: f32,
    pub weight_n: f32,
    pub buoy_net_n: f32,
    pub f_thrust: Vec3f,
    pub f_drag: Vec3f,
    pub f_total: Vec3f,
    pub accel: Vec3f,
    pub tau_roll: f32,
    pub speed_clamped: bool,
    pub hit_surface: bool,
    pub hit_floor: bool,
}
