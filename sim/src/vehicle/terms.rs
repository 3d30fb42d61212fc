use super::types::ThrustCommand;
use crate::{Quatf, Vec3f, VehicleSpec};

// ----- Linear forces (world frame) -----

pub(super) fn force_buoyancy(spec: &VehicleSpec) -> Vec3f {
    Vec3f::new(0.0, spec.net_buoyancy_n(), 0.0)
}

pub(super) fn force_thrust(spec: &VehicleSpec, cmd: ThrustCommand, orientation: Quatf) -> Vec3f {
    let body = Vec3f::new(
        cmd.strafe * spec.thrust_strafe_n,
        cmd.vertical * spec.thrust_vertical_n,
        cmd.forward * spec.thrust_forward_n,
    );
    orientation * body
}

pub(super) fn force_drag(spec: &VehicleSpec, velocity: Vec3f) -> Vec3f {
    // Quadratic, opposing motion: -c * |v| * v
    -spec.drag_coefficient * velocity.length() * velocity
}

// ----- Torques (body frame) -----

pub(super) fn torque_roll_control(spec: &VehicleSpec, cmd: ThrustCommand) -> f32 {
    cmd.roll * spec.roll_torque_nm
}

pub(super) fn torque_angular_damping(spec: &VehicleSpec, ang_vel: Vec3f) -> Vec3f {
    -spec.angular_damping * ang_vel
}

/// Hydrostatic pressure (kPa) at `depth` meters.
pub(super) fn pressure_at_depth(spec: &VehicleSpec, depth: f32) -> f32 {
    spec.atmospheric_pressure_kpa + spec.water_density * spec.gravity * depth / 1000.0
}
