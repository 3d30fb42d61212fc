use tracing::{debug, trace};

use super::terms::*;
use super::types::{ThrustCommand, VehicleState, VehicleStepDebug};
use crate::{integrate_orientation, Quatf, Vec3f, VehicleSpec};

/// Submersible rigid-body integrator: net buoyancy, body-frame thrust and
/// quadratic drag, stepped with semi-implicit Euler.
#[derive(Debug, Clone)]
pub struct VehicleDynamics {
    spec: VehicleSpec,
    state: VehicleState,
    spawn: VehicleState,
    pending: ThrustCommand,
}

impl VehicleDynamics {
    pub fn new(spec: VehicleSpec) -> Self {
        Self::with_state(spec, VehicleState::default())
    }

    /// Spawn at a given pose; `reset()` returns here.
    pub fn with_state(spec: VehicleSpec, spawn: VehicleState) -> Self {
        Self {
            spec,
            state: spawn,
            spawn,
            pending: ThrustCommand::default(),
        }
    }

    pub fn spec(&self) -> &VehicleSpec {
        &self.spec
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Stores the command for the next `update`. Later calls overwrite it.
    pub fn apply_thrust(&mut self, forward: f32, strafe: f32, vertical: f32, roll: f32) {
        self.pending = ThrustCommand::new(forward, strafe, vertical, roll);
    }

    pub fn apply_command(&mut self, cmd: ThrustCommand) {
        self.pending = cmd.clamped();
    }

    pub fn update(&mut self, dt: f32) {
        self.update_with_debug(dt, None);
    }

    /// Variant of `update` that fills out an optional telemetry struct.
    pub fn update_with_debug(&mut self, dt: f32, mut dbg: Option<&mut VehicleStepDebug>) {
        // The command is single-use even if the step is skipped.
        let cmd = std::mem::take(&mut self.pending);
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(self.spec.max_dt);
        let spec = &self.spec;
        let state = &mut self.state;

        let f_buoy = force_buoyancy(spec);
        let f_thrust = force_thrust(spec, cmd, state.orientation);
        let f_drag = force_drag(spec, state.velocity);
        let f_total = f_buoy + f_thrust + f_drag;
        let accel = f_total / spec.mass_kg;

        state.velocity += accel * dt;
        let speed = state.velocity.length();
        let speed_clamped = speed > spec.max_speed;
        if speed_clamped {
            state.velocity *= spec.max_speed / speed;
        }

        // Angular: roll control plus linear damping on all three body axes.
        let mut tau = torque_angular_damping(spec, state.ang_vel);
        let tau_roll = torque_roll_control(spec, cmd);
        tau.z += tau_roll;
        state.ang_vel += tau / spec.roll_inertia * dt;
        let r_max = spec.max_rotation_speed;
        state.ang_vel = state.ang_vel.clamp(Vec3f::splat(-r_max), Vec3f::splat(r_max));

        state.position += state.velocity * dt;

        let mut hit_surface = false;
        let mut hit_floor = false;
        if state.position.y > 0.0 {
            state.position.y = 0.0;
            state.velocity.y = 0.0;
            hit_surface = true;
        } else if state.position.y < -spec.max_depth {
            state.position.y = -spec.max_depth;
            state.velocity.y = 0.0;
            hit_floor = true;
        }

        state.orientation = integrate_orientation(state.orientation, state.ang_vel, dt);

        if hit_surface || hit_floor {
            trace!(hit_surface, hit_floor, y = state.position.y, "depth boundary");
        }

        if let Some(d) = dbg.as_mut() {
            d.dt = dt;
            d.command = cmd;
            d.buoyancy_n = spec.water_density * spec.displaced_volume_m3 * spec.gravity;
            d.weight_n = spec.mass_kg * spec.gravity;
            d.buoy_net_n = f_buoy.y;
            d.f_thrust = f_thrust;
            d.f_drag = f_drag;
            d.f_total = f_total;
            d.accel = accel;
            d.tau_roll = tau_roll;
            d.speed_clamped = speed_clamped;
            d.hit_surface = hit_surface;
            d.hit_floor = hit_floor;
        }
    }

    pub fn position(&self) -> Vec3f {
        self.state.position
    }

    pub fn orientation(&self) -> Quatf {
        self.state.orientation
    }

    pub fn velocity(&self) -> Vec3f {
        self.state.velocity
    }

    pub fn angular_velocity(&self) -> Vec3f {
        self.state.ang_vel
    }

    /// Meters below the surface (never negative).
    pub fn depth(&self) -> f32 {
        (-self.state.position.y).max(0.0)
    }

    /// Hydrostatic pressure at the current depth (kPa).
    pub fn pressure(&self) -> f32 {
        pressure_at_depth(&self.spec, self.depth())
    }

    /// Teleport; linear velocity is zeroed.
    pub fn set_position(&mut self, position: Vec3f) {
        self.state.position = position;
        self.state.velocity = Vec3f::ZERO;
        debug!(?position, "vehicle teleported");
    }

    /// Re-orient; angular velocity is zeroed.
    pub fn set_rotation(&mut self, orientation: Quatf) {
        let q = orientation.normalize();
        self.state.orientation = if q.is_finite() { q } else { Quatf::IDENTITY };
        self.state.ang_vel = Vec3f::ZERO;
    }

    /// Back to the spawn pose, at rest, with no pending command.
    pub fn reset(&mut self) {
        self.state = self.spawn;
        self.state.velocity = Vec3f::ZERO;
        self.state.ang_vel = Vec3f::ZERO;
        self.pending = ThrustCommand::default();
        debug!(position = ?self.state.position, "vehicle reset");
    }
}
