use tracing::debug;

use super::fk::{tip_position_local, torch_orientation_local};
use super::types::{ArmInput, ArmState, Extension, Joint, JointId};
use crate::{ArmSpec, Quatf, Vec3f, BODY_FWD};

/// Velocity-controlled welding arm mounted on the vehicle.
///
/// Inputs set target joint rates which the live rates chase with an
/// exponential filter; `update` integrates and clamps against the limits.
#[derive(Debug, Clone)]
pub struct ManipulatorKinematics {
    spec: ArmSpec,
    state: ArmState,
}

impl ManipulatorKinematics {
    pub fn new(spec: ArmSpec) -> Self {
        let state = rest_state(&spec);
        Self { spec, state }
    }

    pub fn spec(&self) -> &ArmSpec {
        &self.spec
    }

    pub fn state(&self) -> &ArmState {
        &self.state
    }

    /// Steer joint rates toward the targets implied by `input`.
    ///
    /// Pitch drives the shoulder and elbow in opposite directions at half
    /// rate each, which keeps the forearm roughly level while reaching.
    pub fn apply_input(&mut self, input: ArmInput, dt: f32) {
        let input = input.clamped();
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let smoothing = 1.0 - (-self.spec.damping_rate * dt).exp();

        let targets = [
            (JointId::Base, input.yaw),
            (JointId::Shoulder, 0.5 * input.pitch),
            (JointId::Elbow, -0.5 * input.pitch),
            (JointId::Wrist, input.rotate),
        ];
        for (id, axis) in targets {
            let joint = self.state.joint_mut(id);
            let target = axis * joint.spec.max_speed;
            joint.velocity += (target - joint.velocity) * smoothing;
        }

        let ext = &mut self.state.extension;
        let target = input.extend * ext.spec.max_speed;
        ext.velocity += (target - ext.velocity) * smoothing;
    }

    pub fn update(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        for joint in self.state.joints.iter_mut() {
            joint.integrate(dt);
        }
        self.state.extension.integrate(dt);
    }

    pub fn joint_angle(&self, id: JointId) -> f32 {
        self.state.joint(id).angle
    }

    pub fn joint_velocity(&self, id: JointId) -> f32 {
        self.state.joint(id).velocity
    }

    pub fn extension(&self) -> f32 {
        self.state.extension.length
    }

    pub fn extension_velocity(&self) -> f32 {
        self.state.extension.velocity
    }

    pub fn is_at_limit(&self, id: JointId) -> bool {
        let j = self.state.joint(id);
        j.angle <= j.spec.min || j.angle >= j.spec.max
    }

    /// Tool tip in the vehicle body frame.
    pub fn get_tip_position_local(&self) -> Vec3f {
        tip_position_local(&self.spec, &self.state)
    }

    /// Tool tip in world space given the vehicle pose.
    pub fn get_tip_position(&self, base_pos: Vec3f, base_rot: Quatf) -> Vec3f {
        base_pos + base_rot * self.get_tip_position_local()
    }

    pub fn get_torch_orientation_local(&self) -> Quatf {
        torch_orientation_local(&self.spec, &self.state)
    }

    /// Unit nozzle direction in the vehicle body frame.
    pub fn get_torch_direction_local(&self) -> Vec3f {
        self.get_torch_orientation_local() * BODY_FWD
    }

    pub fn get_torch_direction(&self, base_rot: Quatf) -> Vec3f {
        (base_rot * self.get_torch_direction_local()).normalize_or_zero()
    }

    /// Default bent pose, all rates zero.
    pub fn reset(&mut self) {
        self.state = rest_state(&self.spec);
        debug!("arm reset to rest pose");
    }
}

fn rest_state(spec: &ArmSpec) -> ArmState {
    ArmState {
        joints: [
            Joint::at_rest(spec.base),
            Joint::at_rest(spec.shoulder),
            Joint::at_rest(spec.elbow),
            Joint::at_rest(spec.wrist),
        ],
        extension: Extension::at_rest(spec.extension),
    }
}
