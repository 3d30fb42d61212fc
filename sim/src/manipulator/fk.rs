//! Forward kinematics for the base-yaw / shoulder-pitch / elbow-pitch /
//! wrist-roll chain with a linear extension on the forearm.
//!
//! Segment directions are built as `yaw(base) * pitch(cumulative)` applied
//! to body +Z. The elbow angle is relative to the upper arm, so the forearm
//! pitch is `shoulder + elbow`, and the base yaw swings the whole chain.

use super::types::{ArmState, JointId};
use crate::{ArmSpec, Quatf, Vec3f, BODY_FWD};

/// Rotation taking body +Z onto a segment pitched up by `pitch` and yawed by
/// `yaw` (positive yaw swings toward +X).
#[inline]
pub fn segment_rotation(yaw: f32, pitch: f32) -> Quatf {
    Quatf::from_rotation_y(yaw) * Quatf::from_rotation_x(-pitch)
}

/// Tool tip in the vehicle body frame.
pub fn tip_position_local(spec: &ArmSpec, arm: &ArmState) -> Vec3f {
    let yaw = arm.joint(JointId::Base).angle;
    let shoulder = arm.joint(JointId::Shoulder).angle;
    let forearm_pitch = shoulder + arm.joint(JointId::Elbow).angle;

    let upper = segment_rotation(yaw, shoulder) * (BODY_FWD * spec.upper_arm_length);
    let forearm_dir = segment_rotation(yaw, forearm_pitch) * BODY_FWD;
    let lower = forearm_dir * spec.lower_arm_length;
    let extension = forearm_dir * arm.extension.length;

    spec.base_offset + upper + lower + extension
}

/// Torch frame in the vehicle body frame: forearm direction, rolled by the
/// wrist, then bent down by the fixed nozzle tilt. The nozzle points along +Z.
pub fn torch_orientation_local(spec: &ArmSpec, arm: &ArmState) -> Quatf {
    let yaw = arm.joint(JointId::Base).angle;
    let forearm_pitch = arm.joint(JointId::Shoulder).angle + arm.joint(JointId::Elbow).angle;
    let wrist = arm.joint(JointId::Wrist).angle;
    segment_rotation(yaw, forearm_pitch)
        * Quatf::from_rotation_z(wrist)
        * Quatf::from_rotation_x(spec.nozzle_tilt)
}
