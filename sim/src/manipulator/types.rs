use serde::{Deserialize, Serialize};

use crate::{ExtensionSpec, JointSpec};

/// The four rotational joints, base to tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointId {
    /// Yaw about the mount's up axis.
    Base,
    /// Pitch of the upper arm.
    Shoulder,
    /// Pitch of the forearm relative to the upper arm.
    Elbow,
    /// Roll about the forearm axis.
    Wrist,
}

impl JointId {
    pub const ALL: [JointId; 4] = [
        JointId::Base,
        JointId::Shoulder,
        JointId::Elbow,
        JointId::Wrist,
    ];

    pub const fn index(self) -> usize {
        match self {
            JointId::Base => 0,
            JointId::Shoulder => 1,
            JointId::Elbow => 2,
            JointId::Wrist => 3,
        }
    }
}

/// Live state of one rotational joint alongside its limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub spec: JointSpec,
    pub angle: f32,
    pub velocity: f32,
}

impl Joint {
    pub(super) fn at_rest(spec: JointSpec) -> Self {
        Self { spec, angle: spec.rest, velocity: 0.0 }
    }

    /// Integrates one step and clamps. Returns true if a limit was hit.
    pub(super) fn integrate(&mut self, dt: f32) -> bool {
        integrate_clamped(&mut self.angle, &mut self.velocity, self.spec.min, self.spec.max, dt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extension {
    pub spec: ExtensionSpec,
    /// Meters beyond the forearm end.
    pub length: f32,
    pub velocity: f32,
}

impl Extension {
    pub(super) fn at_rest(spec: ExtensionSpec) -> Self {
        Self { spec, length: spec.rest, velocity: 0.0 }
    }

    pub(super) fn integrate(&mut self, dt: f32) -> bool {
        integrate_clamped(&mut self.length, &mut self.velocity, self.spec.min, self.spec.max, dt)
    }
}

fn integrate_clamped(value: &mut f32, velocity: &mut f32, min: f32, max: f32, dt: f32) -> bool {
    let next = *value + *velocity * dt;
    if next <= min {
        *value = min;
        *velocity = 0.0;
        true
    } else if next >= max {
        *value = max;
        *velocity = 0.0;
        true
    } else {
        *value = next;
        false
    }
}

/// Joint configuration plus live state. Single source of truth for limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    pub joints: [Joint; 4],
    pub extension: Extension,
}

impl ArmState {
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    pub(super) fn joint_mut(&mut self, id: JointId) -> &mut Joint {
        &mut self.joints[id.index()]
    }
}

/// Normalized arm control axes, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmInput {
    pub yaw: f32,
    pub pitch: f32,
    pub extend: f32,
    pub rotate: f32,
}

impl ArmInput {
    pub fn new(yaw: f32, pitch: f32, extend: f32, rotate: f32) -> Self {
        Self { yaw, pitch, extend, rotate }.clamped()
    }

    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            yaw: c(self.yaw),
            pitch: c(self.pitch),
            extend: c(self.extend),
            rotate: c(self.rotate),
        }
    }
}
