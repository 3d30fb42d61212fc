mod types;
mod fk;
mod kinematics;

pub use types::{ArmInput, ArmState, Joint, JointId, Extension};
pub use fk::{segment_rotation, tip_position_local, torch_orientation_local};
pub use kinematics::ManipulatorKinematics;
