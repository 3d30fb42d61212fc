mod types;
mod terms;
mod dynamics;

pub use types::{ThrustCommand, VehicleState, VehicleStepDebug};
pub use dynamics::VehicleDynamics;
