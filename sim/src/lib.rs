//! Simulation core for the underwater welding trainer.
//!
//! This crate intentionally avoids any rendering, input or networking types.
//! The orchestrator feeds normalized control axes in once per tick and reads
//! plain state snapshots back out.

mod math;
pub use math::{integrate_orientation, Quatf, Vec3f, BODY_FWD, BODY_RIGHT, BODY_UP};

mod error;
pub use error::ConfigError;

mod specs;
pub use specs::{
    presets, ArmSpec, ExtensionSpec, JointSpec, ScoringSpec, SimConfig, VehicleSpec, WeldSpec,
    MAX_STABILITY_WINDOW,
};

pub mod vehicle;
pub use vehicle::{ThrustCommand, VehicleDynamics, VehicleState, VehicleStepDebug};

pub mod manipulator;
pub use manipulator::{ArmInput, ArmState, JointId, ManipulatorKinematics};

pub mod weld;
pub use weld::sampling::{derive_sample, WorkSurface};
pub use weld::{
    analyze_weld_quality, check_proximity_to_target, ArcStabilityWindow, Defect, DefectKind,
    Proximity, Rating, SampleParams, Severity, SubScores, WeldPhase, WeldQualityEngine,
    WeldQualityResult, WeldSample,
};

pub mod scoring;
pub use scoring::{ScoreState, ScoringEngine, WeldAward};
