mod types;
mod stats;
mod defects;
mod feedback;
mod analysis;
mod engine;
mod proximity;
pub mod sampling;

pub use types::{
    Defect, DefectKind, Rating, SampleParams, Severity, SubScores, WeldQualityResult, WeldSample,
};
pub use analysis::analyze_weld_quality;
pub use engine::{ArcStabilityWindow, WeldPhase, WeldQualityEngine};
pub use proximity::{check_proximity_to_target, Proximity};
