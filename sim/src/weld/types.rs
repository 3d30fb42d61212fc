use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vec3f;

/// Process parameters measured for one frame of welding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleParams {
    /// m/s along the seam
    pub travel_speed: f32,
    /// degrees from the work plane (90 = perpendicular)
    pub work_angle: f32,
    /// degrees of lean toward the travel direction
    pub travel_angle: f32,
    /// mm
    pub arc_length: f32,
    /// mm
    pub distance_to_target: f32,
}

/// One recorded frame of a weld.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldSample {
    pub position: Vec3f,
    pub travel_speed: f32,
    pub work_angle: f32,
    pub travel_angle: f32,
    pub arc_length: f32,
    pub distance_to_target: f32,
    /// ms since the weld started
    pub timestamp_ms: f32,
}

impl WeldSample {
    pub fn new(position: Vec3f, params: SampleParams, timestamp_ms: f32) -> Self {
        Self {
            position,
            travel_speed: params.travel_speed,
            work_angle: params.work_angle,
            travel_angle: params.travel_angle,
            arc_length: params.arc_length,
            distance_to_target: params.distance_to_target,
            timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    Porosity,
    Undercut,
    Overlap,
    IncompleteFusion,
    Spatter,
}

impl DefectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DefectKind::Porosity => "porosity",
            DefectKind::Undercut => "undercut",
            DefectKind::Overlap => "overlap",
            DefectKind::IncompleteFusion => "incomplete_fusion",
            DefectKind::Spatter => "spatter",
        }
    }

    pub fn cause(self) -> &'static str {
        match self {
            DefectKind::Porosity => "Travel speed too high; gas trapped in the cooling weld pool",
            DefectKind::Undercut => {
                "Work angle too far from perpendicular; base metal melted away at the toe"
            }
            DefectKind::Overlap => {
                "Travel speed too low; filler rolled over the base metal without fusing"
            }
            DefectKind::IncompleteFusion => "Arc too long; not enough heat reached the joint",
            DefectKind::Spatter => "Arc too short; the rod is stubbing and throwing droplets",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub kind: DefectKind,
    pub severity: Severity,
    /// Position along the seam, 0 = start, 1 = end.
    pub position: f32,
    pub cause: String,
}

/// Letter grade for a weld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    /// Threshold table: >=95 S, >=85 A, >=70 B, >=55 C, >=40 D, else F.
    pub fn from_score(score: u32) -> Self {
        match score {
            95.. => Rating::S,
            85..=94 => Rating::A,
            70..=84 => Rating::B,
            55..=69 => Rating::C,
            40..=54 => Rating::D,
            _ => Rating::F,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Rating::S => 'S',
            Rating::A => 'A',
            Rating::B => 'B',
            Rating::C => 'C',
            Rating::D => 'D',
            Rating::F => 'F',
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Component scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub speed: f32,
    pub angle: f32,
    pub arc: f32,
    pub accuracy: f32,
    pub consistency: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldQualityResult {
    pub overall_score: u32,
    pub rating: Rating,
    pub scores: SubScores,
    pub feedback: Vec<String>,
    pub defects: Vec<Defect>,
}

impl WeldQualityResult {
    pub const TOO_SHORT: &'static str =
        "Weld too short to evaluate. Keep the arc on the seam longer.";

    /// Result for a weld with fewer than two samples.
    pub fn too_short() -> Self {
        Self {
            overall_score: 0,
            rating: Rating::F,
            scores: SubScores::default(),
            feedback: vec![Self::TOO_SHORT.to_string()],
            defects: Vec::new(),
        }
    }

    pub fn has_defect(&self, kind: DefectKind) -> bool {
        self.defects.iter().any(|d| d.kind == kind)
    }
}
