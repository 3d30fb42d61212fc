use super::types::{Defect, DefectKind, SubScores};

const PRAISE: f32 = 90.0;
const CRITIQUE: f32 = 50.0;

struct Lines {
    praise: &'static str,
    critique: &'static str,
}

const SPEED: Lines = Lines {
    praise: "Excellent travel speed: steady and on pace.",
    critique: "Travel speed was off. Aim for a slow, even pace along the seam.",
};
const ANGLE: Lines = Lines {
    praise: "Great torch angle control.",
    critique: "Torch angle wandered. Keep the rod near perpendicular with a slight drag.",
};
const ARC: Lines = Lines {
    praise: "Arc length held tight and consistent.",
    critique: "Arc length was unstable. Hold a constant gap between rod and plate.",
};
const ACCURACY: Lines = Lines {
    praise: "Bead placed right on the seam.",
    critique: "The bead drifted off the seam. Track the joint line more closely.",
};
const CONSISTENCY: Lines = Lines {
    praise: "Very consistent technique from start to finish.",
    critique: "Technique varied a lot across the weld. Smooth out your hand movements.",
};

// Defect kinds that come with a corrective tip, in the order tips are given.
const TIPS: [(DefectKind, &str); 4] = [
    (
        DefectKind::Porosity,
        "Porosity found: slow down so gas can escape before the pool freezes.",
    ),
    (
        DefectKind::Undercut,
        "Undercut found: straighten the work angle toward 90 degrees.",
    ),
    (
        DefectKind::Overlap,
        "Overlap found: speed up so the filler fuses instead of piling up.",
    ),
    (
        DefectKind::IncompleteFusion,
        "Incomplete fusion found: shorten the arc to put more heat into the joint.",
    ),
];

pub(super) fn build_feedback(scores: &SubScores, defects: &[Defect]) -> Vec<String> {
    let mut out = Vec::new();
    for (score, lines) in [
        (scores.speed, &SPEED),
        (scores.angle, &ANGLE),
        (scores.arc, &ARC),
        (scores.accuracy, &ACCURACY),
        (scores.consistency, &CONSISTENCY),
    ] {
        if score >= PRAISE {
            out.push(lines.praise.to_string());
        } else if score < CRITIQUE {
            out.push(lines.critique.to_string());
        }
    }
    for (kind, tip) in TIPS {
        if defects.iter().any(|d| d.kind == kind) {
            out.push(tip.to_string());
        }
    }
    out
}
