use super::types::{Defect, DefectKind, Severity, WeldSample};
use crate::WeldSpec;

/// Flags every sample against the defect thresholds, merging same-kind hits
/// that land within `spec.defect_dedup_threshold` of an existing one.
pub(super) fn scan_defects(samples: &[WeldSample], spec: &WeldSpec) -> Vec<Defect> {
    let mut defects: Vec<Defect> = Vec::new();
    let total = samples.len() as f32;

    for (i, s) in samples.iter().enumerate() {
        let position = i as f32 / total;
        for (kind, severity) in classify(s, spec) {
            let duplicate = defects.iter().any(|d| {
                d.kind == kind && (d.position - position).abs() < spec.defect_dedup_threshold
            });
            if !duplicate {
                defects.push(Defect {
                    kind,
                    severity,
                    position,
                    cause: kind.cause().to_string(),
                });
            }
        }
    }
    defects
}

fn classify(s: &WeldSample, spec: &WeldSpec) -> impl Iterator<Item = (DefectKind, Severity)> {
    let ideal_speed = spec.ideal_travel_speed;
    let porosity = (s.travel_speed > 1.5 * ideal_speed)
        .then(|| (DefectKind::Porosity, tier(s.travel_speed > 2.0 * ideal_speed)));

    let angle_dev = (s.work_angle - spec.ideal_work_angle).abs();
    let tol = spec.work_angle_tolerance;
    let undercut =
        (angle_dev > 2.0 * tol).then(|| (DefectKind::Undercut, tier(angle_dev > 3.0 * tol)));

    let overlap = (s.travel_speed < 0.5 * ideal_speed)
        .then(|| (DefectKind::Overlap, tier(s.travel_speed < 0.3 * ideal_speed)));

    let arc = spec.ideal_arc_length;
    let arc_tol = spec.arc_length_tolerance;
    let fusion = (s.arc_length > arc + 2.0 * arc_tol)
        .then(|| (DefectKind::IncompleteFusion, tier(s.arc_length > arc + 3.0 * arc_tol)));

    let spatter = (s.arc_length < arc - 1.5 * arc_tol)
        .then_some((DefectKind::Spatter, Severity::Minor));

    [porosity, undercut, overlap, fusion, spatter].into_iter().flatten()
}

fn tier(severe: bool) -> Severity {
    if severe {
        Severity::Severe
    } else {
        Severity::Moderate
    }
}

pub(super) fn severity_penalty(defects: &[Defect], spec: &WeldSpec) -> f32 {
    defects
        .iter()
        .map(|d| match d.severity {
            Severity::Severe => spec.severe_penalty,
            Severity::Moderate => spec.moderate_penalty,
            Severity::Minor => spec.minor_penalty,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weld::types::SampleParams;
    use crate::{presets, Vec3f};

    fn sample(travel_speed: f32, work_angle: f32, arc_length: f32) -> WeldSample {
        let params = SampleParams {
            travel_speed,
            work_angle,
            travel_angle: 15.0,
            arc_length,
            distance_to_target: 0.0,
        };
        WeldSample::new(Vec3f::ZERO, params, 0.0)
    }

    #[test]
    fn thresholds_pick_severity() {
        let spec = presets::wet_stick_weld();
        let fast = scan_defects(&[sample(0.25, 90.0, 3.0)], &spec);
        assert_eq!(fast.len(), 1);
        assert_eq!((fast[0].kind, fast[0].severity), (DefectKind::Porosity, Severity::Moderate));

        let very_fast = scan_defects(&[sample(0.31, 90.0, 3.0)], &spec);
        assert_eq!(very_fast[0].severity, Severity::Severe);

        let slow = scan_defects(&[sample(0.04, 90.0, 3.0)], &spec);
        assert_eq!((slow[0].kind, slow[0].severity), (DefectKind::Overlap, Severity::Severe));

        let tilted = scan_defects(&[sample(0.15, 65.0, 3.0)], &spec);
        assert_eq!(
            (tilted[0].kind, tilted[0].severity),
            (DefectKind::Undercut, Severity::Moderate)
        );

        let long_arc = scan_defects(&[sample(0.15, 90.0, 6.5)], &spec);
        assert_eq!(
            (long_arc[0].kind, long_arc[0].severity),
            (DefectKind::IncompleteFusion, Severity::Severe)
        );

        let short_arc = scan_defects(&[sample(0.15, 90.0, 1.0)], &spec);
        assert_eq!(
            (short_arc[0].kind, short_arc[0].severity),
            (DefectKind::Spatter, Severity::Minor)
        );
    }

    #[test]
    fn one_sample_can_carry_several_kinds() {
        let spec = presets::wet_stick_weld();
        let d = scan_defects(&[sample(0.4, 50.0, 7.0)], &spec);
        let kinds: Vec<_> = d.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DefectKind::Porosity,
                DefectKind::Undercut,
                DefectKind::IncompleteFusion
            ]
        );
    }

    #[test]
    fn nearby_same_kind_hits_are_merged() {
        let spec = presets::wet_stick_weld();
        let th = spec.defect_dedup_threshold;
        // 20 samples step by 0.05, so roughly every other index survives.
        let samples = vec![sample(0.4, 90.0, 3.0); 20];
        let d = scan_defects(&samples, &spec);
        assert!(d.len() < samples.len() && d.len() >= 9, "kept {}", d.len());
        for pair in d.windows(2) {
            assert!(pair[1].position - pair[0].position >= th - 1e-6);
        }
        // Every flagged sample is represented by a kept defect nearby.
        for i in 0..samples.len() {
            let p = i as f32 / samples.len() as f32;
            assert!(d.iter().any(|k| (k.position - p).abs() <= th + 1e-6), "uncovered at {p}");
        }
    }

    #[test]
    fn wider_threshold_merges_more() {
        let mut spec = presets::wet_stick_weld();
        spec.defect_dedup_threshold = 0.5;
        let samples = vec![sample(0.4, 90.0, 3.0); 20];
        assert_eq!(scan_defects(&samples, &spec).len(), 2);
    }

    #[test]
    fn penalties_sum_by_severity() {
        let spec = presets::wet_stick_weld();
        let d = scan_defects(&[sample(0.4, 50.0, 1.0)], &spec);
        // severe porosity + severe undercut + minor spatter
        assert_eq!(severity_penalty(&d, &spec), 15.0 + 15.0 + 3.0);
    }
}
