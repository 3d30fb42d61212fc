use super::defects::{scan_defects, severity_penalty};
use super::feedback::build_feedback;
use super::stats::mean_variance;
use super::types::{Rating, SubScores, WeldQualityResult, WeldSample};
use crate::WeldSpec;

const W_SPEED: f32 = 0.20;
const W_ANGLE: f32 = 0.25;
const W_ARC: f32 = 0.20;
const W_ACCURACY: f32 = 0.20;
const W_CONSISTENCY: f32 = 0.15;

const W_WORK_ANGLE: f32 = 0.6;
const W_TRAVEL_ANGLE: f32 = 0.4;

/// Grades a finished weld. Pure: the same samples always give the same result.
///
/// Fewer than two samples cannot be graded and yield the fixed "too short" F.
pub fn analyze_weld_quality(samples: &[WeldSample], spec: &WeldSpec) -> WeldQualityResult {
    if samples.len() < 2 {
        return WeldQualityResult::too_short();
    }

    let (speed_mean, speed_var) = mean_variance(samples.iter().map(|s| s.travel_speed));
    let (work_mean, _) = mean_variance(samples.iter().map(|s| s.work_angle));
    let (travel_mean, _) = mean_variance(samples.iter().map(|s| s.travel_angle));
    let (arc_mean, arc_var) = mean_variance(samples.iter().map(|s| s.arc_length));
    let (dist_mean, dist_var) = mean_variance(samples.iter().map(|s| s.distance_to_target));

    let speed = floor0(
        deviation_score(speed_mean, spec.ideal_travel_speed, spec.travel_speed_tolerance)
            - (speed_var * 1000.0).min(20.0),
    );

    let work = floor0(deviation_score(work_mean, spec.ideal_work_angle, spec.work_angle_tolerance));
    let travel = floor0(deviation_score(
        travel_mean,
        spec.ideal_travel_angle,
        spec.travel_angle_tolerance,
    ));
    let angle = W_WORK_ANGLE * work + W_TRAVEL_ANGLE * travel;

    let arc = floor0(
        deviation_score(arc_mean, spec.ideal_arc_length, spec.arc_length_tolerance)
            - (arc_var * 50.0).min(25.0),
    );

    let accuracy = floor0(100.0 - dist_mean * spec.accuracy_penalty_per_mm);

    let consistency = (floor0(100.0 - speed_var * 2000.0)
        + floor0(100.0 - arc_var * 100.0)
        + floor0(100.0 - dist_var * 50.0))
        / 3.0;

    let scores = SubScores {
        speed,
        angle,
        arc,
        accuracy,
        consistency,
    };

    let weighted = W_SPEED * speed
        + W_ANGLE * angle
        + W_ARC * arc
        + W_ACCURACY * accuracy
        + W_CONSISTENCY * consistency;

    let defects = scan_defects(samples, spec);
    let penalty = severity_penalty(&defects, spec);
    let overall_score = floor0(weighted - penalty).round().min(100.0) as u32;

    let feedback = build_feedback(&scores, &defects);

    WeldQualityResult {
        overall_score,
        rating: Rating::from_score(overall_score),
        scores,
        feedback,
        defects,
    }
}

/// 100 at the ideal, losing 50 points per tolerance of deviation.
fn deviation_score(mean: f32, ideal: f32, tolerance: f32) -> f32 {
    100.0 - ((mean - ideal).abs() / tolerance) * 50.0
}

// Also maps NaN to 0 so a bad sample cannot poison the grade.
fn floor0(v: f32) -> f32 {
    if v > 0.0 {
        v.min(100.0)
    } else {
        0.0
    }
}
