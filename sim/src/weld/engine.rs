use std::collections::VecDeque;

use tracing::{debug, warn};

use super::analysis::analyze_weld_quality;
use super::proximity::{check_proximity_to_target, Proximity};
use super::stats::mean_variance;
use super::types::{SampleParams, WeldQualityResult, WeldSample};
use crate::{Vec3f, WeldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeldPhase {
    #[default]
    Idle,
    Welding,
}

// Windows larger than this grow on demand.
const PREALLOC: usize = 64;

/// Sliding window over recent arc lengths, reporting stability in [-1, 1]
/// (1 = rock steady, 0 = not enough data yet, -1 = stdDev of 2 mm or worse).
#[derive(Debug, Clone)]
pub struct ArcStabilityWindow {
    values: VecDeque<f32>,
    capacity: usize,
}

impl ArcStabilityWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.min(PREALLOC)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, arc_length: f32) -> f32 {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(arc_length);
        self.stability()
    }

    pub fn stability(&self) -> f32 {
        if self.values.len() < 3 {
            return 0.0;
        }
        let (_, var) = mean_variance(self.values.iter().copied());
        let normalized = (var.sqrt() / 2.0).clamp(0.0, 1.0);
        1.0 - 2.0 * normalized
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Collects samples while the torch is lit and grades the bead when it goes out.
#[derive(Debug, Clone)]
pub struct WeldQualityEngine {
    spec: WeldSpec,
    phase: WeldPhase,
    samples: Vec<WeldSample>,
    window: ArcStabilityWindow,
    stability: f32,
    elapsed_ms: f32,
}

impl WeldQualityEngine {
    pub fn new(spec: WeldSpec) -> Self {
        let window = ArcStabilityWindow::new(spec.stability_window);
        Self {
            spec,
            phase: WeldPhase::Idle,
            samples: Vec::new(),
            window,
            stability: 0.0,
            elapsed_ms: 0.0,
        }
    }

    pub fn spec(&self) -> &WeldSpec {
        &self.spec
    }

    pub fn state(&self) -> WeldPhase {
        self.phase
    }

    pub fn is_welding(&self) -> bool {
        self.phase == WeldPhase::Welding
    }

    /// Begins a fresh weld.
    ///
    /// Starting while already welding closes the running weld first and drops
    /// its grade: a torch relight without a release counts as a new bead.
    pub fn start_weld(&mut self) {
        if self.is_welding() {
            let discarded = self.finish_weld();
            debug!(score = discarded.overall_score, "weld restarted; previous result discarded");
        }
        self.clear_buffers();
        self.phase = WeldPhase::Welding;
        debug!("weld started");
    }

    /// Advances the weld clock. Only runs while welding.
    pub fn update(&mut self, dt: f32) {
        if self.is_welding() && dt > 0.0 {
            self.elapsed_ms += dt * 1000.0;
        }
    }

    /// Records one frame. Ignored while idle.
    pub fn add_sample(&mut self, position: Vec3f, params: SampleParams) {
        if !self.is_welding() {
            return;
        }
        self.samples
            .push(WeldSample::new(position, params, self.elapsed_ms));
        self.stability = self.window.push(params.arc_length);
    }

    /// Ends the weld and grades it. Always leaves the engine idle.
    pub fn finish_weld(&mut self) -> WeldQualityResult {
        if !self.is_welding() {
            warn!("finish_weld called while idle");
        }
        self.phase = WeldPhase::Idle;
        let result = analyze_weld_quality(&self.samples, &self.spec);
        debug!(
            samples = self.samples.len(),
            score = result.overall_score,
            rating = %result.rating,
            defects = result.defects.len(),
            "weld finished"
        );
        self.clear_buffers();
        result
    }

    /// Ends the weld without grading it.
    pub fn cancel_weld(&mut self) {
        if self.is_welding() {
            debug!(samples = self.samples.len(), "weld cancelled");
        }
        self.phase = WeldPhase::Idle;
        self.clear_buffers();
    }

    pub fn check_proximity_to_target(&self, tip: Vec3f, targets: &[Vec3f]) -> Option<Proximity> {
        check_proximity_to_target(tip, targets)
    }

    pub fn samples(&self) -> &[WeldSample] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn arc_stability(&self) -> f32 {
        self.stability
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    fn clear_buffers(&mut self) {
        self.samples.clear();
        self.window.clear();
        self.stability = 0.0;
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::Rating;

    fn params(arc_length: f32) -> SampleParams {
        SampleParams {
            travel_speed: 0.15,
            work_angle: 90.0,
            travel_angle: 15.0,
            arc_length,
            distance_to_target: 0.0,
        }
    }

    #[test]
    fn samples_ignored_while_idle() {
        let mut e = WeldQualityEngine::new(presets::wet_stick_weld());
        e.add_sample(Vec3f::ZERO, params(3.0));
        assert_eq!(e.sample_count(), 0);
        assert_eq!(e.state(), WeldPhase::Idle);
    }

    #[test]
    fn finish_with_one_sample_is_f() {
        let mut e = WeldQualityEngine::new(presets::wet_stick_weld());
        e.start_weld();
        e.add_sample(Vec3f::ZERO, params(3.0));
        let r = e.finish_weld();
        assert_eq!((r.overall_score, r.rating), (0, Rating::F));
        assert!(r.feedback[0].starts_with("Weld too short"));
        assert_eq!(e.state(), WeldPhase::Idle);
    }

    #[test]
    fn timestamps_follow_weld_clock() {
        let mut e = WeldQualityEngine::new(presets::wet_stick_weld());
        e.update(1.0); // idle: clock does not run
        e.start_weld();
        e.add_sample(Vec3f::ZERO, params(3.0));
        e.update(0.5);
        e.add_sample(Vec3f::ZERO, params(3.0));
        let ts: Vec<_> = e.samples().iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(ts, vec![0.0, 500.0]);
    }

    #[test]
    fn restart_discards_previous_weld() {
        let mut e = WeldQualityEngine::new(presets::wet_stick_weld());
        e.start_weld();
        for _ in 0..5 {
            e.add_sample(Vec3f::ZERO, params(3.0));
        }
        e.start_weld();
        assert!(e.is_welding());
        assert_eq!(e.sample_count(), 0);
        assert_eq!(e.arc_stability(), 0.0);
    }

    #[test]
    fn cancel_drops_samples() {
        let mut e = WeldQualityEngine::new(presets::wet_stick_weld());
        e.start_weld();
        e.add_sample(Vec3f::ZERO, params(3.0));
        e.cancel_weld();
        assert_eq!(e.state(), WeldPhase::Idle);
        assert_eq!(e.sample_count(), 0);
    }

    #[test]
    fn stability_needs_three_samples() {
        let mut w = ArcStabilityWindow::new(20);
        assert_eq!(w.push(3.0), 0.0);
        assert_eq!(w.push(3.0), 0.0);
        assert_eq!(w.push(3.0), 1.0);
    }

    #[test]
    fn stability_maps_std_dev_to_signed_range() {
        let mut w = ArcStabilityWindow::new(20);
        // Alternating +-1 mm: std dev 1 -> normalized 0.5 -> stability 0
        for i in 0..20 {
            w.push(if i % 2 == 0 { 2.0 } else { 4.0 });
        }
        assert!(w.stability().abs() < 1e-5, "s={}", w.stability());
        // Alternating +-3 mm saturates at -1
        for i in 0..20 {
            w.push(if i % 2 == 0 { 0.0 } else { 6.0 });
        }
        assert_eq!(w.stability(), -1.0);
    }

    #[test]
    fn oversized_window_builds_without_preallocating() {
        let mut w = ArcStabilityWindow::new(usize::MAX);
        for _ in 0..100 {
            w.push(3.0);
        }
        assert_eq!(w.len(), 100);
        assert_eq!(w.stability(), 1.0);
    }

    #[test]
    fn window_drops_oldest() {
        let mut w = ArcStabilityWindow::new(20);
        for _ in 0..20 {
            w.push(10.0);
        }
        for _ in 0..20 {
            w.push(3.0);
        }
        assert_eq!(w.len(), 20);
        assert_eq!(w.stability(), 1.0);
    }
}
