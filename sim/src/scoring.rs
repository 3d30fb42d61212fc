//! Points and combo multiplier awarded for graded welds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Rating, ScoringSpec, WeldQualityResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub total: u64,
    /// Always within [1, max_multiplier].
    pub multiplier: f32,
    pub combo_active: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            total: 0,
            multiplier: 1.0,
            combo_active: false,
        }
    }
}

/// What one `process_weld` call paid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldAward {
    pub points: u64,
    pub rating: Rating,
    pub multiplier_before: f32,
    pub multiplier_after: f32,
}

fn rating_bonus(rating: Rating) -> f32 {
    match rating {
        Rating::S => 2.0,
        Rating::A => 1.5,
        Rating::B => 1.2,
        Rating::C => 1.0,
        Rating::D => 0.8,
        Rating::F => 0.5,
    }
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    spec: ScoringSpec,
    state: ScoreState,
}

impl ScoringEngine {
    pub fn new(spec: ScoringSpec) -> Self {
        Self {
            spec,
            state: ScoreState::default(),
        }
    }

    pub fn spec(&self) -> &ScoringSpec {
        &self.spec
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    pub fn total(&self) -> u64 {
        self.state.total
    }

    pub fn multiplier(&self) -> f32 {
        self.state.multiplier
    }

    pub fn combo_active(&self) -> bool {
        self.state.combo_active
    }

    /// Pays out a graded weld at the current multiplier, then moves the
    /// multiplier by rating: S/A/B raise it, C holds, D/F lower it.
    pub fn process_weld(&mut self, result: &WeldQualityResult) -> WeldAward {
        let spec = &self.spec;
        let before = self.state.multiplier;

        let base = spec.base_points * (result.overall_score.min(100) as f32 / 100.0);
        let points = (base * rating_bonus(result.rating) * before).round().max(0.0) as u64;
        self.state.total = self.state.total.saturating_add(points);

        let inc = spec.multiplier_increment;
        let after = match result.rating {
            Rating::S => before + inc * 2.0,
            Rating::A => before + inc * 1.5,
            Rating::B => before + inc,
            Rating::C => before,
            Rating::D | Rating::F => before - inc,
        };
        self.state.multiplier = after.clamp(1.0, spec.max_multiplier.max(1.0));
        self.state.combo_active = true;

        debug!(
            points,
            rating = %result.rating,
            multiplier = self.state.multiplier,
            total = self.state.total,
            "weld scored"
        );

        WeldAward {
            points,
            rating: result.rating,
            multiplier_before: before,
            multiplier_after: self.state.multiplier,
        }
    }

    /// Bleeds the multiplier back toward 1 while a combo is running.
    pub fn update(&mut self, dt: f32) {
        if !self.state.combo_active || dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.state.multiplier -= self.spec.decay_rate * dt;
        if self.state.multiplier <= 1.0 {
            self.state.multiplier = 1.0;
            self.state.combo_active = false;
            debug!("combo expired");
        }
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }
}
