use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use sim::{ArmInput, ThrustCommand};

use crate::rig::ControlFrame;

// Cancels the default hull's net buoyancy so it hovers while welding.
const HOVER_TRIM: f32 = -0.0245;

/// One held set of controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase {
    pub name: String,
    pub seconds: f32,
    pub thrust: ThrustCommand,
    pub arm: ArmInput,
    pub torch: bool,
}

impl Default for Phase {
    fn default() -> Self {
        Self {
            name: String::new(),
            seconds: 1.0,
            thrust: ThrustCommand::default(),
            arm: ArmInput::default(),
            torch: false,
        }
    }
}

impl Phase {
    pub fn frame(&self) -> ControlFrame {
        ControlFrame {
            thrust: self.thrust,
            arm: self.arm,
            torch: self.torch,
        }
    }
}

/// A fixed-rate sequence of phases, played in order.
///
/// Past the last phase the controls go idle (no thrust, torch off).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub tick_hz: f32,
    pub phases: Vec<Phase>,
}

impl Default for Script {
    fn default() -> Self {
        let hover = ThrustCommand { vertical: HOVER_TRIM, ..ThrustCommand::default() };
        Self {
            tick_hz: 60.0,
            phases: vec![
                Phase { name: "settle".into(), seconds: 1.0, thrust: hover, ..Phase::default() },
                Phase {
                    name: "approach".into(),
                    seconds: 1.5,
                    thrust: ThrustCommand { strafe: 0.05, ..hover },
                    ..Phase::default()
                },
                Phase {
                    name: "strafe bead".into(),
                    seconds: 2.0,
                    thrust: ThrustCommand { strafe: 0.02, ..hover },
                    torch: true,
                    ..Phase::default()
                },
                Phase {
                    name: "brake".into(),
                    seconds: 1.5,
                    thrust: ThrustCommand { strafe: -0.05, ..hover },
                    ..Phase::default()
                },
                Phase {
                    name: "arm sweep".into(),
                    seconds: 2.0,
                    thrust: hover,
                    arm: ArmInput { yaw: 0.1, ..ArmInput::default() },
                    torch: true,
                },
                Phase { name: "cool down".into(), seconds: 1.0, thrust: hover, ..Phase::default() },
            ],
        }
    }
}

impl Script {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_hz.is_finite() && self.tick_hz > 0.0,
            "tick_hz must be positive (got {})",
            self.tick_hz
        );
        for (i, p) in self.phases.iter().enumerate() {
            ensure!(
                p.seconds.is_finite() && p.seconds >= 0.0,
                "phase {i} ({}) has invalid duration {}",
                p.name,
                p.seconds
            );
        }
        Ok(())
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    pub fn phase_ticks(&self, phase: &Phase) -> u64 {
        (phase.seconds * self.tick_hz).round() as u64
    }

    pub fn total_ticks(&self) -> u64 {
        self.phases.iter().map(|p| self.phase_ticks(p)).sum()
    }

    /// Phase active at `tick`, or `None` once the script has run out.
    pub fn phase_at(&self, tick: u64) -> Option<&Phase> {
        let mut start = 0;
        for phase in &self.phases {
            let end = start + self.phase_ticks(phase);
            if tick < end {
                return Some(phase);
            }
            start = end;
        }
        None
    }

    pub fn frame_at(&self, tick: u64) -> ControlFrame {
        self.phase_at(tick).map(Phase::frame).unwrap_or_default()
    }
}
