use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sim::Vec3f;

use crate::rig::{Rig, WeldRecord};
use crate::Config;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub id: usize,
    pub total: u64,
    pub multiplier: f32,
    pub welds: Vec<WeldRecord>,
    pub final_position: Vec3f,
    pub final_depth: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub ticks: u64,
    pub seconds: f32,
    pub players: Vec<PlayerReport>,
}

impl SessionReport {
    /// Plain-text table, one line per weld.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "session: {} ticks, {:.2} s", self.ticks, self.seconds);
        for p in &self.players {
            let _ = writeln!(
                out,
                "player {}: {} points, x{:.2}, depth {:.2} m, {} weld(s)",
                p.id,
                p.total,
                p.multiplier,
                p.final_depth,
                p.welds.len()
            );
            for (i, w) in p.welds.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  #{i} {:>6.2}s..{:<6.2}s  {:>3} samples  score {:>3} [{}]  +{} pts  defects {}",
                    w.started_at,
                    w.finished_at,
                    w.samples,
                    w.result.overall_score,
                    w.result.rating,
                    w.award.points,
                    w.result.defects.len()
                );
            }
        }
        out
    }
}

/// Plays the config's script on `cfg.players` independent rigs.
///
/// With `ticks_override` the run is cut short or padded with idle ticks.
/// A weld still burning when the run ends is graded.
pub fn run_session(cfg: &Config, ticks_override: Option<u64>) -> Result<SessionReport> {
    cfg.validate().context("session config")?;

    let script = &cfg.script;
    let dt = script.dt();
    let ticks = ticks_override.unwrap_or_else(|| script.total_ticks());
    let mut rigs: Vec<Rig> = (0..cfg.players).map(|id| Rig::new(cfg, id)).collect();
    info!(players = rigs.len(), ticks, dt, "session starting");

    let mut current: Option<&str> = None;
    for tick in 0..ticks {
        let phase = script.phase_at(tick);
        let name = phase.map(|p| p.name.as_str());
        if name != current {
            debug!(tick, phase = name.unwrap_or("idle"), "phase change");
            current = name;
        }
        let frame = phase.map(|p| p.frame()).unwrap_or_default();
        for rig in rigs.iter_mut() {
            rig.tick(dt, &frame);
        }
    }
    for rig in rigs.iter_mut() {
        rig.extinguish();
    }

    let players = rigs
        .iter()
        .map(|rig| PlayerReport {
            id: rig.id(),
            total: rig.scoring().total(),
            multiplier: rig.scoring().multiplier(),
            welds: rig.welds().to_vec(),
            final_position: rig.vehicle().position(),
            final_depth: rig.vehicle().depth(),
        })
        .collect();

    let report = SessionReport {
        ticks,
        seconds: ticks as f32 * dt,
        players,
    };
    info!(ticks, seconds = report.seconds, "session finished");
    Ok(report)
}
