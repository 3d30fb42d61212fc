//! Headless orchestrator for the welding trainer simulation.
//!
//! Loads a TOML config, drives one [`Rig`] per player through a scripted
//! sequence of control phases and reports what each weld scored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use sim::{SimConfig, Vec3f};

mod rig;
mod script;
mod session;

pub use rig::{ControlFrame, Rig, WeldRecord};
pub use script::{Phase, Script};
pub use session::{run_session, PlayerReport, SessionReport};

#[derive(Parser, Debug, Clone)]
#[command(name = "trainer")]
#[command(about = "Headless runner for the underwater welding trainer", long_about = None)]
pub struct Args {
    /// Path to the trainer config (TOML)
    #[arg(long, default_value = "trainer.toml")]
    pub config: PathBuf,
    /// Replace the config's script with one loaded from this file
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Run exactly this many ticks instead of the script's length
    #[arg(long)]
    pub ticks_override: Option<u64>,
    /// Number of independent co-op rigs
    #[arg(long)]
    pub players: Option<usize>,
}

/// Seam the player is asked to follow, laid out on the plate from the point
/// directly below the torch at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeamConfig {
    pub points: usize,
    /// Distance between consecutive target points (m).
    pub spacing: f32,
    /// Projected onto the plate before use.
    pub direction: Vec3f,
}

impl Default for SeamConfig {
    fn default() -> Self {
        Self {
            points: 200,
            spacing: 0.002,
            direction: Vec3f::X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub players: usize,
    /// Spawn depth below the surface (m).
    pub spawn_depth: f32,
    /// Players spawn this far apart along world X (m).
    pub player_spacing: f32,
    /// Plate normal. Unset means the plate faces the torch at spawn. Either
    /// way the plate sits one ideal arc length from the tip.
    pub surface_normal: Option<Vec3f>,
    pub seam: SeamConfig,
    pub sim: SimConfig,
    pub script: Script,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 1,
            spawn_depth: 30.0,
            player_spacing: 5.0,
            surface_normal: None,
            seam: SeamConfig::default(),
            sim: SimConfig::default(),
            script: Script::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.sim.validate().context("invalid simulation parameters")?;
        ensure!(self.players >= 1, "players must be at least 1");
        ensure!(
            self.spawn_depth >= 0.0 && self.spawn_depth <= self.sim.vehicle.max_depth,
            "spawn_depth {} outside [0, {}]",
            self.spawn_depth,
            self.sim.vehicle.max_depth
        );
        ensure!(self.player_spacing.is_finite(), "player_spacing must be finite");
        if let Some(n) = self.surface_normal {
            ensure!(
                n.is_finite() && n.length() > 0.0,
                "surface_normal must be a non-zero vector"
            );
        }
        ensure!(
            self.seam.spacing.is_finite() && self.seam.spacing >= 0.0,
            "seam.spacing must be >= 0"
        );
        self.script.validate()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(cfg)
}

/// Loads a standalone script file (`tick_hz` plus `[[phases]]`).
pub fn load_script(path: &Path) -> Result<Script> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let script: Script =
        toml::from_str(&text).with_context(|| format!("parsing script {}", path.display()))?;
    script
        .validate()
        .with_context(|| format!("validating script {}", path.display()))?;
    Ok(script)
}
