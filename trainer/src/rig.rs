use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sim::{
    check_proximity_to_target, derive_sample, ArmInput, ManipulatorKinematics, ScoringEngine,
    ThrustCommand, Vec3f, VehicleDynamics, VehicleState, WeldAward, WeldQualityEngine,
    WeldQualityResult, WorkSurface,
};

use crate::Config;

/// Everything one player's controls say for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlFrame {
    pub thrust: ThrustCommand,
    pub arm: ArmInput,
    pub torch: bool,
}

/// One finished weld and what it paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldRecord {
    /// Session time at the first sampled tick (s).
    pub started_at: f32,
    pub finished_at: f32,
    pub samples: usize,
    pub result: WeldQualityResult,
    pub award: WeldAward,
}

/// One player's vehicle, arm, torch and score, stepped in a fixed order.
///
/// Each rig owns its own component instances; co-op sessions simply run
/// several rigs side by side.
#[derive(Debug, Clone)]
pub struct Rig {
    id: usize,
    vehicle: VehicleDynamics,
    arm: ManipulatorKinematics,
    weld: WeldQualityEngine,
    scoring: ScoringEngine,
    surface: WorkSurface,
    targets: Vec<Vec3f>,
    torch_on: bool,
    /// Tip position at the end of the previous tick.
    prev_tip: Vec3f,
    weld_started_at: f32,
    elapsed: f32,
    welds: Vec<WeldRecord>,
}

impl Rig {
    pub fn new(cfg: &Config, id: usize) -> Self {
        let spawn = VehicleState {
            position: Vec3f::new(id as f32 * cfg.player_spacing, -cfg.spawn_depth, 0.0),
            ..VehicleState::default()
        };
        let vehicle = VehicleDynamics::with_state(cfg.sim.vehicle.clone(), spawn);
        let arm = ManipulatorKinematics::new(cfg.sim.arm.clone());

        let tip = arm.get_tip_position(spawn.position, spawn.orientation);
        let normal = cfg
            .surface_normal
            .unwrap_or_else(|| -arm.get_torch_direction(spawn.orientation))
            .normalize_or_zero();
        let normal = if normal == Vec3f::ZERO { Vec3f::Y } else { normal };
        let standoff = cfg.sim.weld.ideal_arc_length / 1000.0;
        let surface = WorkSurface { point: tip - normal * standoff, normal };

        let along = cfg.seam.direction - normal * cfg.seam.direction.dot(normal);
        let along = along.normalize_or_zero();
        let targets = (0..cfg.seam.points)
            .map(|i| surface.point + along * (cfg.seam.spacing * i as f32))
            .collect();

        debug!(id, ?tip, ?surface, "rig spawned");

        Self {
            id,
            vehicle,
            arm,
            weld: WeldQualityEngine::new(cfg.sim.weld.clone()),
            scoring: ScoringEngine::new(cfg.sim.scoring.clone()),
            surface,
            targets,
            torch_on: false,
            prev_tip: tip,
            weld_started_at: 0.0,
            elapsed: 0.0,
            welds: Vec::new(),
        }
    }

    /// Advances the rig by one tick.
    ///
    /// Order: thrust, vehicle, arm input, arm, weld clock, torch handling,
    /// combo decay. Returns the weld record when the torch went out this tick.
    pub fn tick(&mut self, dt: f32, frame: &ControlFrame) -> Option<&WeldRecord> {
        self.vehicle.apply_command(frame.thrust);
        self.vehicle.update(dt);

        self.arm.apply_input(frame.arm, dt);
        self.arm.update(dt);

        self.weld.update(dt);

        let tip = self.tip_position();
        let mut finished = false;
        match (self.torch_on, frame.torch) {
            (false, true) => {
                self.weld.start_weld();
                self.weld_started_at = self.elapsed;
                self.sample(tip, dt);
            }
            (true, true) => self.sample(tip, dt),
            (true, false) => {
                self.finish();
                finished = true;
            }
            (false, false) => {}
        }
        self.torch_on = frame.torch;
        self.prev_tip = tip;

        self.scoring.update(dt);
        if dt > 0.0 {
            self.elapsed += dt;
        }

        if finished {
            self.welds.last()
        } else {
            None
        }
    }

    /// Closes a weld left burning at the end of a session.
    pub fn extinguish(&mut self) -> Option<&WeldRecord> {
        if !self.torch_on {
            return None;
        }
        self.torch_on = false;
        self.finish();
        self.welds.last()
    }

    fn sample(&mut self, tip: Vec3f, dt: f32) {
        let dir = self.arm.get_torch_direction(self.vehicle.orientation());

        // No seam means free practice: accuracy is not judged.
        let distance_mm = check_proximity_to_target(tip, &self.targets)
            .map(|p| p.distance_mm())
            .unwrap_or(0.0);
        let params = derive_sample(Some(self.prev_tip), tip, dir, &self.surface, dt, distance_mm);
        self.weld.add_sample(tip, params);
    }

    fn finish(&mut self) {
        let samples = self.weld.sample_count();
        let result = self.weld.finish_weld();
        let award = self.scoring.process_weld(&result);

        info!(
            player = self.id,
            samples,
            score = result.overall_score,
            rating = %result.rating,
            defects = result.defects.len(),
            points = award.points,
            multiplier = award.multiplier_after,
            "weld graded"
        );
        for line in &result.feedback {
            debug!(player = self.id, "{line}");
        }

        self.welds.push(WeldRecord {
            started_at: self.weld_started_at,
            finished_at: self.elapsed,
            samples,
            result,
            award,
        });
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vehicle(&self) -> &VehicleDynamics {
        &self.vehicle
    }

    pub fn arm(&self) -> &ManipulatorKinematics {
        &self.arm
    }

    pub fn weld(&self) -> &WeldQualityEngine {
        &self.weld
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn surface(&self) -> &WorkSurface {
        &self.surface
    }

    pub fn targets(&self) -> &[Vec3f] {
        &self.targets
    }

    pub fn welds(&self) -> &[WeldRecord] {
        &self.welds
    }

    pub fn torch_on(&self) -> bool {
        self.torch_on
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tip_position(&self) -> Vec3f {
        self.arm
            .get_tip_position(self.vehicle.position(), self.vehicle.orientation())
    }
}
