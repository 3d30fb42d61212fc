use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Vec3f;

/// Physical constants for a submersible hull class (SI units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    pub mass_kg: f32,
    pub displaced_volume_m3: f32,
    /// Water density (kg/m^3). Seawater ~1025.
    pub water_density: f32,
    pub gravity: f32,
    /// Full-stick thrust per body axis (N).
    pub thrust_forward_n: f32,
    pub thrust_strafe_n: f32,
    pub thrust_vertical_n: f32,
    /// Full-stick roll torque about body +Z (N·m).
    pub roll_torque_nm: f32,
    pub roll_inertia: f32,
    /// Linear angular damping (N·m·s/rad).
    pub angular_damping: f32,
    /// Quadratic drag: F = -c * |v| * v.
    pub drag_coefficient: f32,
    pub max_speed: f32,
    /// Per-component angular rate limit (rad/s).
    pub max_rotation_speed: f32,
    pub max_depth: f32,
    /// Largest timestep integrated in one update (s).
    pub max_dt: f32,
    pub atmospheric_pressure_kpa: f32,
}

impl VehicleSpec {
    /// Buoyant force minus weight (N, + up). Constant for a rigid hull.
    pub fn net_buoyancy_n(&self) -> f32 {
        let buoyant = self.water_density * self.displaced_volume_m3 * self.gravity;
        let weight = self.mass_kg * self.gravity;
        buoyant - weight
    }

    /// Speed at which quadratic drag balances a steady force of `force_n`.
    pub fn terminal_speed(&self, force_n: f32) -> f32 {
        if self.drag_coefficient <= 0.0 {
            return f32::INFINITY;
        }
        (force_n.abs() / self.drag_coefficient).sqrt()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("vehicle.mass_kg", self.mass_kg)?;
        non_negative("vehicle.displaced_volume_m3", self.displaced_volume_m3)?;
        positive("vehicle.water_density", self.water_density)?;
        non_negative("vehicle.gravity", self.gravity)?;
        non_negative("vehicle.thrust_forward_n", self.thrust_forward_n)?;
        non_negative("vehicle.thrust_strafe_n", self.thrust_strafe_n)?;
        non_negative("vehicle.thrust_vertical_n", self.thrust_vertical_n)?;
        non_negative("vehicle.roll_torque_nm", self.roll_torque_nm)?;
        positive("vehicle.roll_inertia", self.roll_inertia)?;
        non_negative("vehicle.angular_damping", self.angular_damping)?;
        positive("vehicle.drag_coefficient", self.drag_coefficient)?;
        positive("vehicle.max_speed", self.max_speed)?;
        positive("vehicle.max_rotation_speed", self.max_rotation_speed)?;
        positive("vehicle.max_depth", self.max_depth)?;
        positive("vehicle.max_dt", self.max_dt)?;
        non_negative("vehicle.atmospheric_pressure_kpa", self.atmospheric_pressure_kpa)
    }
}

impl Default for VehicleSpec {
    fn default() -> Self {
        presets::work_class_rov()
    }
}

/// Limits and rate for a single rotational joint (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    pub min: f32,
    pub max: f32,
    /// Peak angular rate at full stick (rad/s).
    pub max_speed: f32,
    /// Angle restored by `reset()`.
    pub rest: f32,
}

impl JointSpec {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        limit(field, self.min, self.max, self.rest)?;
        non_negative(field, self.max_speed)
    }
}

/// Linear extension of the forearm (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtensionSpec {
    pub min: f32,
    pub max: f32,
    pub max_speed: f32,
    pub rest: f32,
}

/// Geometry and joint configuration of the welding manipulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmSpec {
    /// Shoulder pivot relative to the vehicle origin, body frame.
    pub base_offset: Vec3f,
    pub upper_arm_length: f32,
    pub lower_arm_length: f32,
    /// Fixed bend of the torch nozzle away from the forearm axis (rad).
    pub nozzle_tilt: f32,
    pub base: JointSpec,
    pub shoulder: JointSpec,
    pub elbow: JointSpec,
    pub wrist: JointSpec,
    pub extension: ExtensionSpec,
    /// Exponential velocity smoothing rate (1/s).
    pub damping_rate: f32,
}

impl ArmSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("arm.upper_arm_length", self.upper_arm_length)?;
        non_negative("arm.lower_arm_length", self.lower_arm_length)?;
        self.base.validate("arm.base")?;
        self.shoulder.validate("arm.shoulder")?;
        self.elbow.validate("arm.elbow")?;
        self.wrist.validate("arm.wrist")?;
        let ext = &self.extension;
        limit("arm.extension", ext.min, ext.max, ext.rest)?;
        non_negative("arm.extension.max_speed", ext.max_speed)?;
        positive("arm.damping_rate", self.damping_rate)
    }
}

impl Default for ArmSpec {
    fn default() -> Self {
        presets::welding_arm()
    }
}

/// Largest accepted arc stability window.
pub const MAX_STABILITY_WINDOW: usize = 10_000;

/// Process window for a weld: ideals, tolerances and scoring constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldSpec {
    /// m/s
    pub ideal_travel_speed: f32,
    pub travel_speed_tolerance: f32,
    /// degrees
    pub ideal_work_angle: f32,
    pub work_angle_tolerance: f32,
    pub ideal_travel_angle: f32,
    pub travel_angle_tolerance: f32,
    /// mm
    pub ideal_arc_length: f32,
    pub arc_length_tolerance: f32,
    /// Score lost per mm of mean distance to the seam target.
    pub accuracy_penalty_per_mm: f32,
    /// Arc-length samples kept for the live stability readout.
    pub stability_window: usize,
    /// Same-kind defects closer than this (normalized seam position) are merged.
    pub defect_dedup_threshold: f32,
    pub severe_penalty: f32,
    pub moderate_penalty: f32,
    pub minor_penalty: f32,
}

impl WeldSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("weld.ideal_travel_speed", self.ideal_travel_speed)?;
        positive("weld.travel_speed_tolerance", self.travel_speed_tolerance)?;
        positive("weld.work_angle_tolerance", self.work_angle_tolerance)?;
        positive("weld.travel_angle_tolerance", self.travel_angle_tolerance)?;
        positive("weld.ideal_arc_length", self.ideal_arc_length)?;
        positive("weld.arc_length_tolerance", self.arc_length_tolerance)?;
        non_negative("weld.accuracy_penalty_per_mm", self.accuracy_penalty_per_mm)?;
        if self.stability_window < 3 {
            return Err(ConfigError::WindowTooSmall(self.stability_window));
        }
        if self.stability_window > MAX_STABILITY_WINDOW {
            return Err(ConfigError::WindowTooLarge {
                got: self.stability_window,
                max: MAX_STABILITY_WINDOW,
            });
        }
        let t = self.defect_dedup_threshold;
        if t.is_nan() || t <= 0.0 || t > 1.0 {
            return Err(ConfigError::DedupThreshold(t));
        }
        non_negative("weld.severe_penalty", self.severe_penalty)?;
        non_negative("weld.moderate_penalty", self.moderate_penalty)?;
        non_negative("weld.minor_penalty", self.minor_penalty)
    }
}

impl Default for WeldSpec {
    fn default() -> Self {
        presets::wet_stick_weld()
    }
}

/// Point and combo tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSpec {
    pub base_points: f32,
    pub multiplier_increment: f32,
    pub max_multiplier: f32,
    /// Multiplier lost per second while a combo is running.
    pub decay_rate: f32,
}

impl ScoringSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("scoring.base_points", self.base_points)?;
        non_negative("scoring.multiplier_increment", self.multiplier_increment)?;
        if self.max_multiplier.is_nan() || self.max_multiplier < 1.0 {
            return Err(ConfigError::MultiplierBelowOne(self.max_multiplier));
        }
        non_negative("scoring.decay_rate", self.decay_rate)
    }
}

impl Default for ScoringSpec {
    fn default() -> Self {
        presets::arcade_scoring()
    }
}

/// Full set of tunables for one rig. Every section falls back to its preset,
/// so a config file only has to name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub vehicle: VehicleSpec,
    pub arm: ArmSpec,
    pub weld: WeldSpec,
    pub scoring: ScoringSpec,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vehicle.validate()?;
        self.arm.validate()?;
        self.weld.validate()?;
        self.scoring.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written so NaN is rejected too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn limit(field: &'static str, min: f32, max: f32, rest: f32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedLimit { field, min, max });
    }
    if rest.is_nan() || rest < min || rest > max {
        return Err(ConfigError::RestOutOfRange { field, rest, min, max });
    }
    Ok(())
}

pub mod presets {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    // Small work-class ROV, slightly positively buoyant so a released
    // vehicle drifts back toward the surface.
    pub fn work_class_rov() -> VehicleSpec {
        let mass_kg = 1000.0;
        VehicleSpec {
            mass_kg,
            displaced_volume_m3: 0.98, // ~1004.5 kg of seawater
            water_density: 1025.0,
            gravity: 9.81,
            thrust_forward_n: 2400.0,
            thrust_strafe_n: 1600.0,
            thrust_vertical_n: 1800.0,
            roll_torque_nm: 400.0,
            roll_inertia: 250.0,
            angular_damping: 300.0,
            drag_coefficient: 200.0,
            max_speed: 5.0,
            max_rotation_speed: 0.8, // ~46 deg/s
            max_depth: 300.0,
            max_dt: 0.1,
            atmospheric_pressure_kpa: 101.325,
        }
    }

    pub fn welding_arm() -> ArmSpec {
        ArmSpec {
            base_offset: Vec3f::new(0.0, -0.35, 0.9),
            upper_arm_length: 0.6,
            lower_arm_length: 0.5,
            nozzle_tilt: 0.3,
            base: JointSpec { min: -FRAC_PI_2, max: FRAC_PI_2, max_speed: 1.0, rest: 0.0 },
            shoulder: JointSpec { min: -FRAC_PI_4, max: 1.2, max_speed: 0.8, rest: 0.35 },
            elbow: JointSpec { min: -2.2, max: 0.4, max_speed: 0.8, rest: -0.7 },
            wrist: JointSpec { min: -PI, max: PI, max_speed: 2.0, rest: 0.0 },
            extension: ExtensionSpec { min: 0.0, max: 0.4, max_speed: 0.2, rest: 0.0 },
            damping_rate: 8.0,
        }
    }

    pub fn wet_stick_weld() -> WeldSpec {
        WeldSpec {
            ideal_travel_speed: 0.15,
            travel_speed_tolerance: 0.05,
            ideal_work_angle: 90.0,
            work_angle_tolerance: 10.0,
            ideal_travel_angle: 15.0,
            travel_angle_tolerance: 10.0,
            ideal_arc_length: 3.0,
            arc_length_tolerance: 1.0,
            accuracy_penalty_per_mm: 10.0,
            stability_window: 20,
            defect_dedup_threshold: 0.1,
            severe_penalty: 15.0,
            moderate_penalty: 8.0,
            minor_penalty: 3.0,
        }
    }

    pub fn arcade_scoring() -> ScoringSpec {
        ScoringSpec {
            base_points: 1000.0,
            multiplier_increment: 0.25,
            max_multiplier: 5.0,
            decay_rate: 0.1,
        }
    }
}
