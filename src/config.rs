use std::{fs, path::Path};

use serde::Deserialize;

use crate::constants::*;
use crate::errors::SimulationError;

/// Tuning knobs for the flight model. Every field has a documented unit and a
/// default; a TOML file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub drag_coefficient: f64,
    /// m²
    pub cross_section_area: f64,
    /// m/s², ceiling on commanded thrust acceleration
    pub max_thrust_accel: f64,
    /// m/s
    pub apogee_velocity_epsilon: f64,
    /// m/s, touchdown speed the guidance aims for
    pub landing_target_velocity: f64,
    /// m/s, impacts above this are crashes
    pub crash_velocity_threshold: f64,
    /// m/s, slower ground contact is treated as resting on the pad
    pub ground_contact_velocity: f64,
    /// s, guidance arms this many seconds of travel early
    pub safety_buffer_factor: f64,
    /// s per m/s²
    pub ramp_time_per_accel: f64,
    pub min_ramp_time: f64,
    pub max_ramp_time: f64,
    /// m
    pub guidance_min_altitude: f64,
    /// m
    pub space_boundary: f64,
    /// s
    pub max_substep: f64,
    /// s
    pub max_frame_dt: f64,
    pub debris_count: usize,
    pub debris_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            drag_coefficient: ROCKET_DRAG_COEFFICIENT,
            cross_section_area: ROCKET_CROSS_SECTIONAL_AREA,
            max_thrust_accel: MAX_THRUST_ACCELERATION,
            apogee_velocity_epsilon: APOGEE_VELOCITY_EPSILON,
            landing_target_velocity: LANDING_TARGET_VELOCITY,
            crash_velocity_threshold: CRASH_VELOCITY_THRESHOLD,
            ground_contact_velocity: GROUND_CONTACT_VELOCITY,
            safety_buffer_factor: SAFETY_BUFFER_FACTOR,
            ramp_time_per_accel: RAMP_TIME_PER_ACCEL,
            min_ramp_time: MIN_RAMP_TIME,
            max_ramp_time: MAX_RAMP_TIME,
            guidance_min_altitude: GUIDANCE_MIN_ALTITUDE,
            space_boundary: SPACE_BOUNDARY,
            max_substep: MAX_SUBSTEP,
            max_frame_dt: MAX_FRAME_DT,
            debris_count: DEBRIS_COUNT,
            debris_seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, SimulationError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_debris_seed(mut self, seed: u64) -> Self {
        self.debris_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("max_thrust_accel", self.max_thrust_accel),
            ("apogee_velocity_epsilon", self.apogee_velocity_epsilon),
            ("crash_velocity_threshold", self.crash_velocity_threshold),
            ("min_ramp_time", self.min_ramp_time),
            ("guidance_min_altitude", self.guidance_min_altitude),
            ("space_boundary", self.space_boundary),
            ("max_substep", self.max_substep),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::Config(format!(
                    "'{name}' must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("drag_coefficient", self.drag_coefficient),
            ("cross_section_area", self.cross_section_area),
            ("landing_target_velocity", self.landing_target_velocity),
            ("ground_contact_velocity", self.ground_contact_velocity),
            ("safety_buffer_factor", self.safety_buffer_factor),
            ("ramp_time_per_accel", self.ramp_time_per_accel),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimulationError::Config(format!(
                    "'{name}' must not be negative, got {value}"
                )));
            }
        }

        if self.max_ramp_time < self.min_ramp_time {
            return Err(SimulationError::Config(format!(
                "'max_ramp_time' ({}) is below 'min_ramp_time' ({})",
                self.max_ramp_time, self.min_ramp_time
            )));
        }

        Ok(())
    }
}
