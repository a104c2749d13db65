use crate::constants::{DEFAULT_SPECIFIC_IMPULSE, STANDARD_GRAVITY};
use crate::control::rocket::RocketState;
use crate::errors::SimulationError;

/// Engine parameters captured once at launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub thrust_newtons: f64,
    pub dry_mass_kg: f64,
    pub initial_fuel_mass_kg: f64,
    pub specific_impulse_seconds: f64,
    pub burn_duration_seconds: f64,
}

impl EngineConfig {
    pub fn new(
        thrust_newtons: f64,
        dry_mass_kg: f64,
        initial_fuel_mass_kg: f64,
        burn_duration_seconds: f64,
    ) -> Self {
        EngineConfig {
            thrust_newtons,
            dry_mass_kg,
            initial_fuel_mass_kg,
            specific_impulse_seconds: DEFAULT_SPECIFIC_IMPULSE,
            burn_duration_seconds,
        }
    }

    pub fn with_specific_impulse(mut self, specific_impulse_seconds: f64) -> Self {
        self.specific_impulse_seconds = specific_impulse_seconds;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("thrust", self.thrust_newtons),
            ("dry mass", self.dry_mass_kg),
            ("fuel mass", self.initial_fuel_mass_kg),
            ("specific impulse", self.specific_impulse_seconds),
            ("burn duration", self.burn_duration_seconds),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SimulationError::InvalidParameter(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.dry_mass_kg <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "dry mass must be positive, got {} kg",
                self.dry_mass_kg
            )));
        }
        if self.initial_fuel_mass_kg < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "fuel mass cannot be negative, got {} kg",
                self.initial_fuel_mass_kg
            )));
        }
        if self.burn_duration_seconds < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "burn duration cannot be negative, got {} s",
                self.burn_duration_seconds
            )));
        }
        if self.thrust_newtons < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "thrust cannot be negative, got {} N",
                self.thrust_newtons
            )));
        }
        if self.specific_impulse_seconds <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "specific impulse must be positive, got {} s",
                self.specific_impulse_seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionSystem {
    pub config: EngineConfig,
    pub max_thrust_accel: f64,
}

impl PropulsionSystem {
    pub fn new(config: EngineConfig, max_thrust_accel: f64) -> Self {
        PropulsionSystem {
            config,
            max_thrust_accel,
        }
    }

    /// Upward acceleration magnitude the engine can deliver at `total_mass`,
    /// capped at the configured ceiling.
    pub fn available_accel(&self, total_mass: f64) -> f64 {
        if total_mass <= 0.0 {
            return 0.0;
        }
        (self.config.thrust_newtons / total_mass).min(self.max_thrust_accel)
    }

    /// Signed thrust acceleration at ignition (negative is upward).
    pub fn ignition_accel(&self) -> f64 {
        if self.config.initial_fuel_mass_kg <= 0.0 {
            return 0.0;
        }
        let total_mass = self.config.dry_mass_kg + self.config.initial_fuel_mass_kg;
        -self.available_accel(total_mass)
    }

    pub fn burn_complete(&self, elapsed: f64) -> bool {
        elapsed > self.config.burn_duration_seconds
    }

    /// Propellant mass flow in kg/s for a thrust force in newtons.
    pub fn mass_flow_rate(&self, thrust_force: f64) -> f64 {
        thrust_force / (self.config.specific_impulse_seconds * STANDARD_GRAVITY)
    }

    /// Depletes fuel for the commanded thrust over `delta_time`. Returns `true`
    /// when this burn emptied the tank; thrust is zeroed in that case.
    pub fn burn_fuel(&self, state: &mut RocketState, delta_time: f64) -> bool {
        if state.thrust_accel == 0.0 || state.fuel_mass <= 0.0 {
            return false;
        }

        let thrust_force = state.thrust_accel.abs() * state.total_mass();
        let fuel_consumed = self.mass_flow_rate(thrust_force) * delta_time;
        state.fuel_mass -= fuel_consumed;

        if state.fuel_mass <= 0.0 {
            state.fuel_mass = 0.0;
            state.thrust_accel = 0.0;
            true
        } else {
            false
        }
    }
}
