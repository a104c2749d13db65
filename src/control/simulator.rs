use std::time::Instant;

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::SimulationConfig;
use crate::control::environment::EnvironmentConfig;
use crate::control::events::{CutoffReason, Debris, FlightEvent, LandingOutcome};
use crate::control::guidance::{GuidanceInput, LandingGuidance};
use crate::control::propulsion::{EngineConfig, PropulsionSystem};
use crate::control::rocket::RocketState;
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::{FlightSnapshot, Telemetry};
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::kinematics::{self, GroundContact};

fn debris_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Single-rocket flight simulation driven by per-frame `tick` calls.
pub struct FlightSimulator {
    config: SimulationConfig,
    state: RocketState,
    environment: EnvironmentConfig,
    propulsion: Option<PropulsionSystem>,
    aerodynamics: Aerodynamics,
    guidance: LandingGuidance,
    telemetry: Telemetry,
    rng: StdRng,
    engine_cutoff: bool,
    lifted_off: bool,
    apogee_altitude: Option<f64>,
    previous_velocity: f64,
    sample_index: usize,
}

impl FlightSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimulationConfig) -> Self {
        FlightSimulator {
            state: RocketState::at_rest(),
            environment: EnvironmentConfig::default(),
            propulsion: None,
            aerodynamics: Aerodynamics::from_config(&config),
            guidance: LandingGuidance::new(&config),
            telemetry: Telemetry::new(),
            rng: debris_rng(config.debris_seed),
            engine_cutoff: false,
            lifted_off: false,
            apogee_altitude: None,
            previous_velocity: 0.0,
            sample_index: 0,
            config,
        }
    }

    pub fn state(&self) -> &RocketState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    pub fn guidance(&self) -> &LandingGuidance {
        &self.guidance
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn apogee_altitude(&self) -> Option<f64> {
        self.apogee_altitude
    }

    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    pub fn launch(
        &mut self,
        engine: EngineConfig,
        environment: EnvironmentConfig,
    ) -> Result<(), SimulationError> {
        if self.state.is_launched {
            warn!("Launch requested while in flight, ignoring");
            return Err(SimulationError::FlightInProgress);
        }
        engine.validate()?;
        environment.validate()?;

        let propulsion = PropulsionSystem::new(engine, self.config.max_thrust_accel);

        self.state = RocketState {
            thrust_accel: propulsion.ignition_accel(),
            fuel_mass: engine.initial_fuel_mass_kg,
            dry_mass: engine.dry_mass_kg,
            is_launched: true,
            has_landed: false,
            launch_timestamp: Some(Instant::now()),
            ..RocketState::at_rest()
        };
        self.environment = environment;
        self.propulsion = Some(propulsion);
        self.clear_flight_markers();
        self.rng = debris_rng(self.config.debris_seed);

        info!(
            "Launch on {}: thrust {:.0} N, dry mass {:.0} kg, fuel {:.0} kg, burn {:.1} s, thrust accel {:.2} m/s²",
            environment.body,
            engine.thrust_newtons,
            engine.dry_mass_kg,
            engine.initial_fuel_mass_kg,
            engine.burn_duration_seconds,
            self.state.thrust_accel
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = RocketState::at_rest();
        self.environment = EnvironmentConfig::default();
        self.propulsion = None;
        self.clear_flight_markers();
        debug!("Simulator reset to rest");
    }

    fn clear_flight_markers(&mut self) {
        self.guidance.disarm();
        self.telemetry.clear();
        self.engine_cutoff = false;
        self.lifted_off = false;
        self.apogee_altitude = None;
        self.previous_velocity = 0.0;
        self.sample_index = 0;
    }

    /// Advances the flight by one frame of `delta_time` seconds.
    ///
    /// The frame is split into equal substeps no longer than `max_substep` so
    /// long frames cannot skip past the ground or the guidance engagement
    /// altitude.
    pub fn tick(&mut self, delta_time: f64) -> Vec<FlightEvent> {
        let mut events = Vec::new();
        if !self.state.is_airborne() {
            return events;
        }
        if !(delta_time.is_finite() && delta_time > 0.0) {
            debug!("Ignoring frame with dt = {delta_time}");
            return events;
        }

        let frame = if delta_time > self.config.max_frame_dt {
            warn!(
                "Frame of {delta_time:.3} s clamped to {:.3} s",
                self.config.max_frame_dt
            );
            self.config.max_frame_dt
        } else {
            delta_time
        };

        let substeps = (frame / self.config.max_substep).ceil().max(1.0) as usize;
        let step = frame / substeps as f64;
        for _ in 0..substeps {
            if !self.state.is_airborne() {
                break;
            }
            self.step(step, &mut events);
        }

        self.sample_index += 1;
        let snapshot = self.snapshot();
        self.telemetry.record(snapshot);
        events
    }

    fn step(&mut self, delta_time: f64, events: &mut Vec<FlightEvent>) {
        let Some(propulsion) = self.propulsion else {
            return;
        };
        let gravity = self.environment.surface_gravity;

        self.state.elapsed_flight_time += delta_time;

        // Engine cutoff. The burn limit only governs the ascent burn.
        if self.state.thrust_accel != 0.0 {
            if self.state.fuel_mass <= 0.0 {
                self.cut_engine(CutoffReason::FuelExhausted, events);
            } else if !self.guidance.is_armed()
                && propulsion.burn_complete(self.state.elapsed_flight_time)
            {
                self.cut_engine(CutoffReason::BurnComplete, events);
            }
        }

        self.check_apogee(events);

        let total_mass = self.state.total_mass();
        let air_density = self
            .environment
            .air_density(self.state.altitude, self.config.space_boundary);
        let drag_accel = self.aerodynamics.calculate_drag_accel(
            self.state.vertical_velocity,
            air_density,
            total_mass,
        );

        self.apply_guidance(&propulsion, gravity, drag_accel, delta_time, events);

        if propulsion.burn_fuel(&mut self.state, delta_time) {
            self.guidance.disarm();
            self.record_cutoff(CutoffReason::FuelExhausted, events);
        }

        self.previous_velocity = self.state.vertical_velocity;
        let touchdown_velocity = self.state.vertical_velocity;
        kinematics::integrate(&mut self.state, gravity, drag_accel, delta_time);
        if self.state.altitude > 0.0 {
            self.lifted_off = true;
        }

        match kinematics::resolve_ground_contact(
            &mut self.state,
            self.config.ground_contact_velocity,
        ) {
            GroundContact::Impact { velocity } => self.land(velocity, events),
            GroundContact::Resting if self.lifted_off => {
                // Settled back onto the ground slower than the contact threshold.
                self.land(touchdown_velocity.max(0.0), events)
            }
            GroundContact::Resting | GroundContact::Airborne => {}
        }
    }

    fn cut_engine(&mut self, reason: CutoffReason, events: &mut Vec<FlightEvent>) {
        self.state.thrust_accel = 0.0;
        self.record_cutoff(reason, events);
    }

    fn record_cutoff(&mut self, reason: CutoffReason, events: &mut Vec<FlightEvent>) {
        self.engine_cutoff = true;
        info!(
            "Engine cutoff ({:?}) at t = {:.2} s, altitude {:.1} m, fuel {:.1} kg",
            reason, self.state.elapsed_flight_time, self.state.altitude, self.state.fuel_mass
        );
        events.push(FlightEvent::EngineCutoff {
            flight_time: self.state.elapsed_flight_time,
            reason,
        });
    }

    /// Apogee is a coast-phase marker read from the velocity left by the
    /// previous step, before this step integrates.
    fn check_apogee(&mut self, events: &mut Vec<FlightEvent>) {
        if self.apogee_altitude.is_some()
            || !self.engine_cutoff
            || self.state.thrust_accel != 0.0
            || self.state.altitude <= 0.0
        {
            return;
        }

        let velocity = self.state.vertical_velocity;
        let near_zero = velocity.abs() < self.config.apogee_velocity_epsilon;
        let crossed = self.previous_velocity < 0.0 && velocity >= 0.0;
        if near_zero || crossed {
            let altitude = self.state.altitude;
            self.apogee_altitude = Some(altitude);
            info!(
                "Apogee {:.1} m at t = {:.2} s (sample {})",
                altitude, self.state.elapsed_flight_time, self.sample_index
            );
            events.push(FlightEvent::ApogeeReached {
                altitude,
                time_index: self.sample_index,
                flight_time: self.state.elapsed_flight_time,
            });
        }
    }

    fn apply_guidance(
        &mut self,
        propulsion: &PropulsionSystem,
        gravity: f64,
        drag_accel: f64,
        delta_time: f64,
        events: &mut Vec<FlightEvent>,
    ) {
        if self.state.fuel_mass <= 0.0 {
            return;
        }

        let input = GuidanceInput {
            altitude: self.state.altitude,
            velocity: self.state.vertical_velocity,
            gravity,
            drag_decel: drag_accel.abs(),
            available_accel: propulsion.available_accel(self.state.total_mass()),
        };

        if !self.guidance.is_armed()
            && self.state.thrust_accel == 0.0
            && self.state.is_descending()
            && self.state.altitude > 0.0
            && self.guidance.should_arm(&input)
        {
            self.guidance.arm(input.available_accel);
            info!(
                "Landing guidance armed at {:.1} m, descending at {:.1} m/s, commanding {:.2} m/s² over {:.2} s",
                input.altitude,
                input.velocity,
                self.guidance.commanded_accel(),
                self.guidance.ramp_time()
            );
            events.push(FlightEvent::GuidanceArmed {
                altitude: input.altitude,
                velocity: input.velocity,
                commanded_accel: self.guidance.commanded_accel(),
            });
        }

        if self.guidance.is_armed() {
            let previous = self.state.thrust_accel;
            self.state.thrust_accel = match self.guidance.command(&input, previous, delta_time) {
                Ok(thrust_accel) => thrust_accel,
                Err(err) => {
                    warn!("{err}; holding thrust at {previous:.2} m/s²");
                    previous
                }
            };
        }
    }

    fn land(&mut self, impact_velocity: f64, events: &mut Vec<FlightEvent>) {
        let outcome =
            LandingOutcome::classify(impact_velocity, self.config.crash_velocity_threshold);
        let debris = match outcome {
            LandingOutcome::Crash => {
                Debris::scatter(self.config.debris_count, impact_velocity, &mut self.rng)
            }
            LandingOutcome::Soft => Vec::new(),
        };

        self.state.altitude = 0.0;
        self.state.vertical_velocity = 0.0;
        self.state.vertical_acceleration = 0.0;
        self.state.thrust_accel = 0.0;
        self.state.has_landed = true;
        self.state.is_launched = false;
        self.guidance.disarm();

        match outcome {
            LandingOutcome::Soft => info!(
                "Landed safely at {:.2} m/s after {:.2} s",
                impact_velocity, self.state.elapsed_flight_time
            ),
            LandingOutcome::Crash => warn!(
                "Crashed at {:.2} m/s after {:.2} s, {} fragments",
                impact_velocity,
                self.state.elapsed_flight_time,
                debris.len()
            ),
        }

        events.push(FlightEvent::Landed {
            impact_velocity,
            outcome,
            debris,
        });
    }

    pub fn snapshot(&self) -> FlightSnapshot {
        FlightSnapshot {
            flight_time: self.state.elapsed_flight_time,
            altitude: self.state.altitude,
            vertical_velocity: self.state.vertical_velocity,
            vertical_acceleration: self.state.vertical_acceleration,
            thrust_accel: self.state.thrust_accel,
            fuel_mass: self.state.fuel_mass,
            phase: self.state.phase(),
            environment: self
                .environment
                .classify(self.state.altitude, self.config.space_boundary),
            body: self.environment.body,
        }
    }
}

impl Default for FlightSimulator {
    fn default() -> Self {
        Self::with_valid_config(SimulationConfig::default())
    }
}
