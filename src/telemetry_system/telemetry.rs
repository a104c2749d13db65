use std::fmt;
use std::str::FromStr;

use log::info;

use crate::control::environment::{CelestialBody, EnvironmentClass};
use crate::control::rocket::FlightPhase;

/// Per-tick outputs for the host to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSnapshot {
    pub flight_time: f64,           // s
    pub altitude: f64,              // m
    pub vertical_velocity: f64,     // m/s, positive down
    pub vertical_acceleration: f64, // m/s², positive down
    pub thrust_accel: f64,          // m/s², positive down
    pub fuel_mass: f64,             // kg
    pub phase: FlightPhase,
    pub environment: EnvironmentClass,
    pub body: CelestialBody,
}

impl FlightSnapshot {
    pub fn metric(&self, metric: ChartMetric) -> f64 {
        match metric {
            ChartMetric::Altitude => self.altitude,
            ChartMetric::Velocity => self.vertical_velocity,
            ChartMetric::Acceleration => self.vertical_acceleration,
        }
    }
}

/// Series the host charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMetric {
    #[default]
    Altitude,
    Velocity,
    Acceleration,
}

impl ChartMetric {
    pub fn unit(&self) -> &'static str {
        match self {
            ChartMetric::Altitude => "m",
            ChartMetric::Velocity => "m/s",
            ChartMetric::Acceleration => "m/s²",
        }
    }
}

impl fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartMetric::Altitude => "altitude",
            ChartMetric::Velocity => "velocity",
            ChartMetric::Acceleration => "acceleration",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "altitude" => Ok(ChartMetric::Altitude),
            "velocity" => Ok(ChartMetric::Velocity),
            "acceleration" => Ok(ChartMetric::Acceleration),
            other => Err(format!(
                "unknown metric '{other}', expected altitude, velocity or acceleration"
            )),
        }
    }
}

/// Flight recorder: one snapshot per tick plus running extremes.
pub struct Telemetry {
    samples: Vec<FlightSnapshot>,
    max_speed: f64,
    max_altitude: f64,
    min_fuel: f64,
    max_acceleration: f64,
    phase_times: Vec<(FlightPhase, f64)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            samples: Vec::new(),
            max_speed: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            max_acceleration: 0.0,
            phase_times: Vec::new(),
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn record(&mut self, snapshot: FlightSnapshot) {
        self.max_speed = self.max_speed.max(snapshot.vertical_velocity.abs());
        self.max_altitude = self.max_altitude.max(snapshot.altitude);
        self.min_fuel = self.min_fuel.min(snapshot.fuel_mass);
        self.max_acceleration = self
            .max_acceleration
            .max(snapshot.vertical_acceleration.abs());

        let phase_changed = self
            .phase_times
            .last()
            .map_or(true, |(last_phase, _)| *last_phase != snapshot.phase);
        if phase_changed {
            self.phase_times.push((snapshot.phase, snapshot.flight_time));
        }

        self.samples.push(snapshot);
    }

    pub fn clear(&mut self) {
        *self = Telemetry::new();
    }

    pub fn samples(&self) -> &[FlightSnapshot] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(flight_time, value)` pairs for the chosen chart metric.
    pub fn series(&self, metric: ChartMetric) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|sample| (sample.flight_time, sample.metric(metric)))
            .collect()
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn min_fuel(&self) -> Option<f64> {
        (!self.samples.is_empty()).then_some(self.min_fuel)
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn phase_times(&self) -> &[(FlightPhase, f64)] {
        &self.phase_times
    }

    pub fn display_summary(&self) {
        info!("--- Simulation Summary ---");
        info!("Samples: {}", self.samples.len());
        info!("Max Speed: {:.2} m/s", self.max_speed);
        info!("Max Altitude: {}", Self::format_altitude(self.max_altitude));
        if let Some(min_fuel) = self.min_fuel() {
            info!("Min Fuel: {:.2} kg", min_fuel);
        }
        info!("Max Acceleration: {:.2} m/s²", self.max_acceleration);

        info!("--- Phase Transitions ---");
        for (phase, time) in &self.phase_times {
            info!("{:?} at {}", phase, Self::format_time(*time));
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(flight_time: f64, altitude: f64, velocity: f64, phase: FlightPhase) -> FlightSnapshot {
        FlightSnapshot {
            flight_time,
            altitude,
            vertical_velocity: velocity,
            vertical_acceleration: -10.0,
            thrust_accel: -20.0,
            fuel_mass: 1_000.0 - flight_time * 10.0,
            phase,
            environment: EnvironmentClass::Air,
            body: CelestialBody::Earth,
        }
    }

    #[test]
    fn test_record_tracks_extremes() {
        let mut telemetry = Telemetry::new();
        assert!(telemetry.is_empty());
        assert_eq!(telemetry.min_fuel(), None);

        telemetry.record(sample(1.0, 10.0, -10.0, FlightPhase::Ascending));
        telemetry.record(sample(2.0, 30.0, -25.0, FlightPhase::Ascending));
        telemetry.record(sample(3.0, 20.0, 5.0, FlightPhase::Descending));

        assert_eq!(telemetry.len(), 3);
        assert_eq!(telemetry.max_altitude(), 30.0);
        assert_eq!(telemetry.max_speed(), 25.0);
        assert_eq!(telemetry.min_fuel(), Some(970.0));
        assert_eq!(telemetry.max_acceleration(), 10.0);
    }

    #[test]
    fn test_phase_transitions_recorded_once() {
        let mut telemetry = Telemetry::new();
        telemetry.record(sample(1.0, 10.0, -10.0, FlightPhase::Ascending));
        telemetry.record(sample(2.0, 20.0, -5.0, FlightPhase::Ascending));
        telemetry.record(sample(3.0, 15.0, 5.0, FlightPhase::Descending));
        telemetry.record(sample(4.0, 0.0, 0.0, FlightPhase::Landed));

        assert_eq!(
            telemetry.phase_times(),
            &[
                (FlightPhase::Ascending, 1.0),
                (FlightPhase::Descending, 3.0),
                (FlightPhase::Landed, 4.0)
            ]
        );
    }

    #[test]
    fn test_series_selects_metric() {
        let mut telemetry = Telemetry::new();
        telemetry.record(sample(1.0, 10.0, -10.0, FlightPhase::Ascending));
        telemetry.record(sample(2.0, 30.0, -25.0, FlightPhase::Ascending));

        assert_eq!(
            telemetry.series(ChartMetric::Altitude),
            vec![(1.0, 10.0), (2.0, 30.0)]
        );
        assert_eq!(
            telemetry.series(ChartMetric::Velocity),
            vec![(1.0, -10.0), (2.0, -25.0)]
        );
        assert_eq!(
            telemetry.series(ChartMetric::Acceleration),
            vec![(1.0, -10.0), (2.0, -10.0)]
        );
    }

    #[test]
    fn test_clear() {
        let mut telemetry = Telemetry::new();
        telemetry.record(sample(1.0, 10.0, -10.0, FlightPhase::Ascending));
        telemetry.clear();
        assert!(telemetry.is_empty());
        assert!(telemetry.phase_times().is_empty());
        assert_eq!(telemetry.max_altitude(), 0.0);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("Altitude".parse::<ChartMetric>(), Ok(ChartMetric::Altitude));
        assert_eq!("velocity".parse::<ChartMetric>(), Ok(ChartMetric::Velocity));
        assert_eq!(
            "acceleration".parse::<ChartMetric>(),
            Ok(ChartMetric::Acceleration)
        );
        assert!("jerk".parse::<ChartMetric>().is_err());
        assert_eq!(ChartMetric::Velocity.to_string(), "velocity");
        assert_eq!(ChartMetric::Acceleration.unit(), "m/s²");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(Telemetry::format_time(12.5), "12.50s");
        assert_eq!(Telemetry::format_time(75.0), "1m 15.00s");
        assert_eq!(Telemetry::format_altitude(950.0), "950.00 m");
        assert_eq!(Telemetry::format_altitude(1_500.0), "1.50 km");
    }
}
