use std::time::Instant;

/// Physical state of the rocket.
///
/// Sign convention: `vertical_velocity`, `vertical_acceleration` and
/// `thrust_accel` are positive *downward*. A climbing rocket has negative
/// velocity and an engine pushing up has negative `thrust_accel`.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketState {
    pub altitude: f64,              // m
    pub vertical_velocity: f64,     // m/s
    pub vertical_acceleration: f64, // m/s²
    pub thrust_accel: f64,          // m/s²
    pub fuel_mass: f64,             // kg
    pub dry_mass: f64,              // kg
    pub is_launched: bool,
    pub has_landed: bool,
    pub launch_timestamp: Option<Instant>,
    pub elapsed_flight_time: f64, // s
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum FlightPhase {
    Idle,
    Ascending,
    Descending,
    Landed,
}

impl RocketState {
    pub fn at_rest() -> Self {
        RocketState {
            altitude: 0.0,
            vertical_velocity: 0.0,
            vertical_acceleration: 0.0,
            thrust_accel: 0.0,
            fuel_mass: 0.0,
            dry_mass: 0.0,
            is_launched: false,
            has_landed: false,
            launch_timestamp: None,
            elapsed_flight_time: 0.0,
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.fuel_mass
    }

    pub fn is_airborne(&self) -> bool {
        self.is_launched && !self.has_landed
    }

    pub fn is_descending(&self) -> bool {
        self.vertical_velocity > 0.0
    }

    pub fn speed(&self) -> f64 {
        self.vertical_velocity.abs()
    }

    pub fn phase(&self) -> FlightPhase {
        if self.has_landed {
            FlightPhase::Landed
        } else if !self.is_launched {
            FlightPhase::Idle
        } else if self.is_descending() {
            FlightPhase::Descending
        } else {
            FlightPhase::Ascending
        }
    }

    /// Wall-clock time since launch, independent of the simulated clock.
    pub fn wall_clock_since_launch(&self) -> Option<f64> {
        self.launch_timestamp
            .map(|timestamp| timestamp.elapsed().as_secs_f64())
    }
}

impl Default for RocketState {
    fn default() -> Self {
        Self::at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest_state() {
        let state = RocketState::at_rest();
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(state.fuel_mass, 0.0);
        assert!(!state.is_launched);
        assert!(!state.has_landed);
        assert!(state.launch_timestamp.is_none());
        assert_eq!(state.phase(), FlightPhase::Idle);
    }

    #[test]
    fn test_phase_follows_velocity_sign() {
        let mut state = RocketState::at_rest();
        state.is_launched = true;
        state.vertical_velocity = -20.0;
        assert_eq!(state.phase(), FlightPhase::Ascending);

        state.vertical_velocity = 20.0;
        assert_eq!(state.phase(), FlightPhase::Descending);
        assert_eq!(state.speed(), 20.0);

        state.is_launched = false;
        state.has_landed = true;
        assert_eq!(state.phase(), FlightPhase::Landed);
    }

    #[test]
    fn test_wall_clock_only_after_launch() {
        let mut state = RocketState::at_rest();
        assert_eq!(state.wall_clock_since_launch(), None);

        state.launch_timestamp = Some(Instant::now());
        let wall_clock = state.wall_clock_since_launch().unwrap();
        assert!(wall_clock >= 0.0);
    }

    #[test]
    fn test_total_mass() {
        let mut state = RocketState::at_rest();
        state.dry_mass = 10_000.0;
        state.fuel_mass = 2_500.0;
        assert_eq!(state.total_mass(), 12_500.0);
    }
}
