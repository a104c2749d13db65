use crate::control::rocket::RocketState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundContact {
    Airborne,
    /// Touching the ground too slowly to count as a landing (on the pad).
    Resting,
    Impact { velocity: f64 },
}

/// Advances velocity then altitude by one semi-implicit Euler step.
/// Accelerations are positive downward, so altitude falls by `v * dt`.
pub fn integrate(state: &mut RocketState, gravity: f64, drag_accel: f64, delta_time: f64) {
    state.vertical_acceleration = state.thrust_accel + gravity + drag_accel;
    state.vertical_velocity += state.vertical_acceleration * delta_time;
    state.altitude -= state.vertical_velocity * delta_time;
}

/// Clamps the rocket to the ground and reports how it got there.
/// A rocket moving down faster than `contact_velocity` has impacted; its
/// velocity is zeroed and the impact speed returned.
pub fn resolve_ground_contact(state: &mut RocketState, contact_velocity: f64) -> GroundContact {
    if state.altitude > 0.0 {
        return GroundContact::Airborne;
    }

    state.altitude = 0.0;
    if state.vertical_velocity > contact_velocity {
        let velocity = state.vertical_velocity;
        state.vertical_velocity = 0.0;
        GroundContact::Impact { velocity }
    } else {
        if state.vertical_velocity > 0.0 {
            state.vertical_velocity = 0.0;
        }
        GroundContact::Resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn airborne(altitude: f64, velocity: f64) -> RocketState {
        let mut state = RocketState::at_rest();
        state.is_launched = true;
        state.altitude = altitude;
        state.vertical_velocity = velocity;
        state.dry_mass = 1_000.0;
        state
    }

    #[test]
    fn test_kinematics_gravity_effect() {
        let mut state = airborne(100.0, 0.0);
        let delta_time = 0.1;

        integrate(&mut state, 9.81, 0.0, delta_time);
        assert_relative_eq!(state.vertical_velocity, 0.981, epsilon = 1e-12);
        assert_relative_eq!(state.altitude, 100.0 - 0.0981, epsilon = 1e-12);
        assert_relative_eq!(state.vertical_acceleration, 9.81, epsilon = 1e-12);

        for _ in 0..9 {
            integrate(&mut state, 9.81, 0.0, delta_time);
        }
        assert_relative_eq!(state.vertical_velocity, 9.81, epsilon = 1e-9);
        assert!(
            state.altitude < 95.0 && state.altitude > 94.0,
            "Rocket should have lost about 5.4 m. Altitude: {}",
            state.altitude
        );
    }

    #[test]
    fn test_kinematics_with_thrust() {
        let mut state = airborne(0.0, 0.0);
        state.thrust_accel = -20.0;

        for _ in 0..10 {
            integrate(&mut state, 9.81, 0.0, 0.1);
        }

        assert!(state.vertical_velocity < 0.0, "Rocket should be climbing");
        assert!(state.altitude > 0.0, "Rocket should gain altitude");
        assert_relative_eq!(state.vertical_acceleration, -10.19, epsilon = 1e-12);
    }

    #[test]
    fn test_ground_contact_airborne() {
        let mut state = airborne(10.0, 30.0);
        assert_eq!(resolve_ground_contact(&mut state, 1.0), GroundContact::Airborne);
        assert_eq!(state.vertical_velocity, 30.0);
    }

    #[test]
    fn test_ground_contact_impact() {
        let mut state = airborne(-0.4, 7.5);
        assert_eq!(
            resolve_ground_contact(&mut state, 1.0),
            GroundContact::Impact { velocity: 7.5 }
        );
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_ground_contact_resting() {
        let mut state = airborne(-0.01, 0.5);
        assert_eq!(resolve_ground_contact(&mut state, 1.0), GroundContact::Resting);
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
    }
}
