use rand::Rng;

use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    Soft,
    Crash,
}

impl LandingOutcome {
    /// Impacts at or below the threshold are soft, anything faster crashes.
    pub fn classify(impact_velocity: f64, crash_threshold: f64) -> Self {
        if impact_velocity.abs() > crash_threshold {
            LandingOutcome::Crash
        } else {
            LandingOutcome::Soft
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffReason {
    BurnComplete,
    FuelExhausted,
}

/// Spawn intent for one wreckage fragment. Offsets are relative to the impact
/// point; velocity follows the flight convention (positive `y` is downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    pub offset: Vector2D,   // m
    pub velocity: Vector2D, // m/s
    pub size: f64,          // m
}

impl Debris {
    pub fn scatter<R: Rng>(count: usize, impact_velocity: f64, rng: &mut R) -> Vec<Debris> {
        let speed = impact_velocity.abs();
        (0..count)
            .map(|_| {
                let lateral = rng.gen_range(-0.5_f64..=0.5) * speed;
                let rebound = -rng.gen_range(0.1_f64..=0.6) * speed;
                Debris {
                    offset: Vector2D::new(rng.gen_range(-2.0_f64..=2.0), 0.0),
                    velocity: Vector2D::new(lateral, rebound),
                    size: rng.gen_range(0.2_f64..=1.5),
                }
            })
            .collect()
    }

    /// Ballistic offset after `seconds`, ignoring drag.
    pub fn offset_after(&self, seconds: f64, gravity: f64) -> Vector2D {
        let fall = Vector2D::new(0.0, 0.5 * gravity * seconds.powi(2));
        self.offset + self.velocity * seconds + fall
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlightEvent {
    EngineCutoff {
        flight_time: f64,
        reason: CutoffReason,
    },
    ApogeeReached {
        altitude: f64,
        time_index: usize,
        flight_time: f64,
    },
    GuidanceArmed {
        altitude: f64,
        velocity: f64,
        commanded_accel: f64,
    },
    Landed {
        impact_velocity: f64,
        outcome: LandingOutcome,
        debris: Vec<Debris>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_landing_classification() {
        assert_eq!(LandingOutcome::classify(3.0, 10.0), LandingOutcome::Soft);
        assert_eq!(LandingOutcome::classify(11.0, 10.0), LandingOutcome::Crash);
    }

    #[test]
    fn test_landing_classification_boundary_is_soft() {
        assert_eq!(LandingOutcome::classify(10.0, 10.0), LandingOutcome::Soft);
        assert_eq!(
            LandingOutcome::classify(10.000_001, 10.0),
            LandingOutcome::Crash
        );
    }

    #[test]
    fn test_debris_scatter_is_reproducible() {
        let first = Debris::scatter(8, 40.0, &mut StdRng::seed_from_u64(7));
        let second = Debris::scatter(8, 40.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(first.len(), 8);
        assert_eq!(first, second);
    }

    #[test]
    fn test_debris_flies_up_and_out() {
        let debris = Debris::scatter(32, 40.0, &mut StdRng::seed_from_u64(1));
        for fragment in &debris {
            assert!(fragment.velocity.y < 0.0, "fragment should rebound upward");
            assert!(fragment.velocity.x.abs() <= 20.0);
            assert!(fragment.velocity.magnitude() <= 40.0);
            assert!(fragment.size > 0.0);
        }
    }

    #[test]
    fn test_debris_offset_after() {
        let fragment = Debris {
            offset: Vector2D::new(1.0, 0.0),
            velocity: Vector2D::new(2.0, -10.0),
            size: 0.5,
        };
        let offset = fragment.offset_after(1.0, 10.0);
        assert_eq!(offset, Vector2D::new(3.0, -5.0));
    }
}
