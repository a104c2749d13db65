use std::fmt;

use crate::constants::{
    EARTH_GRAVITY, EARTH_SCALE_HEIGHT, EARTH_SURFACE_DENSITY, GRAVITY_MATCH_TOLERANCE,
    MARS_GRAVITY, MARS_SCALE_HEIGHT, MARS_SURFACE_DENSITY, MOON_DENSITY, MOON_GRAVITY,
};
use crate::errors::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Earth,
    Mars,
    Moon,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 3] =
        [CelestialBody::Earth, CelestialBody::Mars, CelestialBody::Moon];

    pub fn surface_gravity(&self) -> f64 {
        match self {
            CelestialBody::Earth => EARTH_GRAVITY,
            CelestialBody::Mars => MARS_GRAVITY,
            CelestialBody::Moon => MOON_GRAVITY,
        }
    }

    pub fn atmosphere(&self) -> Atmosphere {
        match self {
            CelestialBody::Earth => Atmosphere::Exponential {
                surface_density: EARTH_SURFACE_DENSITY,
                scale_height: EARTH_SCALE_HEIGHT,
            },
            CelestialBody::Mars => Atmosphere::Exponential {
                surface_density: MARS_SURFACE_DENSITY,
                scale_height: MARS_SCALE_HEIGHT,
            },
            CelestialBody::Moon => Atmosphere::NearVacuum {
                density: MOON_DENSITY,
            },
        }
    }

    pub fn from_gravity(gravity: f64) -> Option<CelestialBody> {
        Self::ALL
            .into_iter()
            .find(|body| (body.surface_gravity() - gravity).abs() <= GRAVITY_MATCH_TOLERANCE)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CelestialBody::Earth => "Earth",
            CelestialBody::Mars => "Mars",
            CelestialBody::Moon => "Moon",
        };
        f.write_str(name)
    }
}

/// Density model selected by the celestial body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Atmosphere {
    Exponential {
        surface_density: f64, // kg/m³
        scale_height: f64,    // m
    },
    NearVacuum {
        density: f64, // kg/m³
    },
}

impl Atmosphere {
    /// Density in kg/m³ at `altitude`; zero at or above `space_boundary`.
    pub fn density(&self, altitude: f64, space_boundary: f64) -> f64 {
        if altitude >= space_boundary {
            return 0.0;
        }
        match *self {
            Atmosphere::Exponential {
                surface_density,
                scale_height,
            } => surface_density * (-altitude.max(0.0) / scale_height).exp(),
            Atmosphere::NearVacuum { density } => density,
        }
    }
}

/// Per-flight environment selected by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentConfig {
    pub surface_gravity: f64,
    pub body: CelestialBody,
}

impl EnvironmentConfig {
    pub fn for_body(body: CelestialBody) -> Self {
        EnvironmentConfig {
            surface_gravity: body.surface_gravity(),
            body,
        }
    }

    pub fn from_gravity(gravity: f64) -> Result<Self, SimulationError> {
        CelestialBody::from_gravity(gravity)
            .map(Self::for_body)
            .ok_or_else(|| {
                SimulationError::InvalidParameter(format!(
                    "gravity {gravity} m/s² does not match Earth, Mars or Moon"
                ))
            })
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.surface_gravity.is_finite() && self.surface_gravity > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "surface gravity must be positive, got {}",
                self.surface_gravity
            )));
        }
        Ok(())
    }

    pub fn air_density(&self, altitude: f64, space_boundary: f64) -> f64 {
        self.body.atmosphere().density(altitude, space_boundary)
    }

    pub fn classify(&self, altitude: f64, space_boundary: f64) -> EnvironmentClass {
        if altitude <= 0.0 {
            EnvironmentClass::Ground
        } else if altitude >= space_boundary
            || matches!(self.body.atmosphere(), Atmosphere::NearVacuum { .. })
        {
            EnvironmentClass::Space
        } else {
            EnvironmentClass::Air
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::for_body(CelestialBody::Earth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentClass {
    Ground,
    Air,
    Space,
}

impl fmt::Display for EnvironmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnvironmentClass::Ground => "ground",
            EnvironmentClass::Air => "air",
            EnvironmentClass::Space => "space",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPACE_BOUNDARY;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_earth_density_at_sea_level() {
        let env = EnvironmentConfig::for_body(CelestialBody::Earth);
        assert_abs_diff_eq!(env.air_density(0.0, SPACE_BOUNDARY), 1.225, epsilon = 1e-12);
    }

    #[test]
    fn test_earth_density_at_one_scale_height() {
        let env = EnvironmentConfig::for_body(CelestialBody::Earth);
        let expected = 1.225 / std::f64::consts::E;
        assert_abs_diff_eq!(
            env.air_density(8_500.0, SPACE_BOUNDARY),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_mars_is_thinner_than_earth() {
        let earth = EnvironmentConfig::for_body(CelestialBody::Earth);
        let mars = EnvironmentConfig::for_body(CelestialBody::Mars);
        for altitude in [0.0, 1_000.0, 20_000.0] {
            assert!(mars.air_density(altitude, SPACE_BOUNDARY) < earth.air_density(altitude, SPACE_BOUNDARY));
        }
    }

    #[test]
    fn test_moon_is_near_vacuum() {
        let moon = EnvironmentConfig::for_body(CelestialBody::Moon);
        assert_abs_diff_eq!(moon.air_density(0.0, SPACE_BOUNDARY), 1e-12, epsilon = 1e-15);
        assert_abs_diff_eq!(moon.air_density(50_000.0, SPACE_BOUNDARY), 1e-12, epsilon = 1e-15);
    }

    #[test]
    fn test_density_vanishes_in_space() {
        for body in CelestialBody::ALL {
            let env = EnvironmentConfig::for_body(body);
            assert_eq!(env.air_density(SPACE_BOUNDARY, SPACE_BOUNDARY), 0.0);
            assert_eq!(env.air_density(250_000.0, SPACE_BOUNDARY), 0.0);
        }
    }

    #[test]
    fn test_body_from_gravity() {
        assert_eq!(CelestialBody::from_gravity(9.81), Some(CelestialBody::Earth));
        assert_eq!(CelestialBody::from_gravity(3.71), Some(CelestialBody::Mars));
        assert_eq!(CelestialBody::from_gravity(1.62), Some(CelestialBody::Moon));
        assert_eq!(CelestialBody::from_gravity(24.79), None);

        let err = EnvironmentConfig::from_gravity(5.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter(_)));
    }

    #[test]
    fn test_classification() {
        let earth = EnvironmentConfig::for_body(CelestialBody::Earth);
        assert_eq!(earth.classify(0.0, SPACE_BOUNDARY), EnvironmentClass::Ground);
        assert_eq!(earth.classify(5_000.0, SPACE_BOUNDARY), EnvironmentClass::Air);
        assert_eq!(earth.classify(120_000.0, SPACE_BOUNDARY), EnvironmentClass::Space);

        let moon = EnvironmentConfig::for_body(CelestialBody::Moon);
        assert_eq!(moon.classify(0.0, SPACE_BOUNDARY), EnvironmentClass::Ground);
        assert_eq!(moon.classify(10.0, SPACE_BOUNDARY), EnvironmentClass::Space);
    }

    #[test]
    fn test_validate_rejects_non_positive_gravity() {
        let env = EnvironmentConfig {
            surface_gravity: 0.0,
            body: CelestialBody::Earth,
        };
        assert!(env.validate().is_err());
        assert!(EnvironmentConfig::default().validate().is_ok());
    }
}
