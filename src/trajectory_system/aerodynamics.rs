use crate::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub cross_section_area: f64, // m²
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, cross_section_area: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            cross_section_area,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.drag_coefficient, config.cross_section_area)
    }

    fn calculate_dynamic_pressure(&self, velocity: f64, air_density: f64) -> f64 {
        0.5 * air_density * velocity.powi(2)
    }

    pub fn calculate_drag_force(&self, velocity: f64, air_density: f64) -> f64 {
        self.calculate_dynamic_pressure(velocity, air_density)
            * self.drag_coefficient
            * self.cross_section_area
    }

    /// Signed drag acceleration, always opposing `velocity`.
    pub fn calculate_drag_accel(&self, velocity: f64, air_density: f64, total_mass: f64) -> f64 {
        if velocity == 0.0 || total_mass <= 0.0 {
            return 0.0;
        }
        let magnitude = self.calculate_drag_force(velocity, air_density) / total_mass;
        -velocity.signum() * magnitude
    }
}
