use crate::config::SimulationConfig;
use crate::errors::SimulationError;

const MIN_NET_DECELERATION: f64 = 1e-6; // m/s²

/// Flight conditions the landing guidance reads each step. Velocity is
/// positive downward; `drag_decel` is the magnitude of the drag deceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceInput {
    pub altitude: f64,
    pub velocity: f64,
    pub gravity: f64,
    pub drag_decel: f64,
    pub available_accel: f64,
}

/// Autonomous retro-burn for the final descent.
///
/// Arms once the remaining altitude is within the stopping distance plus a
/// speed-proportional buffer, ramps thrust linearly to the commanded value,
/// then tracks the constant-deceleration profile that reaches the target
/// touchdown speed at zero altitude.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingGuidance {
    target_velocity: f64,
    safety_buffer_factor: f64,
    ramp_time_per_accel: f64,
    min_ramp_time: f64,
    max_ramp_time: f64,
    min_altitude: f64,
    max_thrust_accel: f64,
    armed: bool,
    commanded_accel: f64,
    ramp_time: f64,
    ramp_progress: f64,
}

impl LandingGuidance {
    pub fn new(config: &SimulationConfig) -> Self {
        LandingGuidance {
            target_velocity: config.landing_target_velocity,
            safety_buffer_factor: config.safety_buffer_factor,
            ramp_time_per_accel: config.ramp_time_per_accel,
            min_ramp_time: config.min_ramp_time,
            max_ramp_time: config.max_ramp_time,
            min_altitude: config.guidance_min_altitude,
            max_thrust_accel: config.max_thrust_accel,
            armed: false,
            commanded_accel: 0.0,
            ramp_time: 0.0,
            ramp_progress: 0.0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn commanded_accel(&self) -> f64 {
        self.commanded_accel
    }

    pub fn ramp_time(&self) -> f64 {
        self.ramp_time
    }

    pub fn ramp_progress(&self) -> f64 {
        self.ramp_progress
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.commanded_accel = 0.0;
        self.ramp_time = 0.0;
        self.ramp_progress = 0.0;
    }

    /// Ramp duration scales with the commanded acceleration.
    pub fn ramp_time_for(&self, commanded_accel: f64) -> f64 {
        (self.ramp_time_per_accel * commanded_accel).clamp(self.min_ramp_time, self.max_ramp_time)
    }

    /// Distance needed to slow from the current speed to the target speed,
    /// including the distance covered while thrust ramps up.
    pub fn stopping_distance(&self, input: &GuidanceInput) -> Result<f64, SimulationError> {
        let commanded = input.available_accel.min(self.max_thrust_accel);
        let net_decel = commanded - input.gravity + input.drag_decel;
        if !(net_decel.is_finite() && net_decel > MIN_NET_DECELERATION) {
            return Err(SimulationError::DegenerateGuidance(format!(
                "net deceleration {net_decel:.4} m/s² cannot stop the descent"
            )));
        }

        let ramp_time = self.ramp_time_for(commanded);
        // Thrust averages half the commanded value over the ramp.
        let ramp_accel = input.gravity - input.drag_decel - commanded / 2.0;
        let ramp_distance =
            (input.velocity * ramp_time + 0.5 * ramp_accel * ramp_time.powi(2)).max(0.0);
        let post_ramp_velocity = input.velocity + ramp_accel * ramp_time;

        let braking_distance = if post_ramp_velocity > self.target_velocity {
            (post_ramp_velocity.powi(2) - self.target_velocity.powi(2)) / (2.0 * net_decel)
        } else {
            0.0
        };

        Ok(ramp_distance + braking_distance)
    }

    pub fn should_arm(&self, input: &GuidanceInput) -> bool {
        if self.armed || input.velocity <= 0.0 || input.available_accel <= 0.0 {
            return false;
        }

        let buffer = self.safety_buffer_factor * input.velocity;
        match self.stopping_distance(input) {
            Ok(h_min) => input.altitude <= h_min + buffer,
            Err(err) => {
                // Engine cannot out-brake gravity; burn now to shed what it can.
                log::debug!("{err}, arming landing guidance immediately");
                true
            }
        }
    }

    pub fn arm(&mut self, available_accel: f64) {
        self.commanded_accel = available_accel.min(self.max_thrust_accel);
        self.ramp_time = self.ramp_time_for(self.commanded_accel);
        self.ramp_progress = 0.0;
        self.armed = true;
    }

    /// Thrust acceleration change allowed per step of `delta_time`.
    pub fn ramp_slope(&self, delta_time: f64) -> f64 {
        if self.ramp_time <= 0.0 {
            return self.commanded_accel;
        }
        self.commanded_accel * delta_time / self.ramp_time
    }

    /// Speed the rocket still sheds while thrust eases from `thrust_accel`
    /// back down to `hover_accel` at the ramp slope.
    fn easing_margin(&self, thrust_accel: f64, hover_accel: f64) -> f64 {
        let rate = self.ramp_slope(1.0);
        if rate <= 0.0 {
            return 0.0;
        }
        let excess = (thrust_accel - hover_accel).max(0.0);
        excess.powi(2) / (2.0 * rate)
    }

    /// Upward acceleration the engine must supply to reach the target speed
    /// at the ground. Altitude is floored before the division.
    ///
    /// Below the target speed the result drops under hover, and a climbing
    /// rocket gets no thrust at all.
    pub fn feedback_accel(&self, input: &GuidanceInput) -> Result<f64, SimulationError> {
        if input.velocity <= 0.0 {
            return Ok(0.0);
        }
        let altitude = input.altitude.max(self.min_altitude);
        let required = (input.velocity.powi(2) - self.target_velocity.powi(2)) / (2.0 * altitude)
            + input.gravity
            - input.drag_decel;

        if required.is_finite() {
            Ok(required)
        } else {
            Err(SimulationError::DegenerateGuidance(format!(
                "feedback law produced {required} at altitude {} m, velocity {} m/s",
                input.altitude, input.velocity
            )))
        }
    }

    /// Signed thrust acceleration (negative is upward) for this step.
    pub fn command(
        &mut self,
        input: &GuidanceInput,
        current_thrust: f64,
        delta_time: f64,
    ) -> Result<f64, SimulationError> {
        if !self.armed {
            return Ok(current_thrust);
        }

        let limit = input.available_accel.min(self.max_thrust_accel).max(0.0);
        let hover = (input.gravity - input.drag_decel).max(0.0);
        let near_target = input.velocity - self.easing_margin(-current_thrust, hover)
            <= self.target_velocity;

        if self.ramp_progress < 1.0 {
            if near_target {
                // Easing off now lands on the target speed; the feedback law takes over.
                self.ramp_progress = 1.0;
            } else {
                let step = if self.ramp_time > 0.0 {
                    delta_time / self.ramp_time
                } else {
                    1.0
                };
                self.ramp_progress = (self.ramp_progress + step).min(1.0);
                return Ok(-(self.commanded_accel * self.ramp_progress).min(limit));
            }
        }

        let required = self.feedback_accel(input)?;
        let target = -required.clamp(0.0, limit);
        let slope = self.ramp_slope(delta_time);
        Ok(current_thrust + (target - current_thrust).clamp(-slope, slope))
    }
}
