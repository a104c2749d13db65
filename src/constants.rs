// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.81; // m/s², g0 for mass flow
pub const EARTH_GRAVITY: f64 = 9.81; // m/s²
pub const MARS_GRAVITY: f64 = 3.71; // m/s²
pub const MOON_GRAVITY: f64 = 1.62; // m/s²
pub const GRAVITY_MATCH_TOLERANCE: f64 = 0.01; // m/s²

// Atmosphere Constants
pub const EARTH_SURFACE_DENSITY: f64 = 1.225; // kg/m³
pub const EARTH_SCALE_HEIGHT: f64 = 8_500.0; // m
pub const MARS_SURFACE_DENSITY: f64 = 0.020; // kg/m³
pub const MARS_SCALE_HEIGHT: f64 = 11_100.0; // m
pub const MOON_DENSITY: f64 = 1e-12; // kg/m³, near vacuum
pub const SPACE_BOUNDARY: f64 = 100_000.0; // m (Kármán line)

// Rocket Constants
pub const ROCKET_DRAG_COEFFICIENT: f64 = 0.75;
pub const ROCKET_CROSS_SECTIONAL_AREA: f64 = 10.0; // m²
pub const MAX_THRUST_ACCELERATION: f64 = 50.0; // m/s², ~5g
pub const DEFAULT_SPECIFIC_IMPULSE: f64 = 300.0; // s

// Flight Events
pub const APOGEE_VELOCITY_EPSILON: f64 = 0.5; // m/s
pub const GROUND_CONTACT_VELOCITY: f64 = 1.0; // m/s, slower contact is resting
pub const CRASH_VELOCITY_THRESHOLD: f64 = 10.0; // m/s, above is a crash
pub const DEBRIS_COUNT: usize = 12;

// Landing Guidance
pub const LANDING_TARGET_VELOCITY: f64 = 5.0; // m/s
pub const SAFETY_BUFFER_FACTOR: f64 = 0.5; // s, multiplied by current speed
pub const RAMP_TIME_PER_ACCEL: f64 = 0.02; // s per m/s² of commanded thrust
pub const MIN_RAMP_TIME: f64 = 0.25; // s
pub const MAX_RAMP_TIME: f64 = 2.0; // s
pub const GUIDANCE_MIN_ALTITUDE: f64 = 1.0; // m, floor for the feedback law

// Simulation Parameters
pub const MAX_SUBSTEP: f64 = 1.0 / 32.0; // s
pub const MAX_FRAME_DT: f64 = 10.0; // s
pub const FRAME_RATE: f64 = 60.0; // Hz
pub const MAX_SIMULATION_TIME: f64 = 3_600.0; // s
