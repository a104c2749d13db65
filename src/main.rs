use std::{env, error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rocket_landing::*;

#[derive(Parser)]
#[command(author, version, about = "Vertical launch and powered landing simulator")]
struct Cli {
    /// Engine thrust in newtons
    #[arg(long, default_value_t = 7_000_000.0)]
    thrust: f64,

    /// Dry mass in kg
    #[arg(long, default_value_t = 10_000.0)]
    dry_mass: f64,

    /// Initial fuel mass in kg
    #[arg(long, default_value_t = 50_000.0)]
    fuel: f64,

    /// Ascent burn duration in seconds
    #[arg(long, default_value_t = 4.0)]
    burn: f64,

    /// Specific impulse in seconds
    #[arg(long, default_value_t = DEFAULT_SPECIFIC_IMPULSE)]
    isp: f64,

    /// Launch site
    #[arg(long, value_enum, default_value_t = Body::Earth)]
    body: Body,

    /// Surface gravity in m/s², overrides --body
    #[arg(long)]
    gravity: Option<f64>,

    /// Series to print after the flight (altitude, velocity, acceleration)
    #[arg(long, default_value = "altitude")]
    metric: ChartMetric,

    /// TOML file overriding the simulation tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame length in seconds
    #[arg(long, default_value_t = 1.0 / FRAME_RATE, value_parser = positive_seconds)]
    dt: f64,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = MAX_SIMULATION_TIME, value_parser = positive_seconds)]
    max_time: f64,

    /// Seed for crash debris
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Body {
    Earth,
    Mars,
    Moon,
}

fn positive_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a positive duration in seconds, got {value}"))
    }
}

impl From<Body> for CelestialBody {
    fn from(body: Body) -> Self {
        match body {
            Body::Earth => CelestialBody::Earth,
            Body::Mars => CelestialBody::Mars,
            Body::Moon => CelestialBody::Moon,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_debris_seed(seed);
    }

    let environment = match cli.gravity {
        Some(gravity) => EnvironmentConfig::from_gravity(gravity)?,
        None => EnvironmentConfig::for_body(cli.body.into()),
    };
    let engine =
        EngineConfig::new(cli.thrust, cli.dry_mass, cli.fuel, cli.burn).with_specific_impulse(cli.isp);

    let mut simulator = FlightSimulator::new(config)?;
    simulator.launch(engine, environment)?;

    let mut elapsed_time = 0.0;
    while elapsed_time < cli.max_time {
        for event in simulator.tick(cli.dt) {
            log_debris(&event, environment.surface_gravity);
        }
        elapsed_time += cli.dt;

        if simulator.state().has_landed {
            break;
        }
    }
    let state = simulator.state();
    if !state.has_landed {
        warn!(
            "Still airborne after {:.1} s at {:.1} m, moving at {:.1} m/s, stopping",
            elapsed_time,
            state.altitude,
            state.speed()
        );
    }
    if let Some(wall_clock) = state.wall_clock_since_launch() {
        info!(
            "Simulated {:.1} s of flight in {:.3} s of wall-clock time",
            state.elapsed_flight_time, wall_clock
        );
    }

    let telemetry = simulator.telemetry();
    telemetry.display_summary();

    // One row per simulated second
    let stride = (1.0 / cli.dt).round().max(1.0) as usize;
    println!("time (s)\t{} ({})", cli.metric, cli.metric.unit());
    for (time, value) in telemetry.series(cli.metric).into_iter().step_by(stride) {
        println!("{time:.2}\t{value:.2}");
    }

    Ok(())
}

fn log_debris(event: &FlightEvent, gravity: f64) {
    let FlightEvent::Landed {
        outcome: LandingOutcome::Crash,
        debris,
        ..
    } = event
    else {
        return;
    };

    for (index, piece) in debris.iter().enumerate() {
        let position = piece.offset_after(2.0, gravity);
        info!(
            "  fragment {index}: size {:.2} m, {:.1} m/s, at ({:.1}, {:.1}) m after 2 s",
            piece.size,
            piece.velocity.magnitude(),
            position.x,
            -position.y
        );
    }
}
