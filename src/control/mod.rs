pub mod environment;
pub mod events;
pub mod guidance;
pub mod propulsion;
pub mod rocket;
pub mod simulator;
