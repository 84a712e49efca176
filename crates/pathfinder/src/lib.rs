pub mod config;
pub mod error;
pub mod guidance;
pub mod telemetry;
