pub mod config;
pub mod error;
pub mod scorecard;
pub mod scoring;
pub mod telemetry;
