pub mod config;
pub mod emails;
pub mod error;
pub mod telemetry;
