pub mod config;
pub mod error;
pub mod matcher;
pub mod telemetry;
