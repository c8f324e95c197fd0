pub mod analytics;
pub mod config;
pub mod error;
pub mod experiments;
pub mod links;
pub mod outcomes;
pub mod scans;
pub mod telemetry;
