pub mod config;
pub mod error;
pub mod form;
pub mod submission;
pub mod telemetry;
