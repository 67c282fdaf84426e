pub mod shutdown;
pub mod telemetry;
