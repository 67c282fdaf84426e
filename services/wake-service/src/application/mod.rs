use common::telemetry::ServiceIdentity;

pub mod config;
pub mod context;

pub const APPLICATION_NAME: &str = "wake-service";

pub const SERVICE_IDENTITY: ServiceIdentity = ServiceIdentity {
    name: APPLICATION_NAME,
    version: env!("CARGO_PKG_VERSION"),
};
