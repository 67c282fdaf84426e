pub mod application;
pub mod http;
