pub mod fallback_controller;
pub mod http_server;
pub mod model;
pub mod wake_controller;
pub mod wake_observer;
