//! Fakenodo — a mock Zenodo-style deposition service with a connectivity probe.

pub mod config;
pub mod deposition;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use config::FakenodoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
