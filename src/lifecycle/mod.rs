//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - Shutdown is a broadcast channel every long-running task subscribes to
//! - Ctrl-C is the only shutdown trigger; there is no reload signal

pub mod shutdown;

pub use shutdown::Shutdown;
