//! Deposition subsystem — the mock Zenodo deposit model.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (create/publish/version semantics)
//!     → store.rs (concurrent map + JSON file persistence)
//! ```
//!
//! # Design Decisions
//! - Every mutation persists the whole store; the file is small by design
//! - A corrupt store file logs an error and starts empty rather than failing
//! - DOIs use the Zenodo sandbox prefix (10.5072) so they are recognizably fake

pub mod service;
pub mod store;
pub mod types;

pub use service::DepositionService;
pub use store::DepositionStore;
pub use types::{Deposition, DepositionFile, DepositionState, ServiceStatus, VersionEntry};
