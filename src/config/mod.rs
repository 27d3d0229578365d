//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FakenodoConfig (validated, immutable)
//!     → shared with server, store and probe
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A missing config file is not an error; defaults apply

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, CONFIG_ENV_VAR};
pub use schema::FakenodoConfig;
pub use schema::ListenerConfig;
pub use schema::ProbeConfig;
pub use schema::StoreConfig;
