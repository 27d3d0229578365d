//! Connectivity probing subsystem.
//!
//! # Data Flow
//! ```text
//! probe trigger (CLI startup, one shot)
//!     → connectivity.rs (GET /fakenodo/test)
//!     → parse {success, message}
//!     → banner.rs (show error indicator on failure)
//! ```
//!
//! # Design Decisions
//! - The probe never returns an error; every outcome ends in a log line
//!   and, for transport failures and reported failures, a banner mutation
//! - A body that fails to parse is logged but NOT surfaced on the banner;
//!   this asymmetry is deliberate and matches the service's known callers
//! - No timeout, no retries, no in-flight guard; invocations are independent

pub mod banner;
pub mod connectivity;

pub use banner::{ErrorBanner, BANNER_ID};
pub use connectivity::{
    test_fakenodo_connection, test_zenodo_connection, ConnectivityProbe, HealthResponse,
    ERROR_TEXT, STATUS_PATH,
};
