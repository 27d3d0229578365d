//! Deposition record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of a deposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositionState {
    Unsubmitted,
    Done,
}

/// A mock Zenodo deposition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposition {
    pub id: u64,
    pub conceptrecid: u64,
    pub created: String,
    pub modified: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub title: String,
    #[serde(default)]
    pub files: Vec<DepositionFile>,
    pub doi: Option<String>,
    pub state: DepositionState,
    pub submitted: bool,
    pub version_count: u32,
    pub dirty_files: bool,
}

/// A file attached to a deposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositionFile {
    /// 1-based position within the deposition, as a string.
    pub id: String,
    pub filename: String,
    pub filesize: u64,
    /// Mock checksum in `md5:<hex>` form.
    pub checksum: String,
}

/// One published version of a deposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub doi: String,
    pub created: String,
    pub is_latest: bool,
}

/// Payload served by the `/fakenodo/test` status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub success: bool,
    pub message: String,
}
