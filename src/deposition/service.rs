//! Deposition lifecycle semantics.
//!
//! # Responsibilities
//! - Create, list, update and delete depositions
//! - Attach files and track the dirty-files flag
//! - Mint mock DOIs on publish and enumerate versions
//!
//! # Design Decisions
//! - Publishing with clean files is a no-op on the version count
//! - Checksums are mock values; nothing downstream verifies them

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::deposition::store::DepositionStore;
use crate::deposition::types::{
    Deposition, DepositionFile, DepositionState, ServiceStatus, VersionEntry,
};

/// Message reported by the status endpoint.
pub const STATUS_MESSAGE: &str = "Fakenodo persistent service is running.";

/// Service wrapping the deposition store with Zenodo-like semantics.
#[derive(Clone)]
pub struct DepositionService {
    store: Arc<DepositionStore>,
}

impl DepositionService {
    pub fn new(store: DepositionStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a new deposition from optional metadata.
    pub fn create(&self, metadata: Map<String, Value>) -> Deposition {
        let id = self.store.allocate_id();
        let now = now_utc();
        let title = metadata
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled")
            .to_string();

        let deposition = Deposition {
            id,
            conceptrecid: id - 1,
            created: now.clone(),
            modified: now,
            metadata,
            title,
            files: Vec::new(),
            doi: None,
            state: DepositionState::Unsubmitted,
            submitted: false,
            version_count: 0,
            dirty_files: false,
        };
        self.store.put(deposition.clone());
        deposition
    }

    pub fn get(&self, id: u64) -> Option<Deposition> {
        self.store.get(id)
    }

    pub fn list(&self) -> Vec<Deposition> {
        self.store.all()
    }

    pub fn delete(&self, id: u64) -> bool {
        self.store.remove(id)
    }

    /// Merge a metadata patch into a deposition.
    pub fn update_metadata(&self, id: u64, patch: Map<String, Value>) -> Option<Deposition> {
        self.store.update(id, |deposition| {
            for (key, value) in patch {
                if key == "title" {
                    if let Some(title) = value.as_str() {
                        deposition.title = title.to_string();
                    }
                }
                deposition.metadata.insert(key, value);
            }
            deposition.modified = now_utc();
        })
    }

    /// Attach a file, replacing any existing file with the same name.
    pub fn upload_file(
        &self,
        id: u64,
        name: &str,
        content: Option<&[u8]>,
    ) -> Option<DepositionFile> {
        let mut uploaded = None;
        self.store.update(id, |deposition| {
            let file = DepositionFile {
                id: (deposition.files.len() + 1).to_string(),
                filename: name.to_string(),
                filesize: content.map(|c| c.len() as u64).unwrap_or(0),
                checksum: mock_checksum(content),
            };

            if let Some(existing) = deposition.files.iter_mut().find(|f| f.filename == name) {
                // Replacement takes over the whole record, id included, so
                // the response and the stored entry always agree.
                existing.id = file.id;
                existing.filesize = file.filesize;
                existing.checksum = file.checksum;
                uploaded = Some(existing.clone());
            } else {
                deposition.files.push(file.clone());
                uploaded = Some(file);
            }

            deposition.dirty_files = true;
            deposition.modified = now_utc();
        })?;
        uploaded
    }

    /// Publish a deposition, minting a DOI.
    ///
    /// The first publish mints the base DOI; republishing after a file
    /// change mints a versioned DOI; republishing with clean files changes
    /// nothing but the modified timestamp.
    pub fn publish(&self, id: u64) -> Option<Deposition> {
        self.store.update(id, |deposition| {
            if !deposition.submitted {
                deposition.submitted = true;
                deposition.state = DepositionState::Done;
                deposition.version_count = 1;
                deposition.doi = Some(base_doi(deposition.id));
                deposition.dirty_files = false;
            } else if deposition.dirty_files {
                deposition.version_count += 1;
                deposition.doi = Some(format!(
                    "{}.{}",
                    base_doi(deposition.id),
                    deposition.version_count
                ));
                deposition.dirty_files = false;
            }

            deposition.modified = now_utc();
        })
    }

    pub fn doi(&self, id: u64) -> Option<String> {
        self.store.get(id).and_then(|d| d.doi)
    }

    /// Enumerate published versions; empty when unpublished or unknown.
    pub fn versions(&self, id: u64) -> Vec<VersionEntry> {
        let deposition = match self.store.get(id) {
            Some(d) if d.version_count > 0 => d,
            _ => return Vec::new(),
        };

        let base = base_doi(deposition.id);
        (1..=deposition.version_count)
            .map(|n| VersionEntry {
                version: n.to_string(),
                doi: if n == 1 {
                    base.clone()
                } else {
                    format!("{}.{}", base, n)
                },
                created: deposition.created.clone(),
                is_latest: n == deposition.version_count,
            })
            .collect()
    }

    /// Payload for the `/fakenodo/test` endpoint.
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            success: true,
            message: STATUS_MESSAGE.to_string(),
        }
    }
}

fn base_doi(id: u64) -> String {
    format!("10.5072/zenodo.{}", id)
}

fn now_utc() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn mock_checksum(content: Option<&[u8]>) -> String {
    match content {
        Some(bytes) if !bytes.is_empty() => {
            let mut hasher = DefaultHasher::new();
            bytes.hash(&mut hasher);
            format!("md5:{:x}", hasher.finish())
        }
        _ => "md5:mock".to_string(),
    }
}
