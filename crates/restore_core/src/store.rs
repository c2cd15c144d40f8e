use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core_api::{LoadOutcome, RestoreConfig, Unavailable, UnavailableReason};
use crate::node::Document;

/// Directory of per-subject documents, one `<id>.<extension>` file each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    root: PathBuf,
    extension: String,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, "json")
    }

    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &RestoreConfig) -> Self {
        Self::with_extension(&config.store_root, &config.extension)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical identifier used for resource resolution, or `None` when the
    /// identifier cannot name a document inside the store.
    pub fn normalize_id(subject_id: &str) -> Option<String> {
        let id = subject_id.trim().to_lowercase();
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return None;
        }
        Some(id)
    }

    pub fn document_path(&self, subject_id: &str) -> Option<PathBuf> {
        let id = Self::normalize_id(subject_id)?;
        Some(self.root.join(format!("{id}.{}", self.extension)))
    }

    /// Never fails: an unreadable document is reported, not raised.
    pub fn load(&self, subject_id: &str) -> LoadOutcome {
        match self.read_document(subject_id) {
            Ok(document) => LoadOutcome::Ready(document),
            Err(unavailable) => {
                log::warn!(
                    "couldn't load document for {subject_id:?} ({:?}): {}",
                    unavailable.reason,
                    unavailable.detail
                );
                LoadOutcome::Unavailable(unavailable)
            }
        }
    }

    fn read_document(&self, subject_id: &str) -> Result<Document, Unavailable> {
        let Some(path) = self.document_path(subject_id) else {
            return Err(Unavailable {
                reason: UnavailableReason::NotFound,
                detail: format!("invalid subject identifier {subject_id:?}"),
            });
        };

        let text = fs::read_to_string(&path).map_err(|e| Unavailable {
            reason: if e.kind() == io::ErrorKind::NotFound {
                UnavailableReason::NotFound
            } else {
                UnavailableReason::Corrupt
            },
            detail: format!("failed to read {}: {e}", path.display()),
        })?;

        log::debug!("read {} bytes from {}", text.len(), path.display());
        Document::from_json_str(&text).map_err(|e| Unavailable {
            reason: UnavailableReason::Corrupt,
            detail: format!("{}: {}", path.display(), e.message),
        })
    }
}
