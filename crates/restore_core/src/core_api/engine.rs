use crate::node::Document;
use crate::orchestrator::Orchestrator;
use crate::store::DocumentStore;
use crate::subject::Subject;

use super::error::CoreError;
use super::types::{LoadOutcome, RestoreConfig, RestoreMode, RestoreOutcome, RestoreReport};

/// Loads a subject's document and restores it section by section.
#[derive(Debug)]
pub struct Engine {
    store: DocumentStore,
    orchestrator: Orchestrator,
    mode: RestoreMode,
}

impl Engine {
    pub fn new(config: &RestoreConfig) -> Result<Self, CoreError> {
        Ok(Self::with_orchestrator(
            DocumentStore::from_config(config),
            Orchestrator::standard()?,
            config.mode,
        ))
    }

    pub fn with_orchestrator(
        store: DocumentStore,
        orchestrator: Orchestrator,
        mode: RestoreMode,
    ) -> Self {
        Self {
            store,
            orchestrator,
            mode,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn mode(&self) -> RestoreMode {
        self.mode
    }

    /// An unavailable document leaves `subject` untouched; the caller decides
    /// whether a default-initialised subject may proceed.
    pub fn restore_subject<S: Subject + Clone>(
        &self,
        subject_id: &str,
        subject: &mut S,
    ) -> RestoreOutcome {
        match self.store.load(subject_id) {
            LoadOutcome::Ready(document) => {
                RestoreOutcome::Restored(self.restore_document(&document, subject))
            }
            LoadOutcome::Unavailable(unavailable) => {
                log::warn!("{subject_id}: no usable document, subject keeps its defaults");
                RestoreOutcome::Unavailable(unavailable)
            }
        }
    }

    pub fn restore_document<S: Subject + Clone>(
        &self,
        document: &Document,
        subject: &mut S,
    ) -> RestoreReport {
        match self.mode {
            RestoreMode::Partial => self.orchestrator.restore(document, subject),
            RestoreMode::Staged => self.orchestrator.restore_staged(document, subject),
        }
    }
}
