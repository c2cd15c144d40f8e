use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::{FailureKind, SectionError};
use crate::node::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    NotFound,
    Corrupt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unavailable {
    pub reason: UnavailableReason,
    pub detail: String,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Ready(Document),
    Unavailable(Unavailable),
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// The first fatal failure of a restore, tagged with the section it hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    pub key: String,
    pub error: SectionError,
}

impl SectionFailure {
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

impl fmt::Display for SectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section `{}`: {}", self.key, self.error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreReport {
    pub applied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub not_reached: Vec<&'static str>,
    pub failure: Option<SectionFailure>,
}

impl RestoreReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(RestoreReport),
    Unavailable(Unavailable),
}

impl RestoreOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Restored(report) if report.is_complete())
    }

    pub fn report(&self) -> Option<&RestoreReport> {
        match self {
            Self::Restored(report) => Some(report),
            Self::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreMode {
    /// Sections applied before a failure stay applied.
    #[default]
    Partial,
    /// Nothing is applied unless every section succeeds.
    Staged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestoreConfig {
    pub store_root: PathBuf,
    pub extension: String,
    pub mode: RestoreMode,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from("data/players"),
            extension: "json".to_string(),
            mode: RestoreMode::Partial,
        }
    }
}
