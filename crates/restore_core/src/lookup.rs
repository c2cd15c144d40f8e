use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core_api::ConsumerError;
use crate::subject::Subject;

/// What a lookup does when the requested key has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingKeyPolicy {
    NoOp,
    Fatal,
}

/// A versioned table of entries keyed by symbolic name.
pub struct LookupTable<T> {
    name: &'static str,
    version: u32,
    policy: MissingKeyPolicy,
    entries: BTreeMap<String, T>,
}

impl<T> LookupTable<T> {
    pub fn new(name: &'static str, version: u32, policy: MissingKeyPolicy) -> Self {
        Self {
            name,
            version,
            policy,
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, entry: T) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: T) -> Option<T> {
        self.entries.insert(key.into(), entry)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Ok(None)` means "absent, do nothing" under [`MissingKeyPolicy::NoOp`].
    pub fn resolve(&self, key: &str) -> Result<Option<&T>, ConsumerError> {
        match (self.entries.get(key), self.policy) {
            (Some(entry), _) => Ok(Some(entry)),
            (None, MissingKeyPolicy::NoOp) => Ok(None),
            (None, MissingKeyPolicy::Fatal) => Err(ConsumerError::new(format!(
                "no entry `{key}` in {} v{}",
                self.name, self.version
            ))),
        }
    }
}

impl<T> fmt::Debug for LookupTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTable")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("policy", &self.policy)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Entry point of a named random event.
pub trait EventFactory {
    fn create(&self, subject: &mut dyn Subject) -> Result<(), ConsumerError>;
}

/// Starts the event registered under `name` on the subject.
#[derive(Debug, Clone, Copy)]
pub struct NamedEvent(pub &'static str);

impl EventFactory for NamedEvent {
    fn create(&self, subject: &mut dyn Subject) -> Result<(), ConsumerError> {
        subject.start_event(self.0)
    }
}

pub const ANTI_MACRO_EVENTS: &[&str] = &[
    "Certer",
    "Drill demon",
    "Drunken dwarf",
    "Evil chicken",
    "Freaky forester",
    "Genie",
    "Mysterious old man",
    "Rick Turpentine",
    "Sandwich lady",
    "Surprise exam",
];

/// Lookup tables handed to the orchestrator.
#[derive(Debug)]
pub struct Registries {
    pub anti_macro_events: LookupTable<Box<dyn EventFactory>>,
}

impl Registries {
    pub fn new(anti_macro_events: LookupTable<Box<dyn EventFactory>>) -> Self {
        Self { anti_macro_events }
    }
}

impl Default for Registries {
    fn default() -> Self {
        let mut events: LookupTable<Box<dyn EventFactory>> =
            LookupTable::new("anti_macro_events", 1, MissingKeyPolicy::NoOp);
        for name in ANTI_MACRO_EVENTS {
            events.insert(*name, Box::new(NamedEvent(*name)));
        }
        Self::new(events)
    }
}
