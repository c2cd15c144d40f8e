//! Restores a player's runtime state from a persisted document.
//!
//! A document is parsed into a [`node::Node`] tree, then the
//! [`orchestrator::Orchestrator`] walks the fixed section list in
//! [`sections::standard_sections`], coercing each present section and
//! handing it to the owning subsystem through the [`subject::Subject`]
//! contract.

pub mod catalog;
pub mod coerce;
pub mod core_api;
pub mod lookup;
pub mod node;
pub mod orchestrator;
pub mod ordinal;
pub mod profile;
pub mod registry;
pub mod sections;
pub mod store;
pub mod subject;
