mod engine;
mod error;
mod types;

pub use engine::Engine;
pub use error::{
    CoerceError, ConsumerError, CoreError, CoreErrorCode, FailureKind, SectionError,
};
pub use types::{
    LoadOutcome, Location, RestoreConfig, RestoreMode, RestoreOutcome, RestoreReport,
    SectionFailure, Unavailable, UnavailableReason,
};
