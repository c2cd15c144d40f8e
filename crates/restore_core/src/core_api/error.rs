use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoreErrorCode {
    Parse,
    InvalidRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Field-level failure raised while turning a raw node into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("expected {expected}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("malformed number {text:?}")]
    MalformedNumber { text: String },

    #[error("malformed coordinate {0:?}, expected \"x,y,z\"")]
    MalformedCoordinate(String),

    #[error("{enumeration} index {index} out of range 0..{cardinality}")]
    EnumIndexOutOfRange {
        enumeration: &'static str,
        index: i64,
        cardinality: usize,
    },
}

impl CoerceError {
    pub fn shape(expected: &'static str, found: &'static str) -> Self {
        Self::ShapeMismatch { expected, found }
    }

    pub fn malformed_number(text: impl Into<String>) -> Self {
        Self::MalformedNumber { text: text.into() }
    }
}

/// Opaque failure raised by a subsystem while consuming its section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConsumerError {
    pub message: String,
}

impl ConsumerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("required section `{0}` is missing")]
    RequiredSectionMissing(String),

    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error("consumer failure: {0}")]
    Consumer(#[from] ConsumerError),
}

/// Flat classification of a [`SectionError`], used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    RequiredSectionMissing,
    ShapeMismatch,
    MissingField,
    MalformedNumber,
    MalformedCoordinate,
    EnumIndexOutOfRange,
    ConsumerFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredSectionMissing => "required_section_missing",
            Self::ShapeMismatch => "shape_mismatch",
            Self::MissingField => "missing_field",
            Self::MalformedNumber => "malformed_number",
            Self::MalformedCoordinate => "malformed_coordinate",
            Self::EnumIndexOutOfRange => "enum_index_out_of_range",
            Self::ConsumerFailure => "consumer_failure",
        }
    }
}

impl SectionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::RequiredSectionMissing(_) => FailureKind::RequiredSectionMissing,
            Self::Consumer(_) => FailureKind::ConsumerFailure,
            Self::Coerce(e) => match e {
                CoerceError::ShapeMismatch { .. } => FailureKind::ShapeMismatch,
                CoerceError::MissingField(_) => FailureKind::MissingField,
                CoerceError::MalformedNumber { .. } => FailureKind::MalformedNumber,
                CoerceError::MalformedCoordinate(_) => FailureKind::MalformedCoordinate,
                CoerceError::EnumIndexOutOfRange { .. } => FailureKind::EnumIndexOutOfRange,
            },
        }
    }
}
