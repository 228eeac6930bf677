//! Error types for patient mapping

use crate::mapper::TargetField;
use thiserror::Error;

/// Failure classified by an accessor collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed input: {0}")]
    Malformed(String),
}

impl AccessError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::NotFound(_) => ErrorKind::NotFound,
            AccessError::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Malformed,
}

/// The single failure a mapping invocation reports.
///
/// `field` is `None` when the input could not be read as a Patient at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {source}", describe_field(.field))]
pub struct MappingError {
    pub field: Option<TargetField>,
    #[source]
    pub source: AccessError,
}

fn describe_field(field: &Option<TargetField>) -> String {
    match field {
        Some(f) => format!("Failed to map field '{}'", f.name()),
        None => "Failed to read input record".to_string(),
    }
}

impl MappingError {
    pub fn for_field(field: TargetField, source: AccessError) -> Self {
        Self {
            field: Some(field),
            source,
        }
    }

    pub fn input(source: AccessError) -> Self {
        Self {
            field: None,
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl From<fhir_model::ModelError> for MappingError {
    fn from(err: fhir_model::ModelError) -> Self {
        MappingError::input(AccessError::malformed(err.to_string()))
    }
}

/// A mapping table that does not cover the output schema exactly once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Mapping table has no rule for field '{}'", .0.name())]
    MissingField(TargetField),

    #[error("Mapping table has more than one rule for field '{}'", .0.name())]
    DuplicateField(TargetField),

    #[error("Mapping table rule for field '{}' produces the wrong kind of value", .0.name())]
    WrongKind(TargetField),
}

pub type Result<T> = std::result::Result<T, MappingError>;
