//! Serde models for the subset of FHIR R4 that the patient mapper reads.
//!
//! These models are not complete representations of the FHIR resources. They
//! carry only the elements the mapping needs, with every element optional and
//! every repeating element defaulting to empty.

use serde_json::Value;
use thiserror::Error;

pub mod datatypes;
pub mod patient;

pub use datatypes::{
    Address, AddressType, AddressUse, Extension, HumanName, Identifier, IdentifierUse, NameUse,
    Period, Reference,
};
pub use patient::Patient;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Expected FHIR resource type '{expected}' but found '{found}'")]
    WrongResourceType { expected: String, found: String },
    #[error("Failed to parse FHIR JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Read the `resourceType` element of a FHIR JSON resource, if any.
pub fn resource_type(v: &Value) -> Option<&str> {
    v.get("resourceType").and_then(|t| t.as_str())
}
