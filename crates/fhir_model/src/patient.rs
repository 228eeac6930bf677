use crate::datatypes::{Address, HumanName, Identifier, Reference};
use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// [Patient](<https://hl7.org/fhir/R4/patient.html>)
///
/// `gender` is kept as the raw administrative-gender code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,
}

impl Patient {
    pub const RESOURCE_TYPE: &'static str = "Patient";

    /// Parse a Patient from FHIR JSON.
    ///
    /// A missing `resourceType` is accepted; any other resource type is not.
    pub fn from_value(v: &Value) -> Result<Self> {
        if let Some(found) = crate::resource_type(v) {
            if found != Self::RESOURCE_TYPE {
                return Err(ModelError::WrongResourceType {
                    expected: Self::RESOURCE_TYPE.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(serde_json::from_value(v.clone())?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let v: Value = serde_json::from_str(s)?;
        Self::from_value(&v)
    }
}
