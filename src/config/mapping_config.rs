use chrono::NaiveDate;
use serde::Deserialize;

/// Represents the `[mapping]` section: code systems and renderings used by the accessors
#[derive(Debug, Deserialize, Clone)]
pub struct MappingConfig {
    #[serde(default = "default_organization_system")]
    pub organization_system: String,
    #[serde(default = "default_identifier_system")]
    pub identifier_system: String,
    /// Prepended to organization codes before the directory lookup
    #[serde(default)]
    pub organization_code_prefix: String,
    #[serde(default = "default_delimiter")]
    pub given_delimiter: String,
    #[serde(default = "default_delimiter")]
    pub line_delimiter: String,
    /// Date used to decide whether a name or address period is current; today when unset
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            organization_system: default_organization_system(),
            identifier_system: default_identifier_system(),
            organization_code_prefix: String::new(),
            given_delimiter: default_delimiter(),
            line_delimiter: default_delimiter(),
            reference_date: None,
        }
    }
}

/// Default code system of organization identifiers
fn default_organization_system() -> String {
    "http://example.ph/organizations".to_string()
}

/// Default system of the national patient identifier
fn default_identifier_system() -> String {
    "http://example.ph/national-patient-id".to_string()
}

fn default_delimiter() -> String {
    " ".to_string()
}
